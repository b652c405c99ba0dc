use super::runtime::{chain_at, statement_at, Address, Flow, Loop};
use super::{Event, Operation, Runtime, Val};
use crate::error;
use crate::lang::ast::{Expression, OnKind, PrintItem, Statement, Then, Variable};
use crate::lang::{Error, Ident, LineNumber};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

fn finished(value: f64, end: f64, step: f64) -> bool {
    if step < 0.0 {
        value < end
    } else {
        value > end
    }
}

impl Runtime {
    /// Execute one statement found at `pc`.
    pub(super) fn statement(&mut self, statement: &Statement, pc: &Address) -> Result<Flow> {
        use Statement::*;
        match statement {
            Assign(var, expr) | Let(var, expr) => {
                let val = self.eval(expr)?;
                self.store(var, val)?;
            }
            Bye => return Ok(Flow::Exit),
            Clr => {
                self.var.clear();
                self.data.clear();
            }
            Cls => self.pending.push_back(Event::Cls),
            Cont => match self.cont.take() {
                Some(addr) => {
                    self.pc = Some(addr);
                    return Ok(Flow::Jump);
                }
                None => return Err(error!(CantContinue)),
            },
            Data(items) => self.data.append(pc.line, items),
            Dim(vars) => {
                for var in vars {
                    let (d1, d2) = self.subscripts(var)?;
                    self.var.dimension(var.ident(), d1, d2)?;
                }
            }
            End => return Ok(Flow::Halt),
            For(var, from, to, step) => return self.r#for(pc, var, from, to, step.as_ref()),
            Gosub(expr) => {
                let target = self.find_line(self.eval(expr)?)?;
                return self.subroutine(pc, target);
            }
            Goto(expr) => {
                let target = self.find_line(self.eval(expr)?)?;
                self.pc = Some(Address::start_of(Some(target)));
                return Ok(Flow::Jump);
            }
            If(predicate, then) => return self.r#if(pc, predicate, then),
            Input(_) => return Ok(Flow::Wait),
            List(from, to) => self.list(from.as_ref(), to.as_ref())?,
            Load(expr) => {
                let name = self.eval(expr)?.into_string();
                self.pending.push_back(Event::Load(name));
            }
            New => {
                debug!("new");
                self.listing.clear();
                self.var.clear();
                self.data.clear();
                self.gosub.clear();
                self.loops.clear();
                self.cont = None;
                self.trap = None;
                if pc.line.is_some() {
                    return Ok(Flow::Halt);
                }
            }
            Next(ident) => return self.next(ident),
            On(selector, kind, targets) => {
                let n = self.eval(selector)?.to_i64();
                if n < 1 || n > 255 || n as usize > targets.len() {
                    return Ok(Flow::Next);
                }
                let target = self.find_line(self.eval(&targets[n as usize - 1])?)?;
                return match kind {
                    OnKind::Goto => {
                        self.pc = Some(Address::start_of(Some(target)));
                        Ok(Flow::Jump)
                    }
                    OnKind::Gosub => self.subroutine(pc, target),
                };
            }
            Pop => {
                if self.gosub.pop().is_none() {
                    return Err(error!(ReturnWithoutGosub));
                }
            }
            Print(items) => {
                let s = self.print(items)?;
                self.pending.push_back(Event::Print(s));
            }
            Read(vars) => {
                for var in vars {
                    let val = self.data.read()?;
                    self.store(var, val)?;
                }
            }
            Rem(_) => {}
            Restore(None) => self.data.restore(None)?,
            Restore(Some(expr)) => {
                let n = self.eval(expr)?.to_i64();
                if n < 0 || n > u16::max_value() as i64 {
                    return Err(error!(UndefinedLine));
                }
                self.data.restore(Some(n as u16))?;
            }
            Return => match self.gosub.pop() {
                Some(Some(addr)) => {
                    self.pc = Some(addr);
                    return Ok(Flow::Jump);
                }
                Some(None) => return Ok(Flow::Halt),
                None => return Err(error!(ReturnWithoutGosub)),
            },
            Run => {
                self.pc = self.run();
                return Ok(Flow::Jump);
            }
            Save(expr) => {
                let name = self.eval(expr)?.into_string();
                self.pending.push_back(Event::Save(name));
            }
            Stop => {
                if pc.line.is_some() {
                    self.cont = Some(pc.following());
                }
                self.report(error!(Break, pc.line));
                return Ok(Flow::Halt);
            }
            Trap(expr) => {
                let target = self.find_line(self.eval(expr)?)?;
                self.trap = Some(target);
            }
        }
        Ok(Flow::Next)
    }

    /// RETURN resumes at the line after the call.
    fn subroutine(&mut self, pc: &Address, target: u16) -> Result<Flow> {
        self.gosub.push(self.next_line(pc.line))?;
        self.pc = Some(Address::start_of(Some(target)));
        Ok(Flow::Jump)
    }

    fn r#if(&mut self, pc: &Address, predicate: &Expression, then: &Then) -> Result<Flow> {
        if self.eval(predicate)?.to_f64() != 1.0 {
            self.pc = self.next_line(pc.line);
            return Ok(Flow::Jump);
        }
        match then {
            Then::Goto(expr) => {
                let target = self.find_line(self.eval(expr)?)?;
                self.pc = Some(Address::start_of(Some(target)));
            }
            Then::Statements(_) => {
                let mut addr = pc.clone();
                addr.path.push(0);
                self.pc = Some(addr);
            }
        }
        Ok(Flow::Jump)
    }

    fn r#for(
        &mut self,
        pc: &Address,
        var: &Variable,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<Flow> {
        let start = self.eval(from)?;
        self.store(var, start)?;
        let end = self.eval(to)?.to_f64();
        let step = match step {
            Some(expr) => self.eval(expr)?.to_f64(),
            None => 1.0,
        };
        let ident = var.ident();
        if let Some(index) = self.loops.iter().position(|l| l.ident == *ident) {
            self.loops.truncate(index);
        }
        if finished(self.fetch(var)?.to_f64(), end, step) {
            self.pc = Some(self.find_next(pc, ident)?.following());
            return Ok(Flow::Jump);
        }
        self.loops.push(Loop {
            ident: ident.clone(),
            header: pc.clone(),
        })?;
        Ok(Flow::Next)
    }

    /// The `NEXT` closing a loop that runs zero times. Searches the rest
    /// of the current chain, then whole following lines.
    fn find_next(&self, pc: &Address, ident: &Ident) -> Result<Address> {
        let is_match = |s: &Statement| matches!(s, Statement::Next(id) if id == ident);
        let line = self.line_at(pc.line)?;
        if let Some((last, parent)) = pc.path.split_last() {
            if let Some(chain) = chain_at(line.statements(), parent) {
                if let Some(index) = chain.iter().skip(last + 1).position(is_match) {
                    let mut path = parent.to_vec();
                    path.push(last + 1 + index);
                    return Ok(Address {
                        line: pc.line,
                        path,
                    });
                }
            }
        }
        let mut number: LineNumber = pc.line;
        while let Some(n) = number.and_then(|n| self.listing.after(n)) {
            if let Some(line) = self.listing.get(n) {
                if let Some(index) = line.statements().iter().position(is_match) {
                    return Ok(Address {
                        line: Some(n),
                        path: vec![index],
                    });
                }
            }
            number = Some(n);
        }
        Err(error!(ForWithoutNext))
    }

    fn next(&mut self, ident: &Ident) -> Result<Flow> {
        let index = match self.loops.iter().rposition(|l| l.ident == *ident) {
            Some(index) => index,
            None => return Err(error!(NextWithoutFor)),
        };
        self.loops.truncate(index + 1);
        let header = match self.loops.last() {
            Some(l) => l.header.clone(),
            None => return Err(error!(InternalError)),
        };
        let line = self.line_at(header.line)?;
        let (var, to, step) = match statement_at(line.statements(), &header.path) {
            Some(Statement::For(var, _, to, step)) => (var, to, step),
            _ => return Err(error!(NextWithoutFor)),
        };
        let step = match step {
            Some(expr) => self.eval(expr)?.to_f64(),
            None => 1.0,
        };
        let value = self.fetch(var)?.to_f64() + step;
        self.store(var, Val::from_number(value)?)?;
        let end = self.eval(to)?.to_f64();
        if finished(value, end, step) {
            self.loops.pop();
            return Ok(Flow::Next);
        }
        self.pc = Some(header.following());
        Ok(Flow::Jump)
    }

    fn list(&mut self, from: Option<&Expression>, to: Option<&Expression>) -> Result<()> {
        let clamp = |n: i64| n.max(0).min(u16::max_value() as i64) as u16;
        let from = match from {
            Some(expr) => Some(clamp(self.eval(expr)?.to_i64())),
            None => None,
        };
        let to = match to {
            Some(expr) => Some(clamp(self.eval(expr)?.to_i64())),
            None => None,
        };
        let range = match (from, to) {
            (None, _) => 0..=u16::max_value(),
            (Some(a), None) => a..=a,
            (Some(a), Some(b)) => a..=b,
        };
        if range.start() > range.end() {
            return Ok(());
        }
        for line in self.listing.range(range) {
            self.pending.push_back(Event::List(line.to_string()));
        }
        Ok(())
    }

    fn print(&self, items: &[PrintItem]) -> Result<String> {
        let mut s = String::new();
        if items.is_empty() {
            s.push('\n');
        }
        for item in items {
            match item {
                PrintItem::Expression(expr) => {
                    s.push_str(self.eval(expr)?.as_str());
                    s.push('\n');
                }
                PrintItem::Comma => {
                    if s.ends_with('\n') {
                        s.pop();
                    }
                    s.push('\t');
                }
                PrintItem::Semicolon => {
                    if s.ends_with('\n') {
                        s.pop();
                    }
                }
            }
        }
        Ok(s)
    }

    fn subscripts(&self, var: &Variable) -> Result<(i64, i64)> {
        match var {
            Variable::Unary(_) => Ok((1, 1)),
            Variable::Array(_, first, second) => {
                let i1 = self.eval(first)?.to_i64();
                let i2 = match second {
                    Some(expr) => self.eval(expr)?.to_i64(),
                    None => 1,
                };
                Ok((i1, i2))
            }
        }
    }

    pub(super) fn fetch(&self, var: &Variable) -> Result<Val> {
        let (i1, i2) = self.subscripts(var)?;
        self.var.fetch(var.ident(), i1, i2)
    }

    pub(super) fn store(&mut self, var: &Variable, val: Val) -> Result<()> {
        let (i1, i2) = self.subscripts(var)?;
        self.var.store(var.ident(), i1, i2, val)
    }

    /// Evaluate an expression tree. Numeric results come back normalized.
    pub(super) fn eval(&self, expr: &Expression) -> Result<Val> {
        use Expression::*;
        match expr {
            Number(n) => Val::from(n.as_str()).normalize(),
            String(s) => Ok(Val::from(s.as_str())),
            Var(var) => self.fetch(var),
            Function(func, arg) => super::Function::call(*func, self.eval(arg)?),
            Paren(expr) => self.eval(expr),
            Positive(expr) => Operation::positive(self.eval(expr)?),
            Negation(expr) => Operation::negate(self.eval(expr)?),
            Power(l, r) => Operation::power(self.eval(l)?, self.eval(r)?),
            Multiply(l, r) => Operation::multiply(self.eval(l)?, self.eval(r)?),
            Divide(l, r) => Operation::divide(self.eval(l)?, self.eval(r)?),
            Add(l, r) => Operation::sum(self.eval(l)?, self.eval(r)?),
            Subtract(l, r) => Operation::subtract(self.eval(l)?, self.eval(r)?),
            Equal(l, r) => Operation::equal(self.eval(l)?, self.eval(r)?),
            NotEqual(l, r) => Operation::not_equal(self.eval(l)?, self.eval(r)?),
            Less(l, r) => Operation::less(self.eval(l)?, self.eval(r)?),
            LessEqual(l, r) => Operation::less_equal(self.eval(l)?, self.eval(r)?),
            Greater(l, r) => Operation::greater(self.eval(l)?, self.eval(r)?),
            GreaterEqual(l, r) => Operation::greater_equal(self.eval(l)?, self.eval(r)?),
            Not(expr) => Operation::not(self.eval(expr)?),
            And(l, r) => Operation::and(self.eval(l)?, self.eval(r)?),
            Or(l, r) => Operation::or(self.eval(l)?, self.eval(r)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_respects_direction() {
        assert!(!finished(1.0, 3.0, 1.0));
        assert!(finished(4.0, 3.0, 1.0));
        assert!(!finished(3.0, 1.0, -1.0));
        assert!(finished(0.0, 1.0, -1.0));
        assert!(!finished(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_print_buffer() {
        let r = Runtime::default();
        let items = match crate::lang::parse("PRINT 1;2,3;").unwrap().statements() {
            [Statement::Print(items)] => items.clone(),
            _ => panic!(),
        };
        assert_eq!(r.print(&items).unwrap(), "12\t3");
        assert_eq!(r.print(&[]).unwrap(), "\n");
    }
}
