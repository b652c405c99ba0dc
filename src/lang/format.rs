use super::ast::*;
use std::fmt::{Display, Formatter, Result};

fn write_list<T: Display>(f: &mut Formatter, items: &[T]) -> Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Statement::*;
        match self {
            Assign(var, expr) => write!(f, "{} = {}", var, expr),
            Bye => write!(f, "BYE"),
            Clr => write!(f, "CLR"),
            Cls => write!(f, "CLS"),
            Cont => write!(f, "CONT"),
            Data(items) => {
                write!(f, "DATA")?;
                if !items.is_empty() {
                    write!(f, " {}", items.join(","))?;
                }
                Ok(())
            }
            Dim(vars) => {
                write!(f, "DIM ")?;
                write_list(f, vars)
            }
            End => write!(f, "END"),
            For(var, from, to, step) => {
                write!(f, "FOR {} = {} TO {}", var, from, to)?;
                if let Some(step) = step {
                    write!(f, " STEP {}", step)?;
                }
                Ok(())
            }
            Gosub(expr) => write!(f, "GOSUB {}", expr),
            Goto(expr) => write!(f, "GOTO {}", expr),
            If(predicate, then) => write!(f, "IF {} THEN {}", predicate, then),
            Input(vars) => {
                write!(f, "INPUT ")?;
                write_list(f, vars)
            }
            Let(var, expr) => write!(f, "LET {} = {}", var, expr),
            List(from, to) => {
                write!(f, "LIST")?;
                if let Some(from) = from {
                    write!(f, " {}", from)?;
                }
                if let Some(to) = to {
                    write!(f, ",{}", to)?;
                }
                Ok(())
            }
            Load(expr) => write!(f, "LOAD {}", expr),
            New => write!(f, "NEW"),
            Next(ident) => write!(f, "NEXT {}", ident),
            On(selector, kind, targets) => {
                let word = match kind {
                    OnKind::Goto => "GOTO",
                    OnKind::Gosub => "GOSUB",
                };
                write!(f, "ON {} {} ", selector, word)?;
                write_list(f, targets)
            }
            Pop => write!(f, "POP"),
            Print(items) => {
                write!(f, "PRINT")?;
                let mut prev: Option<&PrintItem> = None;
                for item in items {
                    match (prev, item) {
                        (Some(PrintItem::Expression(_)), PrintItem::Expression(_))
                        | (Some(PrintItem::Comma), _)
                        | (Some(PrintItem::Semicolon), _)
                        | (None, _) => write!(f, " ")?,
                        _ => {}
                    }
                    write!(f, "{}", item)?;
                    prev = Some(item);
                }
                Ok(())
            }
            Read(vars) => {
                write!(f, "READ ")?;
                write_list(f, vars)
            }
            Rem(text) => {
                if text.is_empty() {
                    write!(f, "REM")
                } else {
                    write!(f, "REM {}", text)
                }
            }
            Restore(line) => match line {
                Some(line) => write!(f, "RESTORE {}", line),
                None => write!(f, "RESTORE"),
            },
            Return => write!(f, "RETURN"),
            Run => write!(f, "RUN"),
            Save(expr) => write!(f, "SAVE {}", expr),
            Stop => write!(f, "STOP"),
            Trap(expr) => write!(f, "TRAP {}", expr),
        }
    }
}

impl Display for Then {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Then::Goto(expr) => write!(f, "{}", expr),
            Then::Statements(statements) => {
                for (index, statement) in statements.iter().enumerate() {
                    if index > 0 {
                        write!(f, " : ")?;
                    }
                    write!(f, "{}", statement)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for PrintItem {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PrintItem::Expression(expr) => write!(f, "{}", expr),
            PrintItem::Comma => write!(f, ","),
            PrintItem::Semicolon => write!(f, ";"),
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Variable::Unary(ident) => write!(f, "{}", ident),
            Variable::Array(ident, first, None) => write!(f, "{}({})", ident, first),
            Variable::Array(ident, first, Some(second)) => {
                write!(f, "{}({},{})", ident, first, second)
            }
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Function::*;
        let s = match self {
            Abs => "ABS",
            Asc => "ASC",
            Atn => "ATN",
            Chr => "CHR$",
            Clog => "CLOG",
            Cos => "COS",
            Exp => "EXP",
            Int => "INT",
            Len => "LEN",
            Log => "LOG",
            Rnd => "RND",
            Sgn => "SGN",
            Sin => "SIN",
            Sqr => "SQR",
            Str => "STR$",
            Val => "VAL",
        };
        write!(f, "{}", s)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Expression::*;
        match self {
            Number(n) => write!(f, "{}", n),
            String(s) => write!(f, "\"{}\"", s),
            Var(var) => write!(f, "{}", var),
            Function(func, arg) => write!(f, "{}({})", func, arg),
            Paren(expr) => write!(f, "({})", expr),
            Positive(expr) => write!(f, "+{}", expr),
            Negation(expr) => write!(f, "-{}", expr),
            Power(lhs, rhs) => write!(f, "{} ^ {}", lhs, rhs),
            Multiply(lhs, rhs) => write!(f, "{} * {}", lhs, rhs),
            Divide(lhs, rhs) => write!(f, "{} / {}", lhs, rhs),
            Add(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            Subtract(lhs, rhs) => write!(f, "{} - {}", lhs, rhs),
            Equal(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
            NotEqual(lhs, rhs) => write!(f, "{} <> {}", lhs, rhs),
            Less(lhs, rhs) => write!(f, "{} < {}", lhs, rhs),
            LessEqual(lhs, rhs) => write!(f, "{} <= {}", lhs, rhs),
            Greater(lhs, rhs) => write!(f, "{} > {}", lhs, rhs),
            GreaterEqual(lhs, rhs) => write!(f, "{} >= {}", lhs, rhs),
            Not(expr) => write!(f, "NOT {}", expr),
            And(lhs, rhs) => write!(f, "{} AND {}", lhs, rhs),
            Or(lhs, rhs) => write!(f, "{} OR {}", lhs, rhs),
        }
    }
}
