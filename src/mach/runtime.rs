use super::{DataBank, Listing, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{Statement, Then};
use crate::lang::{Error, Ident, Line, LineNumber};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// ## Events returned by the runtime
///
/// The terminal acts on each event then calls `execute` again.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Stopped,
    Running,
    Errors(Arc<Vec<Error>>),
    Print(String),
    /// Waiting for one line of input after this prompt.
    Input(String),
    List(String),
    Load(String),
    Save(String),
    Cls,
    Bye,
}

/// ## Position of a statement
///
/// `path` indexes the line's statement chain. Each extra index
/// descends into the chain owned by an `IF ... THEN` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub line: LineNumber,
    pub path: Vec<usize>,
}

impl Address {
    pub fn start_of(line: LineNumber) -> Address {
        Address {
            line,
            path: vec![0],
        }
    }

    /// The statement after this one in the same chain.
    pub fn following(&self) -> Address {
        let mut next = self.clone();
        if let Some(last) = next.path.last_mut() {
            *last += 1;
        }
        next
    }
}

/// An active FOR loop.
#[derive(Debug, Clone)]
pub struct Loop {
    pub ident: Ident,
    pub header: Address,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Stopped,
    Running,
    Input(usize),
    Bye,
}

/// What the executor does after a statement.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Next,
    Jump,
    Halt,
    Wait,
    Exit,
}

/// ## Interpreter session
///
/// Owns the program, the variables, the DATA pool and all execution state.
pub struct Runtime {
    pub(super) listing: Listing,
    pub(super) direct: Arc<Line>,
    pub(super) var: Var,
    pub(super) data: DataBank,
    pub(super) pc: Option<Address>,
    pub(super) gosub: Stack<Option<Address>>,
    pub(super) loops: Stack<Loop>,
    pub(super) cont: Option<Address>,
    pub(super) trap: Option<u16>,
    pub(super) pending: VecDeque<Event>,
    state: State,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime {
            listing: Listing::default(),
            direct: Arc::new(Line::new(None, vec![])),
            var: Var::new(),
            data: DataBank::default(),
            pc: None,
            gosub: Stack::new("GOSUB STACK OVERFLOW"),
            loops: Stack::new("FOR STACK OVERFLOW"),
            cont: None,
            trap: None,
            pending: VecDeque::new(),
            state: State::Stopped,
        }
    }
}

impl Runtime {
    /// Enter a line of text. Program lines are stored, the direct line
    /// starts running, and input requested by INPUT is stored.
    /// Returns true when the text is worth keeping in history.
    pub fn enter(&mut self, s: &str) -> bool {
        if let State::Input(index) = self.state {
            self.enter_input(s, index);
            return false;
        }
        let line = match Line::parse(s) {
            Ok(line) => line,
            Err(error) => {
                let direct = error.is_direct();
                self.report(error);
                if direct {
                    self.ready();
                }
                return true;
            }
        };
        match line.number() {
            Some(number) => {
                self.cont = None;
                if line.is_empty() {
                    debug!(line = number, "delete line");
                    self.listing.remove(number);
                } else {
                    debug!(line = number, "store line");
                    self.listing.insert(line);
                }
                true
            }
            None => {
                if line.is_empty() {
                    return false;
                }
                trace!(%line, "direct");
                self.direct = Arc::new(line);
                self.pc = Some(Address::start_of(None));
                self.state = State::Running;
                true
            }
        }
    }

    /// Run up to `cycles` statements and return the next event.
    pub fn execute(&mut self, cycles: usize) -> Event {
        let mut cycles = cycles;
        loop {
            if let Some(event) = self.pending.pop_front() {
                return event;
            }
            match self.state {
                State::Stopped => return Event::Stopped,
                State::Input(_) => return Event::Input("? ".to_string()),
                State::Bye => return Event::Bye,
                State::Running => {
                    if cycles == 0 {
                        return Event::Running;
                    }
                    cycles -= 1;
                    self.step();
                }
            }
        }
    }

    /// Break into a running program. CONT resumes at the interrupted statement.
    pub fn interrupt(&mut self) {
        match self.state {
            State::Running | State::Input(_) => {}
            State::Stopped | State::Bye => return,
        }
        let line = self.pc.as_ref().and_then(|pc| pc.line);
        if line.is_some() {
            self.cont = self.pc.clone();
        }
        self.report(error!(Break, line));
        self.stop();
    }

    pub fn get_listing(&self) -> Listing {
        self.listing.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    fn enter_input(&mut self, s: &str, index: usize) {
        let pc = match self.pc.clone() {
            Some(pc) => pc,
            None => return self.stop(),
        };
        let line = match self.line_at(pc.line) {
            Ok(line) => line,
            Err(error) => return self.runtime_error(error, pc.line),
        };
        let vars = match statement_at(line.statements(), &pc.path) {
            Some(Statement::Input(vars)) => vars,
            _ => return self.stop(),
        };
        let value = Val::new(s.trim_end_matches(|c| c == '\n' || c == '\r'));
        self.state = State::Running;
        if let Err(error) = self.store(&vars[index], value) {
            return self.runtime_error(error, pc.line);
        }
        if index + 1 < vars.len() {
            self.state = State::Input(index + 1);
        } else {
            self.pc = Some(pc.following());
        }
    }

    fn step(&mut self) {
        let pc = match self.pc.clone() {
            Some(pc) => pc,
            None => return self.stop(),
        };
        let line = match self.line_at(pc.line) {
            Ok(line) => line,
            Err(error) => return self.runtime_error(error, pc.line),
        };
        let statement = match statement_at(line.statements(), &pc.path) {
            Some(statement) => statement,
            None => {
                self.pc = self.next_line(pc.line);
                return;
            }
        };
        match self.statement(statement, &pc) {
            Ok(Flow::Next) => self.pc = Some(pc.following()),
            Ok(Flow::Jump) => {}
            Ok(Flow::Wait) => self.state = State::Input(0),
            Ok(Flow::Halt) => self.stop(),
            Ok(Flow::Exit) => {
                self.pc = None;
                self.state = State::Bye;
            }
            Err(error) => self.runtime_error(error, pc.line),
        }
    }

    pub(super) fn line_at(&self, line: LineNumber) -> Result<Arc<Line>> {
        match line {
            None => Ok(self.direct.clone()),
            Some(number) => match self.listing.get(number) {
                Some(line) => Ok(line.clone()),
                None => Err(error!(UndefinedLine)),
            },
        }
    }

    /// First statement of the following program line. The direct line
    /// and the last program line have nothing after them.
    pub(super) fn next_line(&self, line: LineNumber) -> Option<Address> {
        let number = line?;
        self.listing
            .after(number)
            .map(|n| Address::start_of(Some(n)))
    }

    /// Resolve a target line for GOTO, GOSUB, TRAP and friends.
    pub(super) fn find_line(&self, val: Val) -> Result<u16> {
        let n = val.to_i64();
        if n >= 0 && n <= u16::max_value() as i64 && self.listing.get(n as u16).is_some() {
            return Ok(n as u16);
        }
        Err(error!(UndefinedLine))
    }

    pub(super) fn report(&mut self, error: Error) {
        self.pending.push_back(Event::Errors(Arc::new(vec![error])));
    }

    fn ready(&mut self) {
        self.pending.push_back(Event::Print("READY.\n".to_string()));
    }

    fn stop(&mut self) {
        self.pc = None;
        if self.state != State::Stopped {
            self.state = State::Stopped;
            self.ready();
        }
    }

    /// An armed TRAP takes the error, once. Otherwise the run is over.
    fn runtime_error(&mut self, error: Error, line: LineNumber) {
        let error = if error.line_number().is_none() {
            error.in_line_number(line)
        } else {
            error
        };
        if let Some(trap) = self.trap.take() {
            if self.listing.get(trap).is_some() {
                debug!(%error, trap, "trapped");
                self.pc = Some(Address::start_of(Some(trap)));
                self.state = State::Running;
                return;
            }
        }
        debug!(%error, "runtime error");
        self.report(error);
        self.stop();
    }

    /// Reset everything RUN resets and collect DATA in program order.
    pub(super) fn run(&mut self) -> Option<Address> {
        self.var.clear();
        self.data.clear();
        self.gosub.clear();
        self.loops.clear();
        self.cont = None;
        self.trap = None;
        for line in self.listing.lines() {
            collect_data(&mut self.data, line.number(), line.statements());
        }
        debug!(lines = self.listing.len(), data = self.data.len(), "run");
        self.listing.first().map(|n| Address::start_of(Some(n)))
    }
}

fn collect_data(data: &mut DataBank, line: LineNumber, statements: &[Statement]) {
    for statement in statements {
        match statement {
            Statement::Data(items) => data.append(line, items),
            Statement::If(_, Then::Statements(chain)) => collect_data(data, line, chain),
            _ => {}
        }
    }
}

/// Find a statement by path, descending into IF chains.
pub(super) fn statement_at<'a>(statements: &'a [Statement], path: &[usize]) -> Option<&'a Statement> {
    let (first, rest) = path.split_first()?;
    let statement = statements.get(*first)?;
    if rest.is_empty() {
        return Some(statement);
    }
    match statement {
        Statement::If(_, Then::Statements(chain)) => statement_at(chain, rest),
        _ => None,
    }
}

/// The chain a path's last index points into.
pub(super) fn chain_at<'a>(statements: &'a [Statement], path: &[usize]) -> Option<&'a [Statement]> {
    match path.split_first() {
        None => Some(statements),
        Some((first, rest)) => match statements.get(*first)? {
            Statement::If(_, Then::Statements(chain)) => chain_at(chain, rest),
            _ => None,
        },
    }
}
