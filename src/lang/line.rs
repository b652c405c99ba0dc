use super::ast::Statement;
use super::{Error, LineNumber};

/// ## A parsed line
///
/// Program lines carry their number. The direct line does not.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    statements: Vec<Statement>,
}

impl Line {
    pub fn new(number: LineNumber, statements: Vec<Statement>) -> Line {
        Line { number, statements }
    }

    /// Parse a line of text.
    pub fn parse(s: &str) -> Result<Line, Error> {
        super::parse(s)
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(number) = self.number {
            write!(f, "{} ", number)?;
        }
        let mut first = true;
        for statement in &self.statements {
            if !first {
                write!(f, " : ")?;
            }
            first = false;
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}
