pub use super::ident::Ident;
use super::{Error, LineNumber, MaxValue};
use crate::error;
use std::collections::BTreeMap;
use std::convert::TryFrom;

thread_local!(
    static STRING_TO_WORD: BTreeMap<&'static str, Word> =
        Word::ALL.iter().map(|w| (w.as_str(), *w)).collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Word(Word),
    Ident(Ident),
    Number(String),
    String(String),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    Semicolon,
    Colon,
    Eol,
    Eof,
}

impl Token {
    pub fn is_end_of_statement(&self) -> bool {
        matches!(self, Token::Colon | Token::Eol | Token::Eof)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Word(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Number(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            Colon => write!(f, ":"),
            Eol => writeln!(f),
            Eof => Ok(()),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Number(s) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<u16>() {
                    if line <= LineNumber::max_value() {
                        return Ok(Some(line));
                    }
                }
                return Err(error!(Overflow; msg));
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

/// ## Keyword table
///
/// Spellings are looked up case-insensitively through a balanced
/// ordered map; `Display` is the reverse mapping used for rendering.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Word {
    Bye,
    Clr,
    Cls,
    Cont,
    Data,
    Dim,
    End,
    For,
    To,
    Step,
    Gosub,
    Goto,
    If,
    Then,
    Input,
    Let,
    List,
    Load,
    New,
    Next,
    On,
    Pop,
    Print,
    Read,
    Rem,
    Restore,
    Return,
    Run,
    Save,
    Stop,
    Trap,
    Abs,
    Asc,
    Atn,
    Clog,
    Cos,
    Exp,
    Int,
    Len,
    Log,
    Rnd,
    Sgn,
    Sin,
    Sqr,
    Val,
    Chr,
    Str,
    And,
    Or,
    Not,
}

impl Word {
    pub const ALL: [Word; 50] = {
        use Word::*;
        [
            Bye, Clr, Cls, Cont, Data, Dim, End, For, To, Step, Gosub, Goto, If, Then, Input, Let,
            List, Load, New, Next, On, Pop, Print, Read, Rem, Restore, Return, Run, Save, Stop,
            Trap, Abs, Asc, Atn, Clog, Cos, Exp, Int, Len, Log, Rnd, Sgn, Sin, Sqr, Val, Chr, Str,
            And, Or, Not,
        ]
    };

    pub fn from_string(s: &str) -> Option<Word> {
        let s = s.to_ascii_uppercase();
        STRING_TO_WORD.with(|stw| stw.get(s.as_str()).copied())
    }

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            Bye => "BYE",
            Clr => "CLR",
            Cls => "CLS",
            Cont => "CONT",
            Data => "DATA",
            Dim => "DIM",
            End => "END",
            For => "FOR",
            To => "TO",
            Step => "STEP",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Then => "THEN",
            Input => "INPUT",
            Let => "LET",
            List => "LIST",
            Load => "LOAD",
            New => "NEW",
            Next => "NEXT",
            On => "ON",
            Pop => "POP",
            Print => "PRINT",
            Read => "READ",
            Rem => "REM",
            Restore => "RESTORE",
            Return => "RETURN",
            Run => "RUN",
            Save => "SAVE",
            Stop => "STOP",
            Trap => "TRAP",
            Abs => "ABS",
            Asc => "ASC",
            Atn => "ATN",
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
            Val => "VAL",
            Chr => "CHR$",
            Str => "STR$",
            And => "AND",
            Or => "OR",
            Not => "NOT",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Caret,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    pub fn is_relational(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Caret => write!(f, "^"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}
