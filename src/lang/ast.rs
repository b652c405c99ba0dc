/*!
## Abstract syntax tree

A parsed line is a chain of [`Statement`]s. Expressions are trees that
exclusively own their children. Every node kind names its fields for the
role they play: operand pairs, subscript pairs, comparison operands.

*/

pub use super::ident::Ident;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    /// Assignment without the `LET` keyword.
    Assign(Variable, Expression),
    Bye,
    Clr,
    Cls,
    Cont,
    Data(Vec<String>),
    Dim(Vec<Variable>),
    End,
    For(Variable, Expression, Expression, Option<Expression>),
    Gosub(Expression),
    Goto(Expression),
    If(Expression, Then),
    Input(Vec<Variable>),
    Let(Variable, Expression),
    List(Option<Expression>, Option<Expression>),
    Load(Expression),
    New,
    Next(Ident),
    On(Expression, OnKind, Vec<Expression>),
    Pop,
    Print(Vec<PrintItem>),
    Read(Vec<Variable>),
    Rem(String),
    Restore(Option<Expression>),
    Return,
    Run,
    Save(Expression),
    Stop,
    Trap(Expression),
}

/// The clause after `THEN`.
#[derive(Debug, PartialEq, Clone)]
pub enum Then {
    Goto(Expression),
    Statements(Vec<Statement>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OnKind {
    Goto,
    Gosub,
}

#[derive(Debug, PartialEq, Clone)]
pub enum PrintItem {
    Expression(Expression),
    Comma,
    Semicolon,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Variable {
    Unary(Ident),
    Array(Ident, Box<Expression>, Option<Box<Expression>>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(ident) | Variable::Array(ident, ..) => ident,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Function {
    Abs,
    Asc,
    Atn,
    Chr,
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
    Str,
    Val,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(String),
    String(String),
    Var(Variable),
    Function(Function, Box<Expression>),
    Paren(Box<Expression>),
    Positive(Box<Expression>),
    Negation(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    LessEqual(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterEqual(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}
