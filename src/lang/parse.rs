use super::{ast::*, token::*, Error, Line, LineNumber, Scanner};
use crate::error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Parse one line of text. A leading number makes a program line,
/// otherwise the result is the direct line.
pub fn parse(s: &str) -> Result<Line> {
    let mut parse = Parser {
        scan: Scanner::new(s),
    };
    let mut number: LineNumber = None;
    let result = parse.next().and_then(|_| {
        if let Token::Number(_) = parse.peek() {
            number = LineNumber::try_from(parse.peek())?;
            parse.next()?;
        }
        parse.line()
    });
    match result {
        Ok(statements) => Ok(Line::new(number, statements)),
        Err(e) => {
            let e = if e.column() == (0..0) {
                e.in_column(&parse.scan.column())
            } else {
                e
            };
            Err(e.in_line_number(number))
        }
    }
}

struct Parser<'a> {
    scan: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn line(&mut self) -> Result<Vec<Statement>> {
        let statements = self.compound()?;
        if let Token::Eol = self.peek() {
            self.next()?;
        }
        match self.peek() {
            Token::Eof => Ok(statements),
            _ => Err(error!(SyntaxError; "EXPECTED END OF LINE")),
        }
    }

    /// Statements separated by `:` up to the end of the line.
    fn compound(&mut self) -> Result<Vec<Statement>> {
        let mut v: Vec<Statement> = vec![];
        loop {
            match self.peek() {
                Token::Eol | Token::Eof => {
                    v.shrink_to_fit();
                    return Ok(v);
                }
                Token::Colon => {
                    self.next()?;
                    continue;
                }
                _ => {}
            }
            v.push(self.statement()?);
            if !self.peek().is_end_of_statement() {
                return Err(error!(SyntaxError; "EXPECTED END OF STATEMENT"));
            }
        }
    }

    fn peek(&self) -> &Token {
        self.scan.token()
    }

    fn next(&mut self) -> Result<()> {
        self.scan.next()
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Token::Ident(_) => Statement::assignment(self, false),
            Token::Word(word) => {
                let word = *word;
                // DATA and REM read the raw text that follows the keyword.
                if word != Word::Data && word != Word::Rem {
                    self.next()?;
                }
                Statement::for_word(self, word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn aexp(&mut self) -> Result<Expression> {
        let lhs = self.term1()?;
        if let Token::Word(Word::Or) = self.peek() {
            self.next()?;
            let rhs = self.aexp()?;
            return Ok(Expression::Or(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn term1(&mut self) -> Result<Expression> {
        if let Token::Word(Word::Not) = self.peek() {
            self.next()?;
            return Ok(Expression::Not(Box::new(self.term2()?)));
        }
        let lhs = self.term2()?;
        if let Token::Word(Word::And) = self.peek() {
            self.next()?;
            let rhs = self.term1()?;
            return Ok(Expression::And(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn term2(&mut self) -> Result<Expression> {
        let lhs = self.term3()?;
        if let Some(op) = self.relational_operator() {
            self.next()?;
            let rhs = self.term2()?;
            return Ok(Expression::for_relation(op, lhs, rhs));
        }
        Ok(lhs)
    }

    fn term3(&mut self) -> Result<Expression> {
        let lhs = self.term4()?;
        let op = match self.peek() {
            Token::Operator(op @ Operator::Plus) | Token::Operator(op @ Operator::Minus) => *op,
            _ => return Ok(lhs),
        };
        self.next()?;
        let rhs = Box::new(self.term3()?);
        Ok(match op {
            Operator::Plus => Expression::Add(Box::new(lhs), rhs),
            _ => Expression::Subtract(Box::new(lhs), rhs),
        })
    }

    fn term4(&mut self) -> Result<Expression> {
        let lhs = self.factor1()?;
        let op = match self.peek() {
            Token::Operator(op @ Operator::Multiply) | Token::Operator(op @ Operator::Divide) => {
                *op
            }
            _ => return Ok(lhs),
        };
        self.next()?;
        let rhs = Box::new(self.term4()?);
        Ok(match op {
            Operator::Multiply => Expression::Multiply(Box::new(lhs), rhs),
            _ => Expression::Divide(Box::new(lhs), rhs),
        })
    }

    fn factor1(&mut self) -> Result<Expression> {
        let lhs = self.factor2()?;
        if let Token::Operator(Operator::Caret) = self.peek() {
            self.next()?;
            let rhs = self.factor1()?;
            return Ok(Expression::Power(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn factor2(&mut self) -> Result<Expression> {
        match self.peek() {
            Token::Operator(Operator::Plus) => {
                self.next()?;
                Ok(Expression::Positive(Box::new(self.factor3()?)))
            }
            Token::Operator(Operator::Minus) => {
                self.next()?;
                Ok(Expression::Negation(Box::new(self.factor3()?)))
            }
            _ => self.factor3(),
        }
    }

    fn factor3(&mut self) -> Result<Expression> {
        match self.peek() {
            Token::LParen => {
                self.next()?;
                let expr = self.aexp()?;
                self.expect(Token::RParen)?;
                Ok(Expression::Paren(Box::new(expr)))
            }
            Token::Ident(ident) => {
                let is_string = ident.is_string();
                let var = Expression::Var(self.variable()?);
                if is_string {
                    self.string_comparison(var)
                } else {
                    Ok(var)
                }
            }
            Token::String(s) => {
                let lhs = Expression::String(s.clone());
                self.next()?;
                self.string_comparison(lhs)
            }
            Token::Number(n) => {
                let expr = Expression::Number(n.clone());
                self.next()?;
                Ok(expr)
            }
            Token::Word(word) => match Function::for_word(*word) {
                Some(func @ Function::Asc) | Some(func @ Function::Val) => {
                    self.next()?;
                    self.expect(Token::LParen)?;
                    let arg = self.sexp()?;
                    self.expect(Token::RParen)?;
                    Ok(Expression::Function(func, Box::new(arg)))
                }
                Some(Function::Chr) | None => {
                    Err(error!(SyntaxError; "EXPECTED EXPRESSION"))
                }
                Some(func) => {
                    self.next()?;
                    self.function_argument(func)
                }
            },
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    /// A string leaf followed by a relational operator becomes
    /// the left operand of that comparison.
    fn string_comparison(&mut self, lhs: Expression) -> Result<Expression> {
        if let Some(op) = self.relational_operator() {
            self.next()?;
            let rhs = self.sexp()?;
            return Ok(Expression::for_relation(op, lhs, rhs));
        }
        Ok(lhs)
    }

    fn sexp(&mut self) -> Result<Expression> {
        match self.peek() {
            Token::String(s) => {
                let expr = Expression::String(s.clone());
                self.next()?;
                Ok(expr)
            }
            Token::Ident(Ident::String(_)) => Ok(Expression::Var(self.variable()?)),
            Token::Word(Word::Chr) => {
                self.next()?;
                self.function_argument(Function::Chr)
            }
            Token::Word(Word::Str) => {
                self.next()?;
                self.function_argument(Function::Str)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STRING EXPRESSION")),
        }
    }

    fn function_argument(&mut self, func: Function) -> Result<Expression> {
        self.expect(Token::LParen)?;
        let arg = self.aexp()?;
        self.expect(Token::RParen)?;
        Ok(Expression::Function(func, Box::new(arg)))
    }

    fn relational_operator(&self) -> Option<Operator> {
        match self.peek() {
            Token::Operator(op) if op.is_relational() => Some(*op),
            _ => None,
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let ident = match self.peek() {
            Token::Ident(ident) => ident.clone(),
            _ => return Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        };
        self.next()?;
        if *self.peek() != Token::LParen {
            return Ok(Variable::Unary(ident));
        }
        self.next()?;
        let first = Box::new(self.aexp()?);
        let mut second = None;
        if let Token::Comma = self.peek() {
            self.next()?;
            second = Some(Box::new(self.aexp()?));
        }
        self.expect(Token::RParen)?;
        Ok(Variable::Array(ident, first, second))
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while let Token::Comma = self.peek() {
            self.next()?;
            v.push(self.variable()?);
        }
        v.shrink_to_fit();
        Ok(v)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        let mut v = vec![self.aexp()?];
        while let Token::Comma = self.peek() {
            self.next()?;
            v.push(self.aexp()?);
        }
        v.shrink_to_fit();
        Ok(v)
    }

    fn printer_list(&mut self) -> Result<Vec<PrintItem>> {
        let mut v: Vec<PrintItem> = vec![];
        loop {
            match self.peek() {
                t if t.is_end_of_statement() => {
                    v.shrink_to_fit();
                    return Ok(v);
                }
                Token::Comma => {
                    self.next()?;
                    v.push(PrintItem::Comma);
                }
                Token::Semicolon => {
                    self.next()?;
                    v.push(PrintItem::Semicolon);
                }
                Token::Word(Word::Chr) => v.push(PrintItem::Expression(self.sexp()?)),
                _ => v.push(PrintItem::Expression(self.aexp()?)),
            }
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if *self.peek() == token {
            return self.next();
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Word(_) => "EXPECTED RESERVED WORD",
                Ident(_) => "EXPECTED IDENTIFIER",
                Number(_) | String(_) => "EXPECTED LITERAL",
                Operator(_) => "EXPECTED OPERATOR",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Semicolon => "EXPECTED SEMICOLON",
                Colon | Eol | Eof => "EXPECTED END OF STATEMENT",
            }
        ))
    }
}

impl Expression {
    fn for_relation(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Equal => Expression::Equal(lhs, rhs),
            NotEqual => Expression::NotEqual(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            LessEqual => Expression::LessEqual(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
            _ => Expression::GreaterEqual(lhs, rhs),
        }
    }
}

impl Function {
    fn for_word(word: Word) -> Option<Function> {
        use Function::*;
        Some(match word {
            Word::Abs => Abs,
            Word::Asc => Asc,
            Word::Atn => Atn,
            Word::Chr => Chr,
            Word::Clog => Clog,
            Word::Cos => Cos,
            Word::Exp => Exp,
            Word::Int => Int,
            Word::Len => Len,
            Word::Log => Log,
            Word::Rnd => Rnd,
            Word::Sgn => Sgn,
            Word::Sin => Sin,
            Word::Sqr => Sqr,
            Word::Str => Str,
            Word::Val => Val,
            _ => return None,
        })
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        use Word::*;
        match word {
            Bye => Ok(Statement::Bye),
            Clr => Ok(Statement::Clr),
            Cls => Ok(Statement::Cls),
            Cont => Ok(Statement::Cont),
            Data => Self::r#data(parse),
            Dim => Self::r#dim(parse),
            End => Ok(Statement::End),
            For => Self::r#for(parse),
            Gosub => Ok(Statement::Gosub(parse.aexp()?)),
            Goto => Ok(Statement::Goto(parse.aexp()?)),
            If => Self::r#if(parse),
            Input => Ok(Statement::Input(parse.variable_list()?)),
            Let => Self::assignment(parse, true),
            List => Self::r#list(parse),
            Load => Ok(Statement::Load(parse.sexp()?)),
            New => Ok(Statement::New),
            Next => Self::r#next(parse),
            On => Self::r#on(parse),
            Pop => Ok(Statement::Pop),
            Print => Ok(Statement::Print(parse.printer_list()?)),
            Read => Ok(Statement::Read(parse.variable_list()?)),
            Rem => Ok(Statement::Rem(parse.scan.rest_of_line()?)),
            Restore => Self::r#restore(parse),
            Return => Ok(Statement::Return),
            Run => Ok(Statement::Run),
            Save => Ok(Statement::Save(parse.sexp()?)),
            Stop => Ok(Statement::Stop),
            Trap => Ok(Statement::Trap(parse.aexp()?)),
            To | Step | Then | Abs | Asc | Atn | Clog | Cos | Exp | Int | Len | Log | Rnd | Sgn
            | Sin | Sqr | Val | Chr | Str | And | Or | Not => {
                Err(error!(SyntaxError; "EXPECTED STATEMENT"))
            }
        }
    }

    fn assignment(parse: &mut Parser, with_let: bool) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = if var.ident().is_string() {
            parse.sexp()?
        } else {
            parse.aexp()?
        };
        if with_let {
            Ok(Statement::Let(var, expr))
        } else {
            Ok(Statement::Assign(var, expr))
        }
    }

    fn r#data(parse: &mut Parser) -> Result<Statement> {
        let text = parse.scan.rest_of_line()?;
        if text.is_empty() {
            return Ok(Statement::Data(vec![]));
        }
        Ok(Statement::Data(
            text.split(',').map(|s| s.trim().to_string()).collect(),
        ))
    }

    fn r#dim(parse: &mut Parser) -> Result<Statement> {
        let vars = parse.variable_list()?;
        if vars.iter().any(|v| matches!(v, Variable::Unary(_))) {
            return Err(error!(SyntaxError; "EXPECTED SUBSCRIPT"));
        }
        Ok(Statement::Dim(vars))
    }

    fn r#for(parse: &mut Parser) -> Result<Statement> {
        let var = parse.variable()?;
        if var.ident().is_string() {
            return Err(error!(SyntaxError; "EXPECTED NUMERIC VARIABLE"));
        }
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.aexp()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.aexp()?;
        let step = match parse.peek() {
            Token::Word(Word::Step) => {
                parse.next()?;
                Some(parse.aexp()?)
            }
            _ => None,
        };
        Ok(Statement::For(var, from, to, step))
    }

    fn r#if(parse: &mut Parser) -> Result<Statement> {
        let predicate = parse.aexp()?;
        parse.expect(Token::Word(Word::Then))?;
        if let Token::Number(_) = parse.peek() {
            return Ok(Statement::If(predicate, Then::Goto(parse.aexp()?)));
        }
        let statements = parse.compound()?;
        if statements.is_empty() {
            return Err(error!(SyntaxError; "EXPECTED STATEMENT"));
        }
        Ok(Statement::If(predicate, Then::Statements(statements)))
    }

    fn r#list(parse: &mut Parser) -> Result<Statement> {
        if parse.peek().is_end_of_statement() {
            return Ok(Statement::List(None, None));
        }
        let from = parse.aexp()?;
        let mut to = None;
        if let Token::Comma = parse.peek() {
            parse.next()?;
            to = Some(parse.aexp()?);
        }
        Ok(Statement::List(Some(from), to))
    }

    fn r#next(parse: &mut Parser) -> Result<Statement> {
        match parse.peek() {
            Token::Ident(ident) => {
                let ident = ident.clone();
                parse.next()?;
                Ok(Statement::Next(ident))
            }
            _ => Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        }
    }

    fn r#on(parse: &mut Parser) -> Result<Statement> {
        let selector = parse.aexp()?;
        let kind = match parse.peek() {
            Token::Word(Word::Goto) => OnKind::Goto,
            Token::Word(Word::Gosub) => OnKind::Gosub,
            _ => return Err(error!(SyntaxError; "EXPECTED GOTO OR GOSUB")),
        };
        parse.next()?;
        Ok(Statement::On(selector, kind, parse.expression_list()?))
    }

    fn r#restore(parse: &mut Parser) -> Result<Statement> {
        if parse.peek().is_end_of_statement() {
            return Ok(Statement::Restore(None));
        }
        Ok(Statement::Restore(Some(parse.aexp()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(s: &str) -> Statement {
        match parse(s) {
            Ok(line) => {
                let mut v = line.statements().to_vec();
                if v.len() != 1 {
                    panic!("expected one statement in {:?}", v);
                }
                v.pop().unwrap()
            }
            Err(e) => panic!("{} : {:?}", e, e),
        }
    }

    fn num(s: &str) -> Box<Expression> {
        Box::new(Expression::Number(s.to_string()))
    }

    fn var(s: &str) -> Box<Expression> {
        Box::new(Expression::Var(Variable::Unary(Ident::new(s))))
    }

    #[test]
    fn test_let_and_assign() {
        assert_eq!(
            parse_str("let a=b"),
            Statement::Let(Variable::Unary(Ident::new("A")), *var("B"))
        );
        assert_eq!(
            parse_str("a=b"),
            Statement::Assign(Variable::Unary(Ident::new("A")), *var("B"))
        );
    }

    #[test]
    fn test_right_association() {
        assert_eq!(
            parse_str("A=10-2-3"),
            Statement::Assign(
                Variable::Unary(Ident::new("A")),
                Expression::Subtract(num("10"), Box::new(Expression::Subtract(num("2"), num("3"))))
            )
        );
    }

    #[test]
    fn test_precedence_and_paren() {
        assert_eq!(
            parse_str("A=(1+2)*3"),
            Statement::Assign(
                Variable::Unary(Ident::new("A")),
                Expression::Multiply(
                    Box::new(Expression::Paren(Box::new(Expression::Add(num("1"), num("2"))))),
                    num("3")
                )
            )
        );
    }

    #[test]
    fn test_string_comparison_rewrite() {
        assert_eq!(
            parse_str(r#"IF A$="X" THEN 20"#),
            Statement::If(
                Expression::Equal(
                    var("A$"),
                    Box::new(Expression::String("X".to_string()))
                ),
                Then::Goto(*num("20"))
            )
        );
    }

    #[test]
    fn test_subscripted_comparison() {
        assert_eq!(
            parse_str("IF A(1,2)<3 THEN 20"),
            Statement::If(
                Expression::Less(
                    Box::new(Expression::Var(Variable::Array(
                        Ident::new("A"),
                        num("1"),
                        Some(num("2"))
                    ))),
                    num("3")
                ),
                Then::Goto(*num("20"))
            )
        );
    }

    #[test]
    fn test_if_then_statements() {
        assert_eq!(
            parse_str("IF X THEN PRINT:END"),
            Statement::If(
                *var("X"),
                Then::Statements(vec![Statement::Print(vec![]), Statement::End])
            )
        );
    }

    #[test]
    fn test_printer_list() {
        assert_eq!(
            parse_str(r#"PRINT 1;"A",CHR$(66)"#),
            Statement::Print(vec![
                PrintItem::Expression(*num("1")),
                PrintItem::Semicolon,
                PrintItem::Expression(Expression::String("A".to_string())),
                PrintItem::Comma,
                PrintItem::Expression(Expression::Function(Function::Chr, num("66"))),
            ])
        );
    }

    #[test]
    fn test_data_and_rem_take_raw_text() {
        assert_eq!(
            parse_str("DATA 1, HELLO :X"),
            Statement::Data(vec!["1".to_string(), "HELLO :X".to_string()])
        );
        assert_eq!(
            parse_str("REM GOTO: 10"),
            Statement::Rem("GOTO: 10".to_string())
        );
    }

    #[test]
    fn test_string_assignment_requires_string_expression() {
        assert!(parse("A$=1").is_err());
        assert!(parse("A=\"X\"").is_ok());
    }

    #[test]
    fn test_errors_carry_line_and_column() {
        let e = parse("10 PRINT 1 2)").unwrap_err();
        assert_eq!(e.line_number(), Some(10));
        assert_eq!(e.column(), 12..13);
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 10; EXPECTED EXPRESSION");
        let e = parse("GOTO").unwrap_err();
        assert!(e.is_direct());
    }

    #[test]
    fn test_missing_separator() {
        let e = parse("END END").unwrap_err();
        assert_eq!(e.to_string(), "SYNTAX ERROR; EXPECTED END OF STATEMENT");
    }
}
