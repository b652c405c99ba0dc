use super::{token::*, Column, Error, MAX_TOKEN_LEN};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_relational(c: char) -> bool {
    c == '<' || c == '=' || c == '>'
}

/// ## Scanner
///
/// Holds a single current-token cell which the parser inspects with
/// [`Scanner::token`] and advances with [`Scanner::next`].
pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    pos: usize,
    token: Token,
    col: Column,
}

impl<'a> Scanner<'a> {
    /// The first token is not scanned until the first call to `next`.
    pub fn new(s: &'a str) -> Scanner<'a> {
        Scanner {
            chars: s.chars().peekable(),
            pos: 0,
            token: Token::Eof,
            col: 0..0,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn column(&self) -> Column {
        self.col.clone()
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Classify the next lexeme into the current-token cell.
    pub fn next(&mut self) -> Result<()> {
        self.whitespace();
        self.col = self.pos..self.pos;
        let token = match self.peek() {
            None => Token::Eof,
            Some('\n') => {
                self.advance();
                Token::Eol
            }
            Some(ch) if is_basic_digit(ch) => self.number()?,
            Some(ch) if is_basic_alphabetic(ch) => self.alphabetic()?,
            Some(ch) if is_relational(ch) => self.relational(),
            Some('"') => self.string()?,
            Some(_) => self.minutia()?,
        };
        self.col.end = self.pos;
        self.token = token;
        Ok(())
    }

    /// Raw text up to the end of the line, used by DATA and REM.
    /// The current token becomes whatever ends the line.
    pub fn rest_of_line(&mut self) -> Result<String> {
        let mut s = String::new();
        self.whitespace();
        self.col = self.pos..self.pos;
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            s.push(ch);
            self.advance();
            if !is_basic_whitespace(ch) {
                self.too_long(s.trim_end())?;
            }
        }
        self.next()?;
        Ok(s.trim().to_string())
    }

    fn whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_basic_whitespace(ch) {
                break;
            }
            self.advance();
        }
    }

    fn too_long(&self, s: &str) -> Result<()> {
        if s.chars().count() > MAX_TOKEN_LEN {
            let col = self.col.start..self.pos;
            return Err(error!(StringTooLong, ..&col; "TOKEN EXCEEDS 128 CHARACTERS"));
        }
        Ok(())
    }

    fn number(&mut self) -> Result<Token> {
        let mut s = String::new();
        let mut decimal = false;
        while let Some(ch) = self.peek() {
            if ch == '.' && !decimal {
                decimal = true;
            } else if !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.advance();
            self.too_long(&s)?;
        }
        Ok(Token::Number(s))
    }

    fn string(&mut self) -> Result<Token> {
        let mut s = String::new();
        self.advance();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return Ok(Token::String(s));
                }
                None | Some('\n') => {
                    let col = self.col.start..self.pos;
                    return Err(error!(SyntaxError, ..&col; "UNTERMINATED STRING"));
                }
                Some(ch) => {
                    s.push(ch);
                    self.advance();
                    self.too_long(&s)?;
                }
            }
        }
    }

    fn alphabetic(&mut self) -> Result<Token> {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if is_basic_alphabetic(ch) || is_basic_digit(ch) {
                s.push(ch.to_ascii_uppercase());
                self.advance();
            } else if ch == '$' {
                s.push(ch);
                self.advance();
                break;
            } else {
                break;
            }
            self.too_long(&s)?;
        }
        match Word::from_string(&s) {
            Some(word) => Ok(Token::Word(word)),
            None => Ok(Token::Ident(Ident::new(&s))),
        }
    }

    fn relational(&mut self) -> Token {
        use Operator::*;
        let first = self.advance();
        let op = match (first, self.peek()) {
            (Some('<'), Some('=')) => LessEqual,
            (Some('<'), Some('>')) => NotEqual,
            (Some('>'), Some('=')) => GreaterEqual,
            (Some('<'), _) => return Token::Operator(Less),
            (Some('>'), _) => return Token::Operator(Greater),
            _ => return Token::Operator(Equal),
        };
        self.advance();
        Token::Operator(op)
    }

    fn minutia(&mut self) -> Result<Token> {
        let token = match self.advance() {
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some(',') => Token::Comma,
            Some(';') => Token::Semicolon,
            Some(':') => Token::Colon,
            Some('+') => Token::Operator(Operator::Plus),
            Some('-') => Token::Operator(Operator::Minus),
            Some('*') => Token::Operator(Operator::Multiply),
            Some('/') => Token::Operator(Operator::Divide),
            Some('^') => Token::Operator(Operator::Caret),
            _ => {
                let col = self.col.start..self.pos;
                return Err(error!(SyntaxError, ..&col; "UNEXPECTED CHARACTER"));
            }
        };
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> Result<Vec<Token>> {
        let mut scan = Scanner::new(s);
        let mut tokens = vec![];
        loop {
            scan.next()?;
            tokens.push(scan.token().clone());
            if *scan.token() == Token::Eof {
                return Ok(tokens);
            }
        }
    }

    #[test]
    fn test_whitespace_is_skipped_but_newline_is_not() {
        assert_eq!(
            lex(" 10 \t PRINT\n").unwrap(),
            vec![
                Token::Number("10".to_string()),
                Token::Word(Word::Print),
                Token::Eol,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_columns() {
        let mut scan = Scanner::new("10 GOTO 20");
        scan.next().unwrap();
        assert_eq!(scan.column(), 0..2);
        scan.next().unwrap();
        assert_eq!(scan.column(), 3..7);
        scan.next().unwrap();
        assert_eq!(scan.column(), 8..10);
    }

    #[test]
    fn test_rest_of_line() {
        let mut scan = Scanner::new("DATA 1, 2 ,HELLO:X\nPRINT");
        scan.next().unwrap();
        assert_eq!(scan.token(), &Token::Word(Word::Data));
        assert_eq!(scan.rest_of_line().unwrap(), "1, 2 ,HELLO:X");
        assert_eq!(scan.token(), &Token::Eol);
        scan.next().unwrap();
        assert_eq!(scan.token(), &Token::Word(Word::Print));
    }

    #[test]
    fn test_second_decimal_point_is_an_error() {
        assert!(lex("1.2.3").is_err());
    }

    #[test]
    fn test_token_length_cap() {
        let long = format!("\"{}\"", "X".repeat(MAX_TOKEN_LEN + 1));
        let e = lex(&long).unwrap_err();
        assert_eq!(e.to_string(), "STRING TOO LONG; TOKEN EXCEEDS 128 CHARACTERS");
        let ok = format!("\"{}\"", "X".repeat(MAX_TOKEN_LEN));
        assert!(lex(&ok).is_ok());
    }

    #[test]
    fn test_rest_of_line_length_cap() {
        let text = format!("REM {}", "X".repeat(MAX_TOKEN_LEN + 1));
        let mut scan = Scanner::new(&text);
        scan.next().unwrap();
        let e = scan.rest_of_line().unwrap_err();
        assert_eq!(e.to_string(), "STRING TOO LONG; TOKEN EXCEEDS 128 CHARACTERS");
        assert_eq!(e.column().start, 4);
        let text = format!("DATA {}   ", "Y".repeat(MAX_TOKEN_LEN));
        let mut scan = Scanner::new(&text);
        scan.next().unwrap();
        assert_eq!(scan.rest_of_line().unwrap().len(), MAX_TOKEN_LEN);
    }
}
