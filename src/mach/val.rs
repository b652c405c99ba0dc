use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime value
///
/// Every value is text. Numeric work parses the leading number out of
/// the text and writes the result back as text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Val(String);

impl Val {
    pub fn new<S: Into<String>>(s: S) -> Val {
        Val(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn truth(b: bool) -> Val {
        Val::new(if b { "1" } else { "0" })
    }

    /// Integral results print without a fraction.
    pub fn from_number(n: f64) -> Result<Val> {
        if !n.is_finite() {
            return Err(error!(Overflow));
        }
        if n.fract() == 0.0 && n.abs() < 1e15 {
            return Ok(Val(format!("{}", n as i64)));
        }
        Ok(Val(format!("{}", n)))
    }

    /// Whole text is a decimal number with optional sign.
    pub fn is_numeric(&self) -> bool {
        let s = self.0.trim();
        let s = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
        let mut digits = 0;
        let mut decimal = false;
        for ch in s.chars() {
            match ch {
                '0'..='9' => digits += 1,
                '.' if !decimal => decimal = true,
                _ => return false,
            }
        }
        digits > 0
    }

    /// The leading number of the text, zero when there is none.
    pub fn to_f64(&self) -> f64 {
        let s = self.0.trim_start();
        let mut end = 0;
        let mut decimal = false;
        for (index, ch) in s.char_indices() {
            match ch {
                '-' | '+' if index == 0 => {}
                '0'..='9' => {}
                '.' if !decimal => decimal = true,
                _ => break,
            }
            end = index + ch.len_utf8();
        }
        s[..end].parse::<f64>().unwrap_or(0.0)
    }

    /// Truncated toward zero.
    pub fn to_i64(&self) -> i64 {
        let n = self.to_f64().trunc();
        if n >= i64::MAX as f64 {
            i64::MAX
        } else if n <= i64::MIN as f64 {
            i64::MIN
        } else {
            n as i64
        }
    }

    /// Normalize numeric text, e.g. `007` or `1.50`.
    pub fn normalize(self) -> Result<Val> {
        Val::from_number(self.to_f64())
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::new(s)
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
