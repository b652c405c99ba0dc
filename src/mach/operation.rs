use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Operators on text values
///
/// Arithmetic reads both operands as numbers. Comparisons are numeric
/// when either side is numeric text, otherwise the strings are ordered.
/// Logic and comparison results are `1` or `0`.
pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        Val::from_number(-val.to_f64())
    }

    pub fn positive(val: Val) -> Result<Val> {
        Val::from_number(val.to_f64())
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        Val::from_number(lhs.to_f64() + rhs.to_f64())
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        Val::from_number(lhs.to_f64() - rhs.to_f64())
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        Val::from_number(lhs.to_f64() * rhs.to_f64())
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let r = rhs.to_f64();
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Val::from_number(lhs.to_f64() / r)
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let n = lhs.to_f64().powf(rhs.to_f64());
        if n.is_nan() {
            return Err(error!(IllegalFunctionCall));
        }
        Val::from_number(n)
    }

    fn compare(lhs: &Val, rhs: &Val) -> Option<Ordering> {
        if lhs.is_numeric() || rhs.is_numeric() {
            lhs.to_f64().partial_cmp(&rhs.to_f64())
        } else {
            Some(lhs.as_str().cmp(rhs.as_str()))
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(
            Operation::compare(&lhs, &rhs) == Some(Ordering::Equal),
        ))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(
            Operation::compare(&lhs, &rhs) != Some(Ordering::Equal),
        ))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(
            Operation::compare(&lhs, &rhs) == Some(Ordering::Less),
        ))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(matches!(
            Operation::compare(&lhs, &rhs),
            Some(Ordering::Less) | Some(Ordering::Equal)
        )))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(
            Operation::compare(&lhs, &rhs) == Some(Ordering::Greater),
        ))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(matches!(
            Operation::compare(&lhs, &rhs),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        )))
    }

    pub fn not(val: Val) -> Result<Val> {
        Ok(Val::truth(val.to_f64() == 0.0))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(lhs.to_f64() != 0.0 && rhs.to_f64() != 0.0))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(lhs.to_f64() != 0.0 || rhs.to_f64() != 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Val {
        Val::from(s)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Operation::sum(v("1"), v("2")).unwrap(), v("3"));
        assert_eq!(Operation::subtract(v("1"), v("2.5")).unwrap(), v("-1.5"));
        assert_eq!(Operation::divide(v("10"), v("4")).unwrap(), v("2.5"));
        assert_eq!(Operation::power(v("2"), v("10")).unwrap(), v("1024"));
        assert_eq!(Operation::negate(v("ABC")).unwrap(), v("0"));
    }

    #[test]
    fn test_division_by_zero() {
        let e = Operation::divide(v("1"), v("0")).unwrap_err();
        assert_eq!(e.to_string(), "DIVISION BY ZERO");
    }

    #[test]
    fn test_comparison() {
        assert_eq!(Operation::less(v("9"), v("10")).unwrap(), v("1"));
        assert_eq!(Operation::less(v("B"), v("A")).unwrap(), v("0"));
        assert_eq!(Operation::equal(v("1.0"), v("1")).unwrap(), v("1"));
        assert_eq!(Operation::equal(v(""), v("")).unwrap(), v("1"));
        assert_eq!(Operation::greater_equal(v("ABC"), v("0")).unwrap(), v("1"));
    }

    #[test]
    fn test_logic() {
        assert_eq!(Operation::and(v("1"), v("5")).unwrap(), v("1"));
        assert_eq!(Operation::or(v("0"), v("0")).unwrap(), v("0"));
        assert_eq!(Operation::not(v("0")).unwrap(), v("1"));
    }
}
