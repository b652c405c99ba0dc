use super::Val;
use crate::error;
use crate::lang::{ast, ast::Function as F, Error};
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// ## Built-in functions
pub struct Function {}

impl Function {
    pub fn call(func: ast::Function, val: Val) -> Result<Val> {
        match func {
            F::Abs => Val::from_number(val.to_f64().abs()),
            F::Asc => Function::asc(val),
            F::Atn => Val::from_number(val.to_f64().atan()),
            F::Chr => Function::chr(val),
            F::Clog => Function::logarithm(val, f64::log10),
            F::Cos => Val::from_number(val.to_f64().cos()),
            F::Exp => Val::from_number(val.to_f64().exp()),
            F::Int => Val::from_number(val.to_f64().trunc()),
            F::Len => Val::from_number(val.as_str().chars().count() as f64),
            F::Log => Function::logarithm(val, f64::ln),
            F::Rnd => Val::from_number(rand::thread_rng().gen::<f64>()),
            F::Sgn => Function::sgn(val),
            F::Sin => Val::from_number(val.to_f64().sin()),
            F::Sqr => Function::sqr(val),
            F::Str => Val::from_number(val.to_f64()),
            F::Val => Val::from_number(val.to_f64()),
        }
    }

    fn asc(val: Val) -> Result<Val> {
        match val.as_str().chars().next() {
            Some(ch) => Val::from_number(ch as u32 as f64),
            None => Err(error!(IllegalFunctionCall; "EMPTY STRING")),
        }
    }

    fn chr(val: Val) -> Result<Val> {
        let code = val.to_i64();
        if !(0..=255).contains(&code) {
            return Err(error!(IllegalFunctionCall));
        }
        Ok(Val::new((code as u8 as char).to_string()))
    }

    fn logarithm(val: Val, log: fn(f64) -> f64) -> Result<Val> {
        let n = val.to_f64();
        if n <= 0.0 {
            return Err(error!(IllegalFunctionCall));
        }
        Val::from_number(log(n))
    }

    fn sgn(val: Val) -> Result<Val> {
        let n = val.to_f64();
        Val::from_number(if n > 0.0 {
            1.0
        } else if n < 0.0 {
            -1.0
        } else {
            0.0
        })
    }

    fn sqr(val: Val) -> Result<Val> {
        let n = val.to_f64();
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall));
        }
        Val::from_number(n.sqrt())
    }
}
