use super::Val;
use crate::error;
use crate::lang::{Error, Ident};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// Most slots a single array may hold.
const MAX_ARRAY_LEN: usize = 1 << 20;

#[derive(Debug)]
struct Array {
    dim1: usize,
    dim2: usize,
    values: Vec<Val>,
}

impl Array {
    fn new(dim1: usize, dim2: usize) -> Array {
        Array {
            dim1,
            dim2,
            values: vec![Val::default(); dim1 * dim2],
        }
    }

    fn index(&self, i1: i64, i2: i64) -> Result<usize> {
        if i1 < 1 || i2 < 1 || i1 as usize > self.dim1 || i2 as usize > self.dim2 {
            return Err(error!(SubscriptOutOfRange));
        }
        Ok((i2 as usize - 1) * self.dim1 + (i1 as usize - 1))
    }
}

/// ## Variable memory
///
/// Every variable is a dim1 by dim2 array of text slots. Scalars are 1x1.
/// Subscripts are 1-based.
#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Ident, Array>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    fn default_val(ident: &Ident) -> Val {
        if ident.is_string() {
            Val::default()
        } else {
            Val::from("0")
        }
    }

    pub fn fetch(&self, ident: &Ident, i1: i64, i2: i64) -> Result<Val> {
        match self.vars.get(ident) {
            Some(array) => {
                let index = array.index(i1, i2)?;
                let val = &array.values[index];
                if val.as_str().is_empty() {
                    Ok(Var::default_val(ident))
                } else {
                    Ok(val.clone())
                }
            }
            None => {
                if i1 != 1 || i2 != 1 {
                    return Err(error!(SubscriptOutOfRange));
                }
                Ok(Var::default_val(ident))
            }
        }
    }

    pub fn store(&mut self, ident: &Ident, i1: i64, i2: i64, value: Val) -> Result<()> {
        if !self.vars.contains_key(ident) {
            if i1 != 1 || i2 != 1 {
                return Err(error!(SubscriptOutOfRange));
            }
            if self.vars.len() >= u16::max_value() as usize {
                return Err(error!(OutOfMemory));
            }
            self.vars.insert(ident.clone(), Array::new(1, 1));
        }
        match self.vars.get_mut(ident) {
            Some(array) => {
                let index = array.index(i1, i2)?;
                array.values[index] = value;
                Ok(())
            }
            None => Err(error!(InternalError)),
        }
    }

    /// Extents below one are raised to one. Any prior binding is replaced.
    pub fn dimension(&mut self, ident: &Ident, d1: i64, d2: i64) -> Result<()> {
        let dim1 = d1.max(1) as usize;
        let dim2 = d2.max(1) as usize;
        match dim1.checked_mul(dim2) {
            Some(len) if len <= MAX_ARRAY_LEN => {}
            _ => return Err(error!(OutOfMemory; "ARRAY TOO LARGE")),
        }
        self.vars.insert(ident.clone(), Array::new(dim1, dim2));
        Ok(())
    }
}
