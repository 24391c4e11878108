// Author: Dustin Pilgrim
// License: MIT

use crate::ast::Block;
use crate::{BrikError, Value};

fn expected(what: &str, value: &Value, code: u32) -> BrikError {
    BrikError::type_error(
        format!("Expected {}, got {}", what, value.kind()),
        Some(format!("Use a {} value in your game file", what).as_str()),
        code,
    )
}

impl TryFrom<Value> for String {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(expected("string", &other, 401)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(expected("boolean", &other, 404)),
        }
    }
}

/// Integers convert losslessly; floats are accepted where a number is wanted.
impl TryFrom<Value> for f64 {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(n) => Ok(n),
            Value::Int(n) => Ok(n as f64),
            other => Err(expected("number", &other, 402)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|n| n as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(n),
            other => Err(expected("integer", &other, 403)),
        }
    }
}

macro_rules! impl_int_conversion {
    ($($ty:ty),*) => {$(
        impl TryFrom<Value> for $ty {
            type Error = BrikError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                let n = i64::try_from(value)?;
                <$ty>::try_from(n).map_err(|_| {
                    BrikError::type_error(
                        format!("Number {} out of range for {}", n, stringify!($ty)),
                        Some(format!(
                            "Use a number between {} and {}",
                            <$ty>::MIN,
                            <$ty>::MAX
                        ).as_str()),
                        407,
                    )
                })
            }
        }
    )*};
}

impl_int_conversion!(i32, u32, u16, u8, usize);

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = BrikError>,
{
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(expected("list", &other, 405)),
        }
    }
}

impl TryFrom<Value> for Block {
    type Error = BrikError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Block(block) => Ok(block),
            other => Err(expected("block", &other, 406)),
        }
    }
}
