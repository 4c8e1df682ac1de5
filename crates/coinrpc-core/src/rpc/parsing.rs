//! Field-by-field coercion from generic JSON into typed values.
//!
//! Every helper takes the dotted path of the field it is reading so that
//! `MissingField` / `TypeMismatch` errors name the exact key, e.g.
//! `gettransaction.details[1].fee`.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Typed view over one JSON object, reading named keys under a path prefix.
pub(super) struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    context: String,
}

impl<'a> FieldReader<'a> {
    pub(super) fn new(value: &'a Value, context: impl Into<String>) -> Result<Self, CoreError> {
        let context = context.into();
        let object = value
            .as_object()
            .ok_or_else(|| CoreError::mismatch(context.as_str(), "object", value))?;
        Ok(Self { object, context })
    }

    fn path(&self, key: &str) -> String {
        format!("{}.{key}", self.context)
    }

    fn required(&self, key: &str) -> Result<&'a Value, CoreError> {
        self.object
            .get(key)
            .ok_or_else(|| CoreError::missing(self.path(key)))
    }

    pub(super) fn string(&self, key: &str) -> Result<String, CoreError> {
        parse_string(self.required(key)?, &self.path(key))
    }

    pub(super) fn float(&self, key: &str) -> Result<f64, CoreError> {
        parse_f64(self.required(key)?, &self.path(key))
    }

    pub(super) fn integer<T>(&self, key: &str) -> Result<T, CoreError>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        parse_integer(self.required(key)?, &self.path(key))
    }

    pub(super) fn boolean(&self, key: &str) -> Result<bool, CoreError> {
        parse_bool(self.required(key)?, &self.path(key))
    }

    /// Absent and `null` both read as `None`; any other non-bool is a mismatch.
    pub(super) fn optional_boolean(&self, key: &str) -> Result<Option<bool>, CoreError> {
        match self.object.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_bool(value, &self.path(key)).map(Some),
        }
    }

    pub(super) fn list<T>(
        &self,
        key: &str,
        parse_item: impl Fn(&Value, String) -> Result<T, CoreError>,
    ) -> Result<Vec<T>, CoreError> {
        parse_list(self.required(key)?, &self.path(key), parse_item)
    }
}

/// Parse a JSON array element-wise, giving each element an indexed path.
pub(super) fn parse_list<T>(
    value: &Value,
    field: &str,
    parse_item: impl Fn(&Value, String) -> Result<T, CoreError>,
) -> Result<Vec<T>, CoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| CoreError::mismatch(field, "array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(item, format!("{field}[{index}]")))
        .collect()
}

/// Strings are taken verbatim; numbers and booleans render as their JSON text.
pub(super) fn parse_string(value: &Value, field: &str) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(_) | Value::Bool(_) => Ok(value.to_string()),
        _ => Err(CoreError::mismatch(field, "string", value)),
    }
}

pub(super) fn parse_bool(value: &Value, field: &str) -> Result<bool, CoreError> {
    value
        .as_bool()
        .ok_or_else(|| CoreError::mismatch(field, "bool", value))
}

/// Any JSON number, or a string holding a finite decimal number.
pub(super) fn parse_f64(value: &Value, field: &str) -> Result<f64, CoreError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    };
    parsed.ok_or_else(|| CoreError::mismatch(field, "number", value))
}

/// Integers, integral floats (`100.0`) and integer strings, range-checked
/// against `T`.
pub(super) fn parse_integer<T>(value: &Value, field: &str) -> Result<T, CoreError>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let mismatch = || CoreError::mismatch(field, "integer", value);
    let out_of_range = || CoreError::mismatch(field, "in-range integer", value);

    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return T::try_from(u).map_err(|_| out_of_range());
            }
            if let Some(i) = n.as_i64() {
                return T::try_from(i).map_err(|_| out_of_range());
            }
            let f = n.as_f64().ok_or_else(mismatch)?;
            integral_from_f64(f)
                .ok_or_else(mismatch)
                .and_then(|i| T::try_from(i).map_err(|_| out_of_range()))
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(u) = s.parse::<u64>() {
                return T::try_from(u).map_err(|_| out_of_range());
            }
            let i = s.parse::<i64>().map_err(|_| mismatch())?;
            T::try_from(i).map_err(|_| out_of_range())
        }
        _ => Err(mismatch()),
    }
}

fn integral_from_f64(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; the exclusive bound keeps the
    // cast lossless.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}
