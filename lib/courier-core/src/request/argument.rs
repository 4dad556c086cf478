use serde::Serialize;

use crate::CourierError;
use crate::contract::TypeRef;

/// A call-time argument, captured as a JSON value along with its runtime type.
///
/// # Examples
///
/// ```rust
/// use courier_core::Argument;
///
/// # fn example() -> Result<(), courier_core::CourierError> {
/// let term = Argument::new("rust")?;
/// assert_eq!(term.value(), &serde_json::json!("rust"));
/// assert_eq!(term.type_name().as_str(), "str");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    value: serde_json::Value,
    type_name: TypeRef,
}

impl Argument {
    /// Captures a serializable value.
    ///
    /// Non-finite floats (`NaN`, infinities) are captured as `null`, like
    /// `serde_json` does, and so have no query or path form.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::ArgumentSerialization`] if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn new<T>(value: &T) -> Result<Self, CourierError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        Ok(Self {
            value,
            type_name: TypeRef::of::<T>(),
        })
    }

    /// Wraps an already captured JSON value.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self {
            value,
            type_name: TypeRef::of::<serde_json::Value>(),
        }
    }

    /// The captured value.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Runtime type of the original value.
    pub fn type_name(&self) -> &TypeRef {
        &self.type_name
    }

    pub(crate) fn into_value(self) -> serde_json::Value {
        self.value
    }

    /// Converts the value to its query string representation.
    ///
    /// Scalars give a single value, arrays of scalars give one value per item
    /// (form style: `?tag=a&tag=b`). Returns `None` for `null`, objects, nested
    /// arrays and empty arrays, which would leave no pair in the query.
    pub(crate) fn to_query_values(&self) -> Option<Vec<String>> {
        match &self.value {
            serde_json::Value::Array(items) if items.is_empty() => None,
            serde_json::Value::Array(items) => items.iter().map(scalar_to_string).collect(),
            value => scalar_to_string(value).map(|text| vec![text]),
        }
    }
}

/// Converts a scalar JSON value to a string, `None` for `null` and composite values.
pub(crate) fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}
