//! Structured log fields.
//!
//! A [`Field`] is one named member of a structured log entry: a name plus a
//! JSON payload. Callers build fields at the log call site; the metadata
//! decorator appends at most one more (see [`Context::decorate`]).
//!
//! [`Context::decorate`]: crate::Context::decorate

use std::fmt::Display;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::FieldError;

/// One named, structured member of a log entry.
///
/// The payload is an arbitrary JSON value. Most call sites want
/// [`Field::string`]; values with richer structure go through
/// [`Field::object`], which serializes anything implementing
/// [`serde::Serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Value,
}

impl Field {
    /// Creates a field from a name and a ready-made JSON value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a string-valued field.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::String(value.into()))
    }

    /// Creates a string-valued field by rendering `value` through its
    /// [`Display`] implementation.
    pub fn display(name: impl Into<String>, value: &impl Display) -> Self {
        Self::new(name, Value::String(value.to_string()))
    }

    /// Creates a field by serializing an arbitrary value.
    ///
    /// This is the generic structured-encoder entry point. It fails only if
    /// the value itself cannot be represented as JSON (for example a map
    /// with non-string keys, or a non-finite float).
    pub fn object<T>(name: impl Into<String>, value: &T) -> Result<Self, FieldError>
    where
        T: Serialize + ?Sized,
    {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => Ok(Self { name, value }),
            Err(source) => Err(FieldError::Serialize { name, source }),
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field payload.
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the field, returning its name and payload.
    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

impl Serialize for Field {
    /// A field serializes as a one-member object, `{"name": payload}`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.value)?;
        map.end()
    }
}
