use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};

use super::coercion::{format_date_time, format_time_span};

/// Dynamically typed value passed to and returned from functions
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Absent value
    Null,
    /// 32-bit integer value
    Int32(i32),
    /// 64-bit integer value
    Int64(i64),
    /// 32-bit floating-point value
    Float32(f32),
    /// 64-bit floating-point value
    Float64(f64),
    /// String value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Calendar date and time of day, without time zone
    DateTime(NaiveDateTime),
    /// Signed duration
    TimeSpan(TimeDelta),
    /// Array of values (reference-counted)
    Array(Arc<Vec<Variant>>),
}

/// Tag of a [`Variant`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    /// [`Variant::Null`]
    Null,
    /// [`Variant::Int32`]
    Int32,
    /// [`Variant::Int64`]
    Int64,
    /// [`Variant::Float32`]
    Float32,
    /// [`Variant::Float64`]
    Float64,
    /// [`Variant::String`]
    String,
    /// [`Variant::Boolean`]
    Boolean,
    /// [`Variant::DateTime`]
    DateTime,
    /// [`Variant::TimeSpan`]
    TimeSpan,
    /// [`Variant::Array`]
    Array,
}

impl VariantType {
    /// Type name as a string
    pub fn name(&self) -> &'static str {
        match self {
            VariantType::Null => "null",
            VariantType::Int32 => "int32",
            VariantType::Int64 => "int64",
            VariantType::Float32 => "float32",
            VariantType::Float64 => "float64",
            VariantType::String => "string",
            VariantType::Boolean => "boolean",
            VariantType::DateTime => "datetime",
            VariantType::TimeSpan => "timespan",
            VariantType::Array => "array",
        }
    }

    /// Integer and floating-point tags
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            VariantType::Int32 | VariantType::Int64 | VariantType::Float32 | VariantType::Float64
        )
    }

    /// Floating-point tags
    pub fn is_float(&self) -> bool {
        matches!(self, VariantType::Float32 | VariantType::Float64)
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Variant {
    /// Creates an array value from a vector of values
    pub fn array(values: Vec<Variant>) -> Self {
        Variant::Array(Arc::new(values))
    }

    /// Creates a string value
    pub fn string(value: impl Into<String>) -> Self {
        Variant::String(value.into())
    }

    /// Tag of this value
    pub fn variant_type(&self) -> VariantType {
        match self {
            Variant::Null => VariantType::Null,
            Variant::Int32(_) => VariantType::Int32,
            Variant::Int64(_) => VariantType::Int64,
            Variant::Float32(_) => VariantType::Float32,
            Variant::Float64(_) => VariantType::Float64,
            Variant::String(_) => VariantType::String,
            Variant::Boolean(_) => VariantType::Boolean,
            Variant::DateTime(_) => VariantType::DateTime,
            Variant::TimeSpan(_) => VariantType::TimeSpan,
            Variant::Array(_) => VariantType::Array,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.variant_type().name()
    }

    /// Returns true for [`Variant::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Returns true for integer and floating-point values
    pub fn is_numeric(&self) -> bool {
        self.variant_type().is_numeric()
    }

    /// Elements of an array value
    pub fn as_array(&self) -> Option<&[Variant]> {
        match self {
            Variant::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Canonical text of the value; the string coercion of every type
impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Null => Ok(()),
            Variant::Int32(n) => write!(f, "{}", n),
            Variant::Int64(n) => write!(f, "{}", n),
            Variant::Float32(n) => write!(f, "{}", n),
            Variant::Float64(n) => write!(f, "{}", n),
            Variant::String(s) => f.write_str(s),
            Variant::Boolean(b) => write!(f, "{}", b),
            Variant::DateTime(dt) => f.write_str(&format_date_time(dt)),
            Variant::TimeSpan(ts) => f.write_str(&format_time_span(ts)),
            Variant::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::Int32(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Int64(value)
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Variant::Float32(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Float64(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Boolean(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<NaiveDateTime> for Variant {
    fn from(value: NaiveDateTime) -> Self {
        Variant::DateTime(value)
    }
}

impl From<TimeDelta> for Variant {
    fn from(value: TimeDelta) -> Self {
        Variant::TimeSpan(value)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(values: Vec<Variant>) -> Self {
        Variant::array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_type_names() {
        assert_eq!(Variant::Null.type_name(), "null");
        assert_eq!(Variant::Int32(1).type_name(), "int32");
        assert_eq!(Variant::Float64(2.5).type_name(), "float64");
        assert_eq!(Variant::string("x").type_name(), "string");
        assert_eq!(Variant::array(vec![]).type_name(), "array");
        assert!(Variant::Int64(3).is_numeric());
        assert!(!Variant::Boolean(true).is_numeric());
        assert!(VariantType::Float32.is_float());
    }

    #[test]
    fn test_equality_is_tag_sensitive() {
        assert_eq!(Variant::Int32(1), Variant::Int32(1));
        assert_ne!(Variant::Int32(1), Variant::Int64(1));
        assert_eq!(Variant::from("a"), Variant::String("a".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Variant::Null.to_string(), "");
        assert_eq!(Variant::Float64(2.5).to_string(), "2.5");
        assert_eq!(Variant::Boolean(false).to_string(), "false");
        let arr = Variant::array(vec![Variant::Int32(1), Variant::string("b")]);
        assert_eq!(arr.to_string(), "[1, b]");

        let dt = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(Variant::DateTime(dt).to_string(), "2024-02-29T13:05:09");
        assert_eq!(
            Variant::TimeSpan(TimeDelta::seconds(90)).to_string(),
            "00:01:30"
        );
    }

    #[test]
    fn test_as_array() {
        let arr = Variant::from(vec![Variant::Int64(1)]);
        assert_eq!(arr.as_array().map(|a| a.len()), Some(1));
        assert!(Variant::Null.as_array().is_none());
    }
}
