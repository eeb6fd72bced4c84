//! Property values and literal coercion
//!
//! A statement object is read back either as a literal value or as a
//! reference to another resource (a nested entity with its own subject).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::rdf::types::xsd;
use crate::rdf::{Literal, NamedNode, RdfObject, RdfSubject};

/// Declared value type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Text,
    Date,
    Integer,
    Long,
    Boolean,
    Float,
    Double,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Text => "text",
            ValueType::Date => "date",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::Boolean => "boolean",
            ValueType::Float => "float",
            ValueType::Double => "double",
        }
    }

    /// Datatype IRI written for coerced literals, None for plain strings
    fn datatype(&self) -> Option<&'static str> {
        match self {
            ValueType::String | ValueType::Text => None,
            ValueType::Date => Some(xsd::DATE),
            ValueType::Integer => Some(xsd::INTEGER),
            ValueType::Long => Some(xsd::LONG),
            ValueType::Boolean => Some(xsd::BOOLEAN),
            ValueType::Float => Some(xsd::FLOAT),
            ValueType::Double => Some(xsd::DOUBLE),
        }
    }

    /// Type implied by a literal datatype when nothing was declared
    fn from_datatype(datatype: &str) -> Option<ValueType> {
        match datatype {
            xsd::DATE => Some(ValueType::Date),
            xsd::INTEGER => Some(ValueType::Integer),
            xsd::LONG => Some(ValueType::Long),
            xsd::BOOLEAN => Some(ValueType::Boolean),
            xsd::FLOAT => Some(ValueType::Float),
            xsd::DOUBLE => Some(ValueType::Double),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A literal could not be converted to its declared type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot coerce {value:?} to {value_type}")]
pub struct CoercionError {
    pub value: String,
    pub value_type: ValueType,
}

/// Reference to a resource used as a property value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef(RdfSubject);

impl ResourceRef {
    /// Reference an IRI (or `_:id` blank node)
    pub fn new(subject: &str) -> crate::rdf::RdfResult<Self> {
        RdfSubject::parse(subject).map(Self)
    }

    /// Subject identity of the referenced resource
    pub fn rdf_subject(&self) -> String {
        self.0.identifier()
    }

    pub fn as_subject(&self) -> &RdfSubject {
        &self.0
    }
}

impl From<RdfSubject> for ResourceRef {
    fn from(subject: RdfSubject) -> Self {
        Self(subject)
    }
}

/// Property value read from, or written to, a statement object
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Date(NaiveDate),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Resource(ResourceRef),
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PropertyValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceRef> {
        match self {
            PropertyValue::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Read a statement object, coercing literals to `value_type` when given.
    ///
    /// Without a declared type, typed literals (`xsd:date`, `xsd:integer`, ...)
    /// come back as their natural value and everything else as a string.
    pub fn from_object(object: &RdfObject, value_type: Option<ValueType>) -> Result<Self, CoercionError> {
        match object {
            RdfObject::NamedNode(_) | RdfObject::BlankNode(_) => match object.as_subject() {
                Some(subject) => Ok(PropertyValue::Resource(ResourceRef(subject))),
                None => Ok(PropertyValue::String(object.lexical())),
            },
            RdfObject::Literal(literal) => {
                let target = value_type.or_else(|| ValueType::from_datatype(literal.datatype()));
                match target {
                    Some(t) => coerce(literal.value(), t),
                    None => Ok(PropertyValue::String(literal.value().to_string())),
                }
            }
        }
    }

    /// Uncoerced reading of a statement object
    pub fn raw(object: &RdfObject) -> Self {
        match object.as_subject() {
            Some(subject) => PropertyValue::Resource(ResourceRef(subject)),
            None => PropertyValue::String(object.lexical()),
        }
    }

    /// Write this value as a statement object of the declared type
    pub fn to_object(&self, value_type: Option<ValueType>) -> Result<RdfObject, CoercionError> {
        if let PropertyValue::Resource(r) = self {
            return Ok(r.0.clone().into());
        }
        let value = match value_type {
            Some(t) => match self {
                PropertyValue::String(s) => coerce(s, t)?,
                other => coerce(&other.to_string(), t)?,
            },
            None => self.clone(),
        };
        let lexical = value.to_string();
        let datatype = match (&value, value_type) {
            (PropertyValue::String(_), _) => None,
            (_, Some(t)) => t.datatype(),
            (PropertyValue::Date(_), None) => Some(xsd::DATE),
            (PropertyValue::Integer(_), None) => Some(xsd::INTEGER),
            (PropertyValue::Float(_), None) => Some(xsd::DOUBLE),
            (PropertyValue::Boolean(_), None) => Some(xsd::BOOLEAN),
            (PropertyValue::Resource(_), None) => None,
        };
        let literal = match datatype.map(NamedNode::new) {
            Some(Ok(dt)) => Literal::new_typed_literal(lexical, dt),
            Some(Err(_)) | None => Literal::new_simple_literal(lexical),
        };
        Ok(literal.into())
    }

    /// Index form: ISO-8601 timestamps for dates, the display string otherwise
    pub fn to_index_string(&self) -> String {
        match self {
            PropertyValue::Date(d) => format!("{}T00:00:00Z", d.format("%Y-%m-%d")),
            other => other.to_string(),
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Date(_) => "Date",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Resource(_) => "Resource",
        }
    }
}

fn coerce(lexical: &str, value_type: ValueType) -> Result<PropertyValue, CoercionError> {
    let fail = || CoercionError {
        value: lexical.to_string(),
        value_type,
    };
    let trimmed = lexical.trim();
    match value_type {
        ValueType::String | ValueType::Text => Ok(PropertyValue::String(lexical.to_string())),
        ValueType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
            .map(PropertyValue::Date)
            .map_err(|_| fail()),
        ValueType::Integer | ValueType::Long => trimmed
            .parse::<i64>()
            .map(PropertyValue::Integer)
            .map_err(|_| fail()),
        ValueType::Float | ValueType::Double => trimmed
            .parse::<f64>()
            .map(PropertyValue::Float)
            .map_err(|_| fail()),
        ValueType::Boolean => match trimmed {
            "true" | "1" => Ok(PropertyValue::Boolean(true)),
            "false" | "0" => Ok(PropertyValue::Boolean(false)),
            _ => Err(fail()),
        },
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Resource(r) => f.write_str(&r.rdf_subject()),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<NaiveDate> for PropertyValue {
    fn from(d: NaiveDate) -> Self {
        PropertyValue::Date(d)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<ResourceRef> for PropertyValue {
    fn from(r: ResourceRef) -> Self {
        PropertyValue::Resource(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_typed_literal_reads_as_date_without_declaration() {
        let object: RdfObject =
            Literal::new_typed_literal("2010-12-31", NamedNode::new(xsd::DATE).unwrap()).into();
        let value = PropertyValue::from_object(&object, None).unwrap();
        assert_eq!(value, PropertyValue::Date(date(2010, 12, 31)));
    }

    #[test]
    fn test_plain_literal_coerced_by_declared_type() {
        let object: RdfObject = Literal::new_simple_literal("2009-10-10").into();
        assert_eq!(
            PropertyValue::from_object(&object, Some(ValueType::Date)).unwrap(),
            PropertyValue::Date(date(2009, 10, 10))
        );
        assert_eq!(
            PropertyValue::from_object(&object, None).unwrap(),
            PropertyValue::String("2009-10-10".to_string())
        );
    }

    #[test]
    fn test_coercion_failure() {
        let object: RdfObject = Literal::new_simple_literal("not a date").into();
        let err = PropertyValue::from_object(&object, Some(ValueType::Date)).unwrap_err();
        assert_eq!(err.value, "not a date");
        assert_eq!(err.value_type, ValueType::Date);
        assert_eq!(PropertyValue::raw(&object), PropertyValue::from("not a date"));
    }

    #[test]
    fn test_write_back_round_trips() {
        let value = PropertyValue::Date(date(2012, 3, 4));
        let object = value.to_object(Some(ValueType::Date)).unwrap();
        assert_eq!(object.to_string(), "\"2012-03-04\"^^<http://www.w3.org/2001/XMLSchema#date>");
        assert_eq!(PropertyValue::from_object(&object, Some(ValueType::Date)).unwrap(), value);

        let string_date = PropertyValue::from("2012-03-04").to_object(Some(ValueType::Date)).unwrap();
        assert_eq!(string_date, object);
        assert!(PropertyValue::from("March").to_object(Some(ValueType::Date)).is_err());
    }

    #[test]
    fn test_non_string_values_coerced_on_write() {
        let widened = PropertyValue::Integer(5).to_object(Some(ValueType::Float)).unwrap();
        assert_eq!(
            PropertyValue::from_object(&widened, Some(ValueType::Float)).unwrap(),
            PropertyValue::Float(5.0)
        );
        let err = PropertyValue::Integer(5).to_object(Some(ValueType::Date)).unwrap_err();
        assert_eq!(err.value_type, ValueType::Date);
        assert!(PropertyValue::Float(1.5).to_object(Some(ValueType::Integer)).is_err());
    }

    #[test]
    fn test_resources() {
        let object: RdfObject = NamedNode::new("http://google.com/").unwrap().into();
        let value = PropertyValue::from_object(&object, None).unwrap();
        assert_eq!(value.as_resource().unwrap().rdf_subject(), "http://google.com/");
        assert_eq!(value.to_object(None).unwrap(), object);
    }

    #[test]
    fn test_index_string() {
        assert_eq!(PropertyValue::Date(date(2009, 10, 10)).to_index_string(), "2009-10-10T00:00:00Z");
        assert_eq!(PropertyValue::Date(date(2009, 10, 10)).to_string(), "2009-10-10");
        assert_eq!(PropertyValue::from("fake-title").to_index_string(), "fake-title");
    }
}
