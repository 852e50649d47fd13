use std::any::Any;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::EntryError;
use crate::format::{FieldMap, Format};
use crate::part::PartType;
use crate::value::{FieldValue, FromFieldValue};

/// An immutable structured record: a format plus one value per part.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    format: Format,
    values: FieldMap,
}

impl Entry {
    /// Build an entry. The value keys must be exactly the format's part names.
    pub fn new(format: Format, values: FieldMap) -> Result<Self, EntryError> {
        let expected = format.part_names().len();
        if values.len() != expected {
            return Err(EntryError::ValueCount {
                expected,
                actual: values.len(),
            });
        }
        if let Some(unknown) = values.keys().find(|k| !format.parts().contains(k)) {
            return Err(EntryError::UnknownPart(unknown.clone()));
        }

        Ok(Self { format, values })
    }

    /// Build an entry from `(name, value)` pairs.
    pub fn from_pairs<K, I>(format: Format, pairs: I) -> Result<Self, EntryError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Entry::new(format, values)
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    /// Raw stored value, untyped.
    pub fn raw(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Typed read of a field, with no check of the declared part type.
    pub fn get<T: FromFieldValue>(&self, name: &str) -> Result<T, EntryError> {
        let value = self.lookup(name)?;
        T::from_field(value).ok_or_else(|| EntryError::BadCast {
            field: name.to_string(),
            expected: T::EXPECTED,
            found: value.kind(),
        })
    }

    /// Downcast a custom (`Other`) value.
    pub fn get_custom<T: Any + Clone>(&self, name: &str) -> Result<T, EntryError> {
        let value = self.lookup(name)?;
        value.as_custom::<T>().cloned().ok_or_else(|| EntryError::BadCast {
            field: name.to_string(),
            expected: std::any::type_name::<T>(),
            found: value.kind(),
        })
    }

    pub fn get_string(&self, name: &str) -> Result<String, EntryError> {
        self.get_declared(name, PartType::Text)
    }

    pub fn get_integer(&self, name: &str) -> Result<i64, EntryError> {
        self.get_declared(name, PartType::Integer)
    }

    pub fn get_float(&self, name: &str) -> Result<f32, EntryError> {
        self.get_declared(name, PartType::Float)
    }

    pub fn get_double(&self, name: &str) -> Result<f64, EntryError> {
        self.get_declared(name, PartType::Float)
    }

    pub fn get_datetime(&self, name: &str) -> Result<NaiveDateTime, EntryError> {
        self.get_declared(name, PartType::DateTime)
    }

    pub fn get_date(&self, name: &str) -> Result<NaiveDate, EntryError> {
        self.get_declared(name, PartType::DateTime)
    }

    pub fn get_time(&self, name: &str) -> Result<NaiveTime, EntryError> {
        self.get_declared(name, PartType::DateTime)
    }

    fn get_declared<T: FromFieldValue>(&self, name: &str, expected: PartType) -> Result<T, EntryError> {
        let declared = self
            .format
            .part(name)
            .map_err(|_| EntryError::MissingField(name.to_string()))?
            .part_type();
        if declared != expected {
            return Err(EntryError::DeclaredType {
                field: name.to_string(),
                declared,
                expected,
            });
        }
        self.get(name)
    }

    fn lookup(&self, name: &str) -> Result<&FieldValue, EntryError> {
        self.values
            .get(name)
            .ok_or_else(|| EntryError::MissingField(name.to_string()))
    }
}

/// Serializes as a map in the format's part order.
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for name in self.format.part_names() {
            if let Some(value) = self.values.get(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{Part, PartSet};
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    struct Level(u8);

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "L{}", self.0)
        }
    }

    fn format() -> Format {
        let parts = PartSet::builder()
            .part("name", Part::text())
            .part("count", Part::integer())
            .part("ratio", Part::float())
            .part(
                "level",
                Part::new(
                    PartType::Other,
                    |_| Ok(FieldValue::custom(Level(1))),
                    |v| Ok(v.map(|v| v.to_string()).unwrap_or_default()),
                ),
            )
            .build()
            .unwrap();
        Format::delimited(',', parts)
    }

    fn entry() -> Entry {
        Entry::from_pairs(
            format(),
            [
                ("name", FieldValue::text("disk")),
                ("count", FieldValue::Integer(3)),
                ("ratio", FieldValue::Float(0.5)),
                ("level", FieldValue::custom(Level(2))),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_typed_getters() {
        let e = entry();
        assert_eq!(e.get_string("name").unwrap(), "disk");
        assert_eq!(e.get_integer("count").unwrap(), 3);
        assert_eq!(e.get_double("ratio").unwrap(), 0.5);
        assert_eq!(e.get_float("ratio").unwrap(), 0.5f32);
        assert_eq!(e.get_custom::<Level>("level").unwrap(), Level(2));
        assert_eq!(e.get::<i64>("count").unwrap(), 3);
    }

    #[test]
    fn test_missing_field() {
        let e = entry();
        assert!(matches!(e.get::<String>("nope"), Err(EntryError::MissingField(_))));
        assert!(matches!(e.get_string("nope"), Err(EntryError::MissingField(_))));
        assert!(e.raw("nope").is_none());
    }

    #[test]
    fn test_bad_cast() {
        let e = entry();
        assert!(matches!(
            e.get::<String>("count"),
            Err(EntryError::BadCast { expected: "text", found: "integer", .. })
        ));
        assert!(matches!(e.get_custom::<String>("level"), Err(EntryError::BadCast { .. })));
    }

    #[test]
    fn test_declared_type_checked_before_cast() {
        let e = entry();
        assert!(matches!(
            e.get_integer("name"),
            Err(EntryError::DeclaredType {
                declared: PartType::Text,
                expected: PartType::Integer,
                ..
            })
        ));
        assert!(matches!(e.get_datetime("count"), Err(EntryError::DeclaredType { .. })));
    }

    #[test]
    fn test_value_count_enforced() {
        let result = Entry::from_pairs(format(), [("name", FieldValue::text("x"))]);
        assert!(matches!(result, Err(EntryError::ValueCount { expected: 4, actual: 1 })));
    }

    #[test]
    fn test_value_names_enforced() {
        let result = Entry::from_pairs(
            format(),
            [
                ("name", FieldValue::text("disk")),
                ("count", FieldValue::Integer(3)),
                ("ratio", FieldValue::Float(0.5)),
                ("severity", FieldValue::Null),
            ],
        );
        assert!(matches!(result, Err(EntryError::UnknownPart(n)) if n == "severity"));
    }

    #[test]
    fn test_serialize_in_part_order() {
        let json = serde_json::to_string(&entry()).unwrap();
        assert_eq!(json, r#"{"name":"disk","count":3,"ratio":0.5,"level":"L2"}"#);
    }
}
