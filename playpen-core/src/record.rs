//! Key-value records attached to environment steps.
//!
//! A [`Record`] is the side channel of the stepping interface: wrappers use it
//! to carry per-step information (the `info` of a Gym step), and tasks receive
//! one as their auxiliary meta-state.
use crate::error::PlaypenError;
use chrono::prelude::{DateTime, Local};
use std::collections::hash_map::{HashMap, Iter, Keys};

/// A value stored in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single scalar, e.g. a reward or a discount factor.
    Scalar(f32),

    /// A timestamp in the local timezone.
    DateTime(DateTime<Local>),

    /// A flat array of floats.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// String-keyed bag of [`RecordValue`]s.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record holding a single scalar.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair, replacing any previous value for the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// The value stored under `k`, if any.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Keys of the record, in no particular order.
    pub fn keys(&self) -> Keys<'_, String, RecordValue> {
        self.0.keys()
    }

    /// Iterates over the key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Whether the record holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges two records, consuming both. On key collisions the value of
    /// `other` wins.
    pub fn merge(self, other: Record) -> Self {
        Record(self.0.into_iter().chain(other.0).collect())
    }

    /// The scalar stored under `k`.
    pub fn get_scalar(&self, k: &str) -> Result<f32, PlaypenError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(PlaypenError::RecordTypeMismatch {
                key: k.to_string(),
                expected: "Scalar",
            }),
            None => Err(PlaypenError::NoSuchRecordKey(k.to_string())),
        }
    }

    /// The array stored under `k`.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, PlaypenError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(PlaypenError::RecordTypeMismatch {
                key: k.to_string(),
                expected: "Array1",
            }),
            None => Err(PlaypenError::NoSuchRecordKey(k.to_string())),
        }
    }

    /// The string stored under `k`.
    pub fn get_string(&self, k: &str) -> Result<String, PlaypenError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(PlaypenError::RecordTypeMismatch {
                key: k.to_string(),
                expected: "String",
            }),
            None => Err(PlaypenError::NoSuchRecordKey(k.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};

    #[test]
    fn typed_getters() {
        let mut record = Record::from_scalar("discount", 0.9);
        record.insert("note", RecordValue::String("contact".to_string()));
        record.insert("obs", RecordValue::Array1(vec![0.1, 0.2]));

        assert_eq!(record.get_scalar("discount").unwrap(), 0.9);
        assert_eq!(record.get_string("note").unwrap(), "contact");
        assert_eq!(record.get_array1("obs").unwrap(), vec![0.1, 0.2]);

        assert!(record.get_scalar("note").is_err());
        assert!(record.get_scalar("missing").is_err());
    }

    #[test]
    fn merge_prefers_right() {
        let left = Record::from_scalar("x", 1.0);
        let right = Record::from_scalar("x", 2.0);
        assert_eq!(left.merge(right).get_scalar("x").unwrap(), 2.0);
    }

    #[test]
    fn from_slice_collects_pairs() {
        let record = Record::from_slice(&[
            ("discount", RecordValue::Scalar(1.0)),
            ("obs", RecordValue::Array1(vec![0.5])),
        ]);
        assert_eq!(record.keys().count(), 2);
        assert!(record.iter().any(|(k, _)| k == "discount"));
        assert!(!record.is_empty());
        assert!(Record::empty().is_empty());
    }
}
