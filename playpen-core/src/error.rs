//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// Stepping paths deliberately have no error taxonomy: a bad layer name or a
/// malformed action surfaces as a panic from the underlying lookup or array
/// operation, matching the keyed-lookup semantics the plugins are written
/// against.
#[derive(Error, Debug)]
pub enum PlaypenError {
    /// A record lookup referenced a key that was never inserted.
    #[error("no such record key: {0}")]
    NoSuchRecordKey(String),

    /// A record value had a different type than the getter expected.
    #[error("record value {key} is not a {expected}")]
    RecordTypeMismatch {
        /// Key of the offending value.
        key: String,
        /// Type the getter expected.
        expected: &'static str,
    },
}
