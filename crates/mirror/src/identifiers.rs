//! Newtype domain identifiers.
//!
//! Every concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for
//! example, an [`IssueId`] with a [`CollectionId`] even though both are
//! strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and
// serde conversions that apply the same non-empty rule on deserialization.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier {
                    kind: stringify!($name),
                })
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// An identifier was constructed from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must not be empty")]
pub struct EmptyIdentifier {
    /// Name of the identifier type that was rejected.
    pub kind: &'static str,
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (assigned by the tracker or the repository)
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies an issue in the remote tracker.
    ///
    /// Assigned by the tracker; this tool never creates issues, it only
    /// overwrites the description of existing ones.
    IssueId
}

string_id! {
    /// Identifies a remote collection of issues (a Linear project).
    CollectionId
}

impl CollectionId {
    /// Wraps an identifier from the static collection table, which
    /// [`crate::Collection::new`] has already checked for emptiness.
    pub(crate) fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }
}

string_id! {
    /// A documentation file path as declared by `source_path:` in a metadata
    /// block, e.g. `docs/adr/0001-storage.md`.
    ///
    /// Local documents are matched against this value by exact string
    /// comparison, so it always includes the documentation root.
    SourcePath
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single sync run (one invocation of the CLI).
///
/// Generated fresh for every run and recorded on the root tracing span so all
/// activity from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRunId(Uuid);

impl SyncRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SyncRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_rejects_empty() {
        assert!(IssueId::new("").is_none());
        assert!(SourcePath::new(String::new()).is_none());
    }

    #[test]
    fn test_string_id_round_trips_value() {
        let path = SourcePath::new("docs/a.md").expect("non-empty");
        assert_eq!(path.as_str(), "docs/a.md");
        assert_eq!(path.to_string(), "docs/a.md");
    }

    #[test]
    fn test_string_id_serializes_as_plain_string() {
        let id = IssueId::new("abc-123").expect("non-empty");
        let json = serde_json::to_string(&id).expect("Should serialize");
        assert_eq!(json, "\"abc-123\"");
    }

    #[test]
    fn test_string_id_deserialization_rejects_empty() {
        let err = serde_json::from_str::<SourcePath>("\"\"").unwrap_err();
        assert!(err.to_string().contains("SourcePath must not be empty"));

        let id: IssueId = serde_json::from_str("\"abc-123\"").expect("Should deserialize");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_run_ids_are_distinct() {
        assert_ne!(SyncRunId::new_random(), SyncRunId::new_random());
    }
}
