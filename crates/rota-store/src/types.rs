//! Todo domain types and boundary validation.
//!
//! [`TodoCreate`] and [`TodoPatch`] are the validated input shapes;
//! [`Todo`] is the full record with storage-assigned fields. Validation
//! happens at the boundary, before any storage access — the same length and
//! range bounds are mirrored as CHECK constraints in the schema.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum character length for `name` and `description`.
pub const MIN_TEXT_LEN: usize = 3;
/// Maximum character length for `name` and `description`.
pub const MAX_TEXT_LEN: usize = 200;

/// Todo priority. Lower numeric value means higher urgency; the integer
/// mapping (HIGH=1, MEDIUM=2, LOW=3) is the wire and storage representation
/// and the sort key, so it must not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    /// Most urgent.
    High = 1,
    /// Middle urgency.
    Medium = 2,
    /// Least urgent. The default when omitted on creation.
    #[default]
    Low = 3,
}

impl Priority {
    /// The storage/wire integer for this level.
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl From<Priority> for i64 {
    fn from(p: Priority) -> Self {
        p.as_i64()
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(ValidationError::InvalidPriority(other)),
        }
    }
}

/// A stored todo record, including storage-assigned fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Storage-assigned identifier. Monotonic, never reused.
    pub id: i64,
    /// Short name, 3–200 characters.
    pub name: String,
    /// Description, 3–200 characters.
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Creation timestamp (RFC 3339 UTC). Immutable.
    pub created_at: String,
    /// Last-mutation timestamp (RFC 3339 UTC).
    pub updated_at: String,
}

/// Input shape for creating a todo.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoCreate {
    /// Short name, 3–200 characters.
    pub name: String,
    /// Description, 3–200 characters.
    pub description: String,
    /// Priority level; LOW when omitted.
    #[serde(default)]
    pub priority: Priority,
}

impl TodoCreate {
    /// Check the length bounds. Runs before any storage access.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name)?;
        check_text("description", &self.description)?;
        Ok(())
    }
}

/// Partial-update payload. An absent field means "leave unchanged" —
/// only supplied fields are validated and applied.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    /// Replacement name, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement priority, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TodoPatch {
    /// Check the length bounds on the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref name) = self.name {
            check_text("name", name)?;
        }
        if let Some(ref description) = self.description {
            check_text("description", description)?;
        }
        Ok(())
    }

    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.priority.is_none()
    }
}

/// Input rejected at the validation boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A text field is outside the 3–200 character bound.
    #[error("{field} must be between {MIN_TEXT_LEN} and {MAX_TEXT_LEN} characters, got {len}")]
    LengthOutOfRange {
        /// Which field failed.
        field: &'static str,
        /// Observed character count.
        len: usize,
    },

    /// Priority integer outside {1, 2, 3}.
    #[error("priority must be 1 (high), 2 (medium) or 3 (low), got {0}")]
    InvalidPriority(i64),
}

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
        return Err(ValidationError::LengthOutOfRange { field, len });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_integer_mapping() {
        assert_eq!(Priority::High.as_i64(), 1);
        assert_eq!(Priority::Medium.as_i64(), 2);
        assert_eq!(Priority::Low.as_i64(), 3);
    }

    #[test]
    fn priority_orders_high_first() {
        let mut levels = vec![Priority::Low, Priority::High, Priority::Medium];
        levels.sort();
        assert_eq!(levels, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn priority_from_valid_integers() {
        assert_eq!(Priority::try_from(1).unwrap(), Priority::High);
        assert_eq!(Priority::try_from(2).unwrap(), Priority::Medium);
        assert_eq!(Priority::try_from(3).unwrap(), Priority::Low);
    }

    #[test]
    fn priority_from_invalid_integer() {
        assert!(Priority::try_from(0).is_err());
        assert!(Priority::try_from(4).is_err());
        assert!(Priority::try_from(-1).is_err());
    }

    #[test]
    fn priority_default_is_low() {
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn priority_serializes_as_integer() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "1");
        let back: Priority = serde_json::from_str("2").unwrap();
        assert_eq!(back, Priority::Medium);
    }

    #[test]
    fn priority_rejects_out_of_range_json() {
        let result: Result<Priority, _> = serde_json::from_str("5");
        assert!(result.is_err());
    }

    #[test]
    fn create_defaults_priority_to_low() {
        let input: TodoCreate =
            serde_json::from_str(r#"{"name":"sports","description":"badminton game"}"#).unwrap();
        assert_eq!(input.priority, Priority::Low);
    }

    #[test]
    fn create_validates_length_bounds() {
        let ok = TodoCreate {
            name: "abc".into(),
            description: "a".repeat(200),
            priority: Priority::Low,
        };
        assert!(ok.validate().is_ok());

        let short = TodoCreate {
            name: "ab".into(),
            description: "badminton game".into(),
            priority: Priority::Low,
        };
        assert!(short.validate().is_err());

        let long = TodoCreate {
            name: "sports".into(),
            description: "a".repeat(201),
            priority: Priority::Low,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let input = TodoCreate {
            name: "héllo".into(),
            description: "日本語のメモ".into(),
            priority: Priority::Low,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn patch_absent_fields_skip_validation() {
        let patch = TodoPatch {
            priority: Some(Priority::High),
            ..TodoPatch::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn patch_validates_supplied_fields() {
        let patch = TodoPatch {
            name: Some("".into()),
            ..TodoPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_deserialize_distinguishes_absent() {
        let patch: TodoPatch = serde_json::from_str(r#"{"priority":1}"#).unwrap();
        assert_eq!(patch.priority, Some(Priority::High));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_is_empty() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::LengthOutOfRange { field: "name", len: 2 };
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains('2'));

        let err = ValidationError::InvalidPriority(7);
        assert!(err.to_string().contains('7'));
    }
}
