// Identifier sanitization
// Camera ids and record names reach object keys and file names, so they are
// checked against an allow-list before any key or path is built.

use thiserror::Error;

use crate::types::{Classify, ErrorKind};

/// Longest identifier accepted for a camera id or record name
pub const MAX_IDENTIFIER_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains a character outside [A-Za-z0-9._-]")]
    ForbiddenCharacter { field: &'static str },

    #[error("{field} must not start with '.' or contain '..'")]
    DotSequence { field: &'static str },
}

impl Classify for IdentifierError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::SchemaViolation
    }

    fn public_message(&self) -> String {
        self.to_string()
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Validate an untrusted identifier and hand it back unchanged.
///
/// Accepts 1 to [`MAX_IDENTIFIER_LEN`] characters from `[A-Za-z0-9._-]`,
/// not starting with `.` and never containing `..`. Separators, absolute
/// paths, whitespace and control characters are all rejected.
pub fn sanitize_identifier<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty { field });
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            field,
            max: MAX_IDENTIFIER_LEN,
        });
    }
    if !value.chars().all(is_allowed) {
        return Err(IdentifierError::ForbiddenCharacter { field });
    }
    if value.starts_with('.') || value.contains("..") {
        return Err(IdentifierError::DotSequence { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_plain_identifiers() {
        for id in ["main", "cam1", "north-gate", "barn_02", "v1.2"] {
            assert_eq!(sanitize_identifier("camera", id), Ok(id));
        }
    }

    #[test]
    fn test_rejects_traversal_and_separators() {
        let cases = [
            ("../etc/passwd", IdentifierError::ForbiddenCharacter { field: "camera" }),
            ("..", IdentifierError::DotSequence { field: "camera" }),
            ("a..b", IdentifierError::DotSequence { field: "camera" }),
            (".hidden", IdentifierError::DotSequence { field: "camera" }),
            ("/etc/passwd", IdentifierError::ForbiddenCharacter { field: "camera" }),
            ("..\\windows", IdentifierError::ForbiddenCharacter { field: "camera" }),
            ("cam 1", IdentifierError::ForbiddenCharacter { field: "camera" }),
            ("cam\0", IdentifierError::ForbiddenCharacter { field: "camera" }),
            ("", IdentifierError::Empty { field: "camera" }),
        ];
        for (input, expected) in cases {
            assert_eq!(sanitize_identifier("camera", input), Err(expected), "{input:?}");
        }
    }

    #[test]
    fn test_rejects_overlong_identifier() {
        let long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(matches!(
            sanitize_identifier("webcam_name", &long),
            Err(IdentifierError::TooLong { .. })
        ));
        let exact = "a".repeat(MAX_IDENTIFIER_LEN);
        assert!(sanitize_identifier("webcam_name", &exact).is_ok());
    }

    #[test]
    fn test_errors_classify_as_schema_violation() {
        let err = sanitize_identifier("webcam_name", "../x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
        assert!(err.public_message().starts_with("webcam_name"));
    }

    proptest! {
        #[test]
        fn prop_parent_references_never_pass(prefix in "[a-z0-9]{0,8}", suffix in "[a-z0-9]{0,8}") {
            let with_slash = format!("{prefix}../{suffix}");
            let bare = format!("{prefix}..{suffix}");
            prop_assert!(sanitize_identifier("camera", &with_slash).is_err());
            prop_assert!(sanitize_identifier("camera", &bare).is_err());
        }

        #[test]
        fn prop_absolute_paths_never_pass(path in "/[a-z0-9/]{0,20}") {
            prop_assert!(sanitize_identifier("camera", &path).is_err());
        }

        #[test]
        fn prop_accepted_identifiers_contain_no_separator(id in "[A-Za-z0-9_][A-Za-z0-9_.-]{0,40}") {
            if let Ok(accepted) = sanitize_identifier("camera", &id) {
                prop_assert!(!accepted.contains('/'));
                prop_assert!(!accepted.contains('\\'));
                prop_assert!(!accepted.contains(".."));
            }
        }
    }
}
