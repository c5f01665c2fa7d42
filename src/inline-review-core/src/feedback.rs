//! Loading feedback items produced by an upstream analysis step.
//!
//! Input is a JSON array of objects with `path`, `line`, `body` and an
//! optional `side` (`LEFT` or `RIGHT`, default `RIGHT`).

use std::io::Read;
use std::path::Path;

use crate::error::{PublishError, Result};
use crate::types::FeedbackItem;

/// Path value that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Parse a JSON array of feedback items.
pub fn parse_feedback(content: &str, source_name: &str) -> Result<Vec<FeedbackItem>> {
    serde_json::from_str(content).map_err(|error| PublishError::Feedback {
        source_name: source_name.to_string(),
        error,
    })
}

/// Read feedback items from a file, or from stdin when `path` is `-`.
pub fn load_feedback(path: &Path) -> Result<Vec<FeedbackItem>> {
    if path.as_os_str() == STDIN_PATH {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|error| PublishError::FeedbackIo {
                path: path.to_path_buf(),
                error,
            })?;
        return parse_feedback(&content, "stdin");
    }

    let content = std::fs::read_to_string(path).map_err(|error| PublishError::FeedbackIo {
        path: path.to_path_buf(),
        error,
    })?;
    let items = parse_feedback(&content, &path.display().to_string())?;

    tracing::debug!("Loaded {} feedback items from {}", items.len(), path.display());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_feedback() {
        let items = parse_feedback(
            r#"[
                {"path": "src/lib.rs", "line": 10, "body": "Consider a doc comment.", "side": "RIGHT"},
                {"path": "src/old.rs", "line": 4, "body": "Was this removal intended?", "side": "LEFT"},
                {"path": "README.md", "line": 1, "body": "Typo."}
            ]"#,
            "inline",
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                FeedbackItem::new("src/lib.rs", 10, "Consider a doc comment.", Side::Right),
                FeedbackItem::new("src/old.rs", 4, "Was this removal intended?", Side::Left),
                FeedbackItem::new("README.md", 1, "Typo.", Side::Right),
            ]
        );
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_feedback("[]", "inline").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_side_is_rejected_locally() {
        let err = parse_feedback(
            r#"[{"path": "a.rs", "line": 1, "body": "x", "side": "CENTER"}]"#,
            "feedback.json",
        )
        .unwrap_err();

        let message = err.to_string();
        match err {
            PublishError::Feedback { source_name, .. } => assert_eq!(source_name, "feedback.json"),
            other => panic!("expected feedback error, got {other:?}"),
        }
        assert!(message.contains("CENTER"));
        assert!(message.contains("LEFT"));
        assert!(message.contains("RIGHT"));
    }

    #[test]
    fn test_negative_line_is_rejected_locally() {
        let result = parse_feedback(r#"[{"path": "a.rs", "line": -3, "body": "x"}]"#, "inline");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_feedback_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"path": "Demo2.cs", "line": 10, "body": "Use PascalCase.", "side": "RIGHT"}}]"#
        )
        .unwrap();

        let items = load_feedback(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path, "Demo2.cs");
    }

    #[test]
    fn test_load_feedback_missing_file() {
        let err = load_feedback(Path::new("/nonexistent/feedback.json")).unwrap_err();
        assert!(matches!(err, PublishError::FeedbackIo { .. }));
    }
}
