use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::error::{WorkspaceError, WorkspaceResult};

static DRIVE_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]:").unwrap());
static RESERVED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])(\..*)?$").unwrap());

/// a validated path relative to the workspace root.
///
/// Backslashes are treated as separators, and empty or `.` segments are dropped.
/// An empty path refers to the workspace root itself
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    /// splits and validates `raw`. Rejects traversal (`..`), drive letters, `:`, and reserved device names.
    /// Paths that resolve to the workspace root are rejected too, nothing can be created or removed there
    pub fn parse(raw: &str) -> WorkspaceResult<RelativePath> {
        let normalized = raw.replace('\\', "/");
        let mut segments = Vec::new();
        for segment in normalized.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            validate_segment(segment, raw)?;
            segments.push(segment.to_string());
        }
        if segments.is_empty() {
            return Err(WorkspaceError::validation(format!(
                "The path '{raw}' does not point at anything inside the workspace"
            )));
        }
        Ok(RelativePath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// the last segment, empty for the root
    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// the lowercase extension of the last segment without the leading `.`.
    /// Dotfiles like `.bashrc` have no extension
    pub fn extension(&self) -> String {
        match self.file_name().rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => extension.to_ascii_lowercase(),
            _ => String::new(),
        }
    }

    /// the containing directory, which is the root for top-level entries
    pub fn parent(&self) -> RelativePath {
        let mut segments = self.segments.clone();
        segments.pop();
        RelativePath { segments }
    }

    /// the same path with its last segment replaced. `name` must be a single valid segment
    pub fn with_file_name(&self, name: &str) -> WorkspaceResult<RelativePath> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed == "." || trimmed.contains(['/', '\\']) {
            return Err(WorkspaceError::validation(format!(
                "'{name}' is not a valid name"
            )));
        }
        validate_segment(trimmed, name)?;
        let mut segments = self.parent().segments;
        segments.push(trimmed.to_string());
        Ok(RelativePath { segments })
    }

    /// true if `self` sits strictly underneath `ancestor`
    pub fn is_inside(&self, ancestor: &RelativePath) -> bool {
        self.segments.len() > ancestor.segments.len()
            && self.segments.starts_with(&ancestor.segments)
    }

    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

impl Display for RelativePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

fn validate_segment(segment: &str, raw: &str) -> WorkspaceResult<()> {
    if segment == ".." {
        return Err(WorkspaceError::validation(format!(
            "The path '{raw}' attempts to leave the workspace"
        )));
    }
    if DRIVE_LETTER.is_match(segment) || segment.contains(':') {
        return Err(WorkspaceError::validation(format!(
            "The path '{raw}' contains a drive letter or ':'"
        )));
    }
    if RESERVED_NAME.is_match(segment) {
        return Err(WorkspaceError::validation(format!(
            "The path '{raw}' uses the reserved name '{segment}'"
        )));
    }
    Ok(())
}

/// the string form of an absolute path as stored in the database
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod relative_path_tests {
    use super::*;

    fn assert_rejected(raw: &str) {
        let err = RelativePath::parse(raw).expect_err(raw);
        assert!(matches!(err, WorkspaceError::Validation(_)), "{raw}: {err:?}");
    }

    #[test]
    fn parse_normalizes_separators() {
        let path = RelativePath::parse("notes\\week 1//./todo.md").unwrap();
        assert_eq!(["notes", "week 1", "todo.md"], path.segments());
        assert_eq!("notes/week 1/todo.md", path.to_string());
    }

    #[test]
    fn parse_rejects_traversal() {
        assert_rejected("../outside.txt");
        assert_rejected("notes/../../outside.txt");
        assert_rejected("notes\\..\\x.txt");
    }

    #[test]
    fn parse_rejects_drive_letters() {
        assert_rejected("C:\\Windows\\x.txt");
        assert_rejected("c:/x.txt");
        assert_rejected("notes/a:b.txt");
    }

    #[test]
    fn parse_rejects_reserved_names() {
        assert_rejected("CON");
        assert_rejected("notes/nul.txt");
        assert_rejected("lpt1");
        assert_rejected("com9.md");
    }

    #[test]
    fn parse_accepts_names_that_only_resemble_reserved_names() {
        assert!(RelativePath::parse("console.txt").is_ok());
        assert!(RelativePath::parse("com10").is_ok());
        assert!(RelativePath::parse("auxiliary/notes.md").is_ok());
    }

    #[test]
    fn parse_rejects_root() {
        assert_rejected("");
        assert_rejected("./");
        assert_rejected("/");
    }

    #[test]
    fn extension_is_lowercase_without_dot() {
        assert_eq!("md", RelativePath::parse("a/b.MD").unwrap().extension());
        assert_eq!("gz", RelativePath::parse("a.tar.gz").unwrap().extension());
        assert_eq!("", RelativePath::parse(".bashrc").unwrap().extension());
        assert_eq!("", RelativePath::parse("README").unwrap().extension());
    }

    #[test]
    fn with_file_name_replaces_last_segment() {
        let path = RelativePath::parse("a/b/c.txt").unwrap();
        assert_eq!("a/b/d.md", path.with_file_name("d.md").unwrap().to_string());
        assert!(path.with_file_name("x/y").is_err());
        assert!(path.with_file_name("..").is_err());
        assert!(path.with_file_name("  ").is_err());
    }

    #[test]
    fn is_inside_matches_whole_segments() {
        let ab = RelativePath::parse("a/b").unwrap();
        assert!(RelativePath::parse("a/b/c").unwrap().is_inside(&ab));
        assert!(!RelativePath::parse("a/bc").unwrap().is_inside(&ab));
        assert!(!ab.is_inside(&ab));
    }
}
