//! Parsing and formatting of suppression comment directives.
//!
//! A directive is a line comment whose entire text follows this grammar:
//!
//! ```text
//! // suppress <id1>[, <id2> ...]
//! ```
//!
//! Ids are comma/space-separated check identifiers. A check can also be
//! suppressed for the whole document with the `<id>ForFile` form. Anything
//! that does not match the grammar exactly is not a directive and is simply
//! ignored, never an error.
//!
//! This module is pure string manipulation so that it stays unit-testable
//! without a syntax tree.

/// The keyword introducing a suppression directive.
pub const SUPPRESS_VERB: &str = "suppress";

/// Suffix turning a check id into its document-wide variant.
pub const FILE_SCOPE_SUFFIX: &str = "ForFile";

/// The document-wide id for a check, e.g. `BadNaming` -> `BadNamingForFile`.
pub fn file_scope_id(check_id: &str) -> String {
    format!("{check_id}{FILE_SCOPE_SUFFIX}")
}

/// A parsed suppression directive: the ordered, de-duplicated list of check
/// ids mentioned by one comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionTag {
    ids: Vec<String>,
}

impl SuppressionTag {
    /// A fresh tag suppressing a single check.
    pub fn new(check_id: &str) -> Self {
        Self { ids: vec![check_id.to_string()] }
    }

    /// Parse a comment's full text as a suppression directive.
    ///
    /// Returns `None` for anything that is not a directive: block comments,
    /// ordinary line comments, a bare verb without ids, or an id containing
    /// characters outside `[A-Za-z0-9_.-]`.
    pub fn parse(comment_text: &str) -> Option<Self> {
        let rest = comment_text.trim().strip_prefix("//")?;
        let rest = rest.trim_start();
        let rest = rest.strip_prefix(SUPPRESS_VERB)?;
        // The verb must be a whole word: `// suppressive x` is not a directive.
        if !rest.starts_with(|c: char| c.is_whitespace()) {
            return None;
        }

        let mut ids: Vec<String> = Vec::new();
        for id in rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            if !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
            {
                return None;
            }
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }

        if ids.is_empty() { None } else { Some(Self { ids }) }
    }

    /// Whether this directive mentions `check_id` exactly.
    ///
    /// Matching is exact, so a `xForFile` id never matches a scan for `x`.
    pub fn mentions(&self, check_id: &str) -> bool {
        self.ids.iter().any(|id| id == check_id)
    }

    /// Append `check_id` unless already present. Returns whether the tag
    /// changed.
    pub fn insert(&mut self, check_id: &str) -> bool {
        if self.mentions(check_id) {
            return false;
        }
        self.ids.push(check_id.to_string());
        true
    }

    /// The check ids in first-seen order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Render the directive back to comment text, preserving id order.
    pub fn to_comment_text(&self) -> String {
        format!("// {SUPPRESS_VERB} {}", self.ids.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_id() {
        let tag = SuppressionTag::parse("// suppress BadNaming").unwrap();
        assert_eq!(tag.ids(), ["BadNaming"]);
    }

    #[test]
    fn test_parse_multiple_ids() {
        let tag = SuppressionTag::parse("// suppress BadNaming, OtherCheck").unwrap();
        assert_eq!(tag.ids(), ["BadNaming", "OtherCheck"]);

        // Space separation works too
        let tag = SuppressionTag::parse("// suppress BadNaming OtherCheck").unwrap();
        assert_eq!(tag.ids(), ["BadNaming", "OtherCheck"]);
    }

    #[test]
    fn test_parse_without_space_after_marker() {
        let tag = SuppressionTag::parse("//suppress BadNaming").unwrap();
        assert_eq!(tag.ids(), ["BadNaming"]);
    }

    #[test]
    fn test_parse_dedups_ids() {
        let tag = SuppressionTag::parse("// suppress a, a, b").unwrap();
        assert_eq!(tag.ids(), ["a", "b"]);
    }

    #[test]
    fn test_not_a_directive() {
        // Ordinary comments
        assert_eq!(SuppressionTag::parse("// just a note"), None);
        // Block comments never carry directives
        assert_eq!(SuppressionTag::parse("/* suppress BadNaming */"), None);
        // Verb must be a whole word
        assert_eq!(SuppressionTag::parse("// suppressive BadNaming"), None);
        // Verb without ids
        assert_eq!(SuppressionTag::parse("// suppress"), None);
        assert_eq!(SuppressionTag::parse("// suppress   "), None);
    }

    #[test]
    fn test_malformed_ids_are_inert() {
        // A colon is outside the id grammar, making the entire comment inert
        assert_eq!(SuppressionTag::parse("// suppress BadNaming: reason"), None);
        assert_eq!(SuppressionTag::parse("// suppress bad$name"), None);
    }

    #[test]
    fn test_mentions_is_exact() {
        let tag = SuppressionTag::parse("// suppress BadNamingForFile").unwrap();
        assert!(tag.mentions("BadNamingForFile"));
        assert!(!tag.mentions("BadNaming"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut tag = SuppressionTag::new("BadNaming");
        assert!(!tag.insert("BadNaming"));
        assert!(tag.insert("OtherCheck"));
        assert!(!tag.insert("OtherCheck"));
        assert_eq!(tag.to_comment_text(), "// suppress BadNaming, OtherCheck");
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let text = "// suppress b, a";
        let tag = SuppressionTag::parse(text).unwrap();
        assert_eq!(tag.to_comment_text(), text);
    }

    #[test]
    fn test_file_scope_id() {
        assert_eq!(file_scope_id("BadNaming"), "BadNamingForFile");
    }
}
