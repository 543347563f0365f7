//! Comment-based suppression for lint checks.
//!
//! This module decides whether a flagged node should skip a named check,
//! based on `// suppress` comments at two scopes:
//!
//! - document scope: a `// suppress <check>ForFile` directive in the
//!   comments at the very top of the document suppresses the check for every
//!   node in it;
//! - ancestor scope: a `// suppress <check>` directive immediately above the
//!   node or one of its enclosing rules/attributes suppresses the check for
//!   everything inside that container.
//!
//! Document scope is checked first and wins outright, even when a narrower
//! ancestor directive also exists.

use crate::comments::{ScanMode, leading_comments};
use crate::directive::{SuppressionTag, file_scope_id};
use crate::tree::TreeNode;

/// Whether `check_id` is suppressed for `node` by a comment directive.
///
/// Returns `false` immediately for nodes that are not suppressible units
/// (anything other than a rule, an attribute, or the document root). Pure
/// read: malformed directive comments are skipped, and reaching the document
/// boundary without a match is the normal "not suppressed" outcome.
pub fn is_suppressed_for<N: TreeNode>(node: &N, check_id: &str) -> bool {
    if !node.kind().is_suppressible() {
        return false;
    }

    let root = node.document_root();
    if scan_for_directive(&root, ScanMode::DocumentStart, &file_scope_id(check_id)) {
        tracing::debug!(check_id, "suppressed by document-scope directive");
        return true;
    }

    let ancestors =
        std::iter::successors(Some(node.clone()), |n| n.parent()).take_while(|n| *n != root);
    for ancestor in ancestors {
        if scan_for_directive(&ancestor, ScanMode::BeforeNode, check_id) {
            tracing::debug!(check_id, "suppressed by ancestor-scope directive");
            return true;
        }
    }
    false
}

/// Whether the leading-comment run at `anchor` holds a directive mentioning
/// `id`.
fn scan_for_directive<N: TreeNode>(anchor: &N, mode: ScanMode, id: &str) -> bool {
    leading_comments(anchor, mode)
        .any(|comment| SuppressionTag::parse(&comment.text()).is_some_and(|tag| tag.mentions(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarDocument, GrammarKind};

    #[test]
    fn test_no_suppression() {
        let doc = GrammarDocument::parse("// just a regular comment\nA ::= 'x';");
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        assert!(!is_suppressed_for(&rule, "BadNaming"));
    }

    #[test]
    fn test_directive_before_rule() {
        let doc = GrammarDocument::parse("// suppress BadNaming, Unused\nA ::= 'x';");
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        assert!(is_suppressed_for(&rule, "BadNaming"));
        assert!(is_suppressed_for(&rule, "Unused"));
        assert!(!is_suppressed_for(&rule, "OtherCheck"));
    }

    #[test]
    fn test_directive_suppresses_nested_containers() {
        let doc = GrammarDocument::parse("// suppress Deep\nA ::= 'x' { pin = 1; };");
        let attr = doc.first_node_of(GrammarKind::Attribute).unwrap();
        assert!(is_suppressed_for(&attr, "Deep"));
        assert!(!is_suppressed_for(&attr, "Other"));
    }

    #[test]
    fn test_file_scope_directive_wins_everywhere() {
        let doc = GrammarDocument::parse(
            "// suppress BadNamingForFile\nA ::= 'x';\nB ::= 'y' { pin = 1; };",
        );
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        let attr = doc.first_node_of(GrammarKind::Attribute).unwrap();
        let root = doc.first_node_of(GrammarKind::Document).unwrap();
        assert!(is_suppressed_for(&rule, "BadNaming"));
        assert!(is_suppressed_for(&attr, "BadNaming"));
        assert!(is_suppressed_for(&root, "BadNaming"));
        assert!(!is_suppressed_for(&rule, "OtherCheck"));
    }

    #[test]
    fn test_file_scope_id_does_not_leak_into_node_scope() {
        // The ForFile id right above a rule does not suppress the plain check
        // at node scope, and the plain id does not suppress document-wide.
        let doc = GrammarDocument::parse("A ::= 'x';\n// suppress BadNaming\nB ::= 'y';");
        let first = doc.first_node_of(GrammarKind::Rule).unwrap();
        assert!(!is_suppressed_for(&first, "BadNaming"));
        assert!(!is_suppressed_for(&first, "BadNamingForFile"));
    }

    #[test]
    fn test_non_suppressible_leaf_is_never_suppressed() {
        let doc = GrammarDocument::parse("// suppress BadNaming\nA ::= 'x';");
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        // A token inside the rule is not a suppressible unit
        let leaf = rule.first_leaf().unwrap();
        assert!(!is_suppressed_for(&leaf, "BadNaming"));
    }

    #[test]
    fn test_interrupted_comment_run() {
        // A stray statement between the comment and the rule breaks the run
        let doc = GrammarDocument::parse("// suppress BadNaming\n;\nA ::= 'x';");
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        assert!(!is_suppressed_for(&rule, "BadNaming"));
    }

    #[test]
    fn test_malformed_directives_are_skipped() {
        let doc = GrammarDocument::parse(
            "// suppress BadNaming: because\n// suppress BadNaming\nA ::= 'x';",
        );
        let rule = doc.first_node_of(GrammarKind::Rule).unwrap();
        // The malformed first comment is inert but does not corrupt the scan
        assert!(is_suppressed_for(&rule, "BadNaming"));
    }
}
