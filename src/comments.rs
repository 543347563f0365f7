//! Scanning for the comments that precede a node.
//!
//! Suppression directives only count when they sit in the contiguous run of
//! whitespace and comments leading up to their target: either the leaves at
//! the very start of the document, or the leaves immediately before a node.
//! Any other leaf ends the run, so a comment separated from its target by a
//! statement does not apply to it.

use crate::tree::{LeafKind, TreeNode};

/// Where a leading-comment scan starts and which direction it walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Forward from the document's first leaf; `anchor` is the document root.
    DocumentStart,
    /// Backward from the leaf just before `anchor`.
    BeforeNode,
}

/// The comments in the contiguous whitespace/comment run next to `anchor`.
///
/// The iterator is lazy and re-walks the tree on every call; nothing is
/// cached because the document may be edited between calls.
pub fn leading_comments<N: TreeNode>(anchor: &N, mode: ScanMode) -> impl Iterator<Item = N> {
    let start = match mode {
        ScanMode::DocumentStart => anchor.first_leaf(),
        ScanMode::BeforeNode => anchor.prev_leaf(),
    };
    std::iter::successors(start, move |leaf| match mode {
        ScanMode::DocumentStart => leaf.next_leaf(),
        ScanMode::BeforeNode => leaf.prev_leaf(),
    })
    .take_while(|leaf| {
        matches!(
            leaf.leaf_kind(),
            Some(LeafKind::Whitespace) | Some(LeafKind::Comment)
        )
    })
    .filter(|leaf| leaf.leaf_kind() == Some(LeafKind::Comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarDocument, GrammarKind};

    fn comment_texts(doc: &GrammarDocument, anchor_kind: GrammarKind, mode: ScanMode) -> Vec<String> {
        let anchor = doc.first_node_of(anchor_kind).unwrap();
        leading_comments(&anchor, mode).map(|c| c.text()).collect()
    }

    #[test]
    fn test_document_start_run() {
        let doc = GrammarDocument::parse("// first\n/* second */\nA ::= 'x';\n// not leading\n");
        let texts = comment_texts(&doc, GrammarKind::Document, ScanMode::DocumentStart);
        assert_eq!(texts, ["// first", "/* second */"]);
    }

    #[test]
    fn test_before_node_run_is_nearest_first() {
        let doc = GrammarDocument::parse("// outer\n// inner\nA ::= 'x';");
        let texts = comment_texts(&doc, GrammarKind::Rule, ScanMode::BeforeNode);
        assert_eq!(texts, ["// inner", "// outer"]);
    }

    #[test]
    fn test_run_broken_by_other_leaf() {
        // The stray `;` between comment and rule ends the run
        let doc = GrammarDocument::parse("// orphan\n;\nA ::= 'x';");
        let texts = comment_texts(&doc, GrammarKind::Rule, ScanMode::BeforeNode);
        assert!(texts.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = GrammarDocument::parse("");
        let texts = comment_texts(&doc, GrammarKind::Document, ScanMode::DocumentStart);
        assert!(texts.is_empty());
    }

    #[test]
    fn test_node_at_document_start_has_no_leading_run() {
        let doc = GrammarDocument::parse("A ::= 'x';");
        let texts = comment_texts(&doc, GrammarKind::Rule, ScanMode::BeforeNode);
        assert!(texts.is_empty());
    }
}
