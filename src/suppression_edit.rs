//! Infrastructure for auto-inserting suppression comments.
//!
//! Every flagged check exposes three quick-fix actions: suppress for the
//! enclosing rule, for the enclosing attribute, or for the whole document.
//! Applying an action performs exactly one edit on the backing document:
//! either a fresh `// suppress <check>` comment inserted on its own line
//! above the container, a missing id appended to an existing directive
//! comment, or a `// suppress <check>ForFile` comment inserted at the top of
//! the document.

use std::fmt;

use thiserror::Error;

use crate::comments::{ScanMode, leading_comments};
use crate::directive::{SuppressionTag, file_scope_id};
use crate::tree::{NodeKind, TreeNode};

/// A document that suppression comments can be written into.
///
/// Each method performs a single atomic edit; handles obtained before an
/// edit are invalid afterwards and must be re-fetched.
pub trait EditableDocument {
    type Node: TreeNode;

    /// The document root.
    fn root(&self) -> Self::Node;

    /// Whether the document accepts edits.
    fn is_writable(&self) -> bool;

    /// Insert `text` as a comment on its own line immediately before
    /// `anchor`, inheriting the indentation of the anchor's line.
    fn insert_comment_before(&mut self, anchor: &Self::Node, text: &str);

    /// Insert `text` as a comment on the first line of the document.
    fn insert_comment_at_start(&mut self, text: &str);

    /// Replace the full text of an existing comment leaf.
    fn replace_comment_text(&mut self, comment: &Self::Node, text: &str);
}

/// What a suppression action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionScope {
    /// The nearest enclosing rule definition.
    Rule,
    /// The nearest enclosing attribute definition.
    Attribute,
    /// The whole document.
    File,
}

impl SuppressionScope {
    /// Human-readable label for the quick-fix menu.
    pub fn label(self) -> &'static str {
        match self {
            SuppressionScope::Rule => "Suppress for rule",
            SuppressionScope::Attribute => "Suppress for attribute",
            SuppressionScope::File => "Suppress for file",
        }
    }

    fn container_kind(self) -> NodeKind {
        match self {
            SuppressionScope::Rule => NodeKind::RuleLike,
            SuppressionScope::Attribute => NodeKind::AttributeLike,
            SuppressionScope::File => NodeKind::DocumentRoot,
        }
    }
}

impl fmt::Display for SuppressionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuppressionScope::Rule => "rule",
            SuppressionScope::Attribute => "attribute",
            SuppressionScope::File => "file",
        };
        f.write_str(name)
    }
}

/// Failure modes of applying a suppression action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuppressionError {
    #[error("document is read-only")]
    ReadOnlyDocument,
    #[error("no enclosing {0} to attach a suppression comment to")]
    NoContainer(SuppressionScope),
}

/// One "suppress this check" quick fix, bound to a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionAction {
    scope: SuppressionScope,
    check_id: String,
}

/// The suppression actions available for a check, in menu order.
///
/// All three scopes are always offered; whether an action is applicable to a
/// particular node is only known when it is applied.
pub fn suppress_actions(check_id: &str) -> Vec<SuppressionAction> {
    [
        SuppressionScope::Rule,
        SuppressionScope::Attribute,
        SuppressionScope::File,
    ]
    .into_iter()
    .map(|scope| SuppressionAction::new(scope, check_id))
    .collect()
}

impl SuppressionAction {
    pub fn new(scope: SuppressionScope, check_id: &str) -> Self {
        Self { scope, check_id: check_id.to_string() }
    }

    pub fn scope(&self) -> SuppressionScope {
        self.scope
    }

    pub fn check_id(&self) -> &str {
        &self.check_id
    }

    /// Human-readable label for the quick-fix menu.
    pub fn label(&self) -> &'static str {
        self.scope.label()
    }

    /// Write the suppression comment for `node` into `doc`.
    ///
    /// For the file scope this always inserts a new `<check>ForFile`
    /// directive at the top of the document. For the rule and attribute
    /// scopes it merges into the directive comment already preceding the
    /// container when there is one, so re-applying the same action is a
    /// no-op; otherwise it inserts a fresh comment right above the
    /// container.
    pub fn apply<D: EditableDocument>(
        &self,
        doc: &mut D,
        node: &D::Node,
    ) -> Result<(), SuppressionError> {
        if !doc.is_writable() {
            return Err(SuppressionError::ReadOnlyDocument);
        }

        match self.scope {
            SuppressionScope::File => {
                let tag = SuppressionTag::new(&file_scope_id(&self.check_id));
                doc.insert_comment_at_start(&tag.to_comment_text());
                tracing::debug!(check_id = %self.check_id, "inserted file-scope suppression");
                Ok(())
            }
            SuppressionScope::Rule | SuppressionScope::Attribute => {
                let target = self.scope.container_kind();
                let container = std::iter::successors(Some(node.clone()), |n| n.parent())
                    .find(|n| n.kind() == target)
                    .ok_or(SuppressionError::NoContainer(self.scope))?;

                // Merge into the nearest directive comment already above the
                // container, if any.
                let existing = leading_comments(&container, ScanMode::BeforeNode)
                    .find_map(|c| SuppressionTag::parse(&c.text()).map(|tag| (c, tag)));
                match existing {
                    Some((comment, mut tag)) => {
                        if tag.insert(&self.check_id) {
                            doc.replace_comment_text(&comment, &tag.to_comment_text());
                            tracing::debug!(
                                check_id = %self.check_id,
                                scope = %self.scope,
                                "merged into existing suppression comment"
                            );
                        }
                    }
                    None => {
                        let tag = SuppressionTag::new(&self.check_id);
                        doc.insert_comment_before(&container, &tag.to_comment_text());
                        tracing::debug!(
                            check_id = %self.check_id,
                            scope = %self.scope,
                            "inserted suppression comment"
                        );
                    }
                }
                Ok(())
            }
        }
    }
}
