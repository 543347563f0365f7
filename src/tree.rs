//! Narrow view over a host syntax tree.
//!
//! Suppression resolution only needs a handful of tree operations: walking
//! up to parents, stepping between leaves, and classifying nodes. Instead of
//! depending on a concrete parser, everything in this crate is generic over
//! [`TreeNode`], so any tree backend can plug in. The crate ships one real
//! backend in [`crate::grammar`].

/// Classification of a node for suppression purposes.
///
/// This is a closed set: suppression comments can target a rule, an
/// attribute, or the whole document. Everything else is `Other` and can
/// never be suppressed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A rule definition, e.g. `A ::= 'x';`
    RuleLike,
    /// An attribute definition, e.g. `pin = 1;`
    AttributeLike,
    /// The document root node
    DocumentRoot,
    /// Any other node or token
    Other,
}

impl NodeKind {
    /// Whether a node of this kind can carry a suppression at all.
    pub fn is_suppressible(self) -> bool {
        !matches!(self, NodeKind::Other)
    }
}

/// Classification of a leaf for comment scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Whitespace,
    Comment,
    /// Any other leaf; ends a leading-comment run.
    Other,
}

/// A transient, read-only handle on a syntax tree element.
///
/// Handles are only valid for the duration of one resolution or edit call:
/// mutating the document invalidates them, and callers re-fetch nodes from
/// the backend afterwards.
pub trait TreeNode: Clone + PartialEq {
    /// The enclosing node, `None` for the document root.
    fn parent(&self) -> Option<Self>;

    /// The leaf ending immediately before this element, crossing node
    /// boundaries.
    fn prev_leaf(&self) -> Option<Self>;

    /// The leaf starting immediately after this element, crossing node
    /// boundaries.
    fn next_leaf(&self) -> Option<Self>;

    /// The deepest first leaf under this element, i.e. its first token.
    /// `None` for an empty document.
    fn first_leaf(&self) -> Option<Self>;

    /// Suppression classification of this element.
    fn kind(&self) -> NodeKind;

    /// Leaf classification, `None` for composite nodes.
    fn leaf_kind(&self) -> Option<LeafKind>;

    /// Full source text of this element.
    fn text(&self) -> String;

    /// The document root owning this element.
    fn document_root(&self) -> Self {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }
}
