//! Comment-based lint suppression for grammar files.
//!
//! Given a syntax node flagged by a named check, this crate decides whether
//! a `// suppress` comment turns the check off for that node, its enclosing
//! declaration, or the whole document ([`is_suppressed_for`]), and provides
//! the quick-fix actions that write such comments ([`suppress_actions`]).
//!
//! The tree walks are generic over the narrow [`TreeNode`] capability trait,
//! so any syntax tree backend can participate. The [`grammar`] module ships
//! a reference backend for a small BNF-like language, built on `rowan`.

mod comments;
mod directive;
mod suppression;
mod suppression_edit;
mod tree;

pub mod grammar;

pub use comments::ScanMode;
pub use comments::leading_comments;
pub use directive::FILE_SCOPE_SUFFIX;
pub use directive::SUPPRESS_VERB;
pub use directive::SuppressionTag;
pub use directive::file_scope_id;
pub use suppression::is_suppressed_for;
pub use suppression_edit::EditableDocument;
pub use suppression_edit::SuppressionAction;
pub use suppression_edit::SuppressionError;
pub use suppression_edit::SuppressionScope;
pub use suppression_edit::suppress_actions;
pub use tree::LeafKind;
pub use tree::NodeKind;
pub use tree::TreeNode;
