//! Reference tree backend: a lossless CST for a small BNF-like grammar
//! language, built on [`rowan`].
//!
//! The suppression machinery in this crate is generic over
//! [`TreeNode`]/[`EditableDocument`]; this module provides the one concrete
//! implementation used by the tests and usable by embedders directly. The
//! language is deliberately small:
//!
//! ```text
//! // a rule, optionally with an attribute block
//! greeting ::= 'hello' { pin = 1; };
//!
//! // a top-level attribute
//! version = "1.0";
//! ```
//!
//! Parsing is error-tolerant: stray tokens attach to the document node, and
//! every byte of the input is preserved in the tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::suppression_edit::EditableDocument;
use crate::tree::{LeafKind, NodeKind, TreeNode};

/// Token and node kinds of the grammar language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum GrammarKind {
    // Tokens
    Whitespace = 0,
    LineComment,
    BlockComment,
    Ident,
    Literal,
    /// `::=`
    RuleAssign,
    /// `=`
    AttrAssign,
    Semicolon,
    LBrace,
    RBrace,
    Unknown,

    // Nodes
    Rule,
    Attribute,
    Document,
}

impl GrammarKind {
    const ALL: [GrammarKind; 14] = [
        GrammarKind::Whitespace,
        GrammarKind::LineComment,
        GrammarKind::BlockComment,
        GrammarKind::Ident,
        GrammarKind::Literal,
        GrammarKind::RuleAssign,
        GrammarKind::AttrAssign,
        GrammarKind::Semicolon,
        GrammarKind::LBrace,
        GrammarKind::RBrace,
        GrammarKind::Unknown,
        GrammarKind::Rule,
        GrammarKind::Attribute,
        GrammarKind::Document,
    ];

    fn is_trivia(self) -> bool {
        matches!(
            self,
            GrammarKind::Whitespace | GrammarKind::LineComment | GrammarKind::BlockComment
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarLanguage {}

impl rowan::Language for GrammarLanguage {
    type Kind = GrammarKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> GrammarKind {
        GrammarKind::ALL[raw.0 as usize]
    }

    fn kind_to_raw(kind: GrammarKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GrammarLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GrammarLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

// --- Lexer ---------------------------------------------------------------

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length in bytes of the token starting at the beginning of `rest`.
fn scan_token(rest: &str) -> (GrammarKind, usize) {
    let Some(first) = rest.chars().next() else {
        return (GrammarKind::Unknown, 0);
    };

    if first.is_whitespace() {
        let len = rest
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        return (GrammarKind::Whitespace, len);
    }
    if rest.starts_with("//") {
        let len = rest.find('\n').unwrap_or(rest.len());
        return (GrammarKind::LineComment, len);
    }
    if rest.starts_with("/*") {
        let len = rest[2..].find("*/").map(|i| i + 4).unwrap_or(rest.len());
        return (GrammarKind::BlockComment, len);
    }
    if rest.starts_with("::=") {
        return (GrammarKind::RuleAssign, 3);
    }
    if first == '\'' || first == '"' {
        // Unterminated literals swallow the rest of the input
        let len = rest[1..].find(first).map(|i| i + 2).unwrap_or(rest.len());
        return (GrammarKind::Literal, len);
    }
    if is_ident_char(first) {
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_ident_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        return (GrammarKind::Ident, len);
    }
    let kind = match first {
        '=' => GrammarKind::AttrAssign,
        ';' => GrammarKind::Semicolon,
        '{' => GrammarKind::LBrace,
        '}' => GrammarKind::RBrace,
        _ => GrammarKind::Unknown,
    };
    (kind, first.len_utf8())
}

fn lex(source: &str) -> Vec<(GrammarKind, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    while offset < source.len() {
        let (kind, len) = scan_token(&source[offset..]);
        tokens.push((kind, offset..offset + len));
        offset += len;
    }
    tokens
}

// --- Parser --------------------------------------------------------------

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<(GrammarKind, std::ops::Range<usize>)>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'s> Parser<'s> {
    fn parse(source: &'s str) -> GreenNode {
        let mut parser = Parser {
            source,
            tokens: lex(source),
            pos: 0,
            builder: GreenNodeBuilder::new(),
        };
        parser.start_node(GrammarKind::Document);
        while let Some(kind) = parser.current() {
            if kind.is_trivia() {
                parser.bump();
            } else {
                parser.statement();
            }
        }
        parser.builder.finish_node();
        parser.builder.finish()
    }

    fn current(&self) -> Option<GrammarKind> {
        self.tokens.get(self.pos).map(|(kind, _)| *kind)
    }

    fn bump(&mut self) {
        let (kind, range) = self.tokens[self.pos].clone();
        self.builder.token(
            <GrammarLanguage as rowan::Language>::kind_to_raw(kind),
            &self.source[range],
        );
        self.pos += 1;
    }

    fn start_node(&mut self, kind: GrammarKind) {
        self.builder
            .start_node(<GrammarLanguage as rowan::Language>::kind_to_raw(kind));
    }

    /// Classify the statement starting at the current token by the first
    /// assignment operator before the statement ends. `None` means stray
    /// tokens that stay at the enclosing node's level.
    fn statement_kind(&self) -> Option<GrammarKind> {
        for (kind, _) in &self.tokens[self.pos..] {
            match kind {
                GrammarKind::RuleAssign => return Some(GrammarKind::Rule),
                GrammarKind::AttrAssign => return Some(GrammarKind::Attribute),
                GrammarKind::Semicolon | GrammarKind::LBrace | GrammarKind::RBrace => return None,
                _ => {}
            }
        }
        None
    }

    fn statement(&mut self) {
        match self.statement_kind() {
            Some(kind) => {
                self.start_node(kind);
                self.statement_body();
                self.builder.finish_node();
            }
            None => self.bump(),
        }
    }

    /// Everything up to and including the terminating `;`, descending into
    /// one attribute block if present.
    fn statement_body(&mut self) {
        while let Some(kind) = self.current() {
            match kind {
                GrammarKind::Semicolon => {
                    self.bump();
                    return;
                }
                GrammarKind::LBrace => self.attribute_block(),
                // Unbalanced brace: the enclosing block handles it
                GrammarKind::RBrace => return,
                _ => self.bump(),
            }
        }
    }

    fn attribute_block(&mut self) {
        self.bump(); // `{`
        while let Some(kind) = self.current() {
            if kind == GrammarKind::RBrace {
                self.bump();
                return;
            }
            if kind.is_trivia() {
                self.bump();
            } else if self.statement_kind() == Some(GrammarKind::Attribute) {
                self.start_node(GrammarKind::Attribute);
                self.statement_body();
                self.builder.finish_node();
            } else {
                self.bump();
            }
        }
    }
}

// --- TreeNode implementation ---------------------------------------------

/// A node or token of a parsed grammar document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarNode(SyntaxElement);

impl GrammarNode {
    pub fn syntax(&self) -> &SyntaxElement {
        &self.0
    }

    pub fn text_range(&self) -> rowan::TextRange {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.text_range(),
            rowan::NodeOrToken::Token(t) => t.text_range(),
        }
    }

    pub fn grammar_kind(&self) -> GrammarKind {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.kind(),
            rowan::NodeOrToken::Token(t) => t.kind(),
        }
    }
}

impl From<SyntaxNode> for GrammarNode {
    fn from(node: SyntaxNode) -> Self {
        GrammarNode(rowan::NodeOrToken::Node(node))
    }
}

impl From<SyntaxToken> for GrammarNode {
    fn from(token: SyntaxToken) -> Self {
        GrammarNode(rowan::NodeOrToken::Token(token))
    }
}

impl TreeNode for GrammarNode {
    fn parent(&self) -> Option<Self> {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.parent(),
            rowan::NodeOrToken::Token(t) => t.parent(),
        }
        .map(GrammarNode::from)
    }

    fn prev_leaf(&self) -> Option<Self> {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.first_token().and_then(|t| t.prev_token()),
            rowan::NodeOrToken::Token(t) => t.prev_token(),
        }
        .map(GrammarNode::from)
    }

    fn next_leaf(&self) -> Option<Self> {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.last_token().and_then(|t| t.next_token()),
            rowan::NodeOrToken::Token(t) => t.next_token(),
        }
        .map(GrammarNode::from)
    }

    fn first_leaf(&self) -> Option<Self> {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.first_token().map(GrammarNode::from),
            rowan::NodeOrToken::Token(_) => Some(self.clone()),
        }
    }

    fn kind(&self) -> NodeKind {
        match self.grammar_kind() {
            GrammarKind::Rule => NodeKind::RuleLike,
            GrammarKind::Attribute => NodeKind::AttributeLike,
            GrammarKind::Document => NodeKind::DocumentRoot,
            _ => NodeKind::Other,
        }
    }

    fn leaf_kind(&self) -> Option<LeafKind> {
        match &self.0 {
            rowan::NodeOrToken::Node(_) => None,
            rowan::NodeOrToken::Token(t) => Some(match t.kind() {
                GrammarKind::Whitespace => LeafKind::Whitespace,
                GrammarKind::LineComment | GrammarKind::BlockComment => LeafKind::Comment,
                _ => LeafKind::Other,
            }),
        }
    }

    fn text(&self) -> String {
        match &self.0 {
            rowan::NodeOrToken::Node(n) => n.text().to_string(),
            rowan::NodeOrToken::Token(t) => t.text().to_string(),
        }
    }
}

// --- Document ------------------------------------------------------------

/// A grammar source file: the source text plus its parsed syntax tree.
///
/// Edits are plain text splices followed by a reparse, so a single edit is
/// atomic by construction. Node handles from before an edit point at the old
/// tree and must be re-fetched.
#[derive(Debug)]
pub struct GrammarDocument {
    source: String,
    root: SyntaxNode,
    writable: bool,
}

impl GrammarDocument {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let root = SyntaxNode::new_root(Parser::parse(&source));
        GrammarDocument { source, root, writable: true }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    pub fn syntax(&self) -> SyntaxNode {
        self.root.clone()
    }

    /// The first node of `kind` in document order, the document root
    /// included.
    pub fn first_node_of(&self, kind: GrammarKind) -> Option<GrammarNode> {
        self.root
            .descendants()
            .find(|n| n.kind() == kind)
            .map(GrammarNode::from)
    }

    fn splice(&mut self, offset: usize, deleted: usize, inserted: &str) {
        self.source.replace_range(offset..offset + deleted, inserted);
        self.root = SyntaxNode::new_root(Parser::parse(&self.source));
    }
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0);
    source[line_start..]
        .chars()
        .take_while(|c| c.is_whitespace() && *c != '\n')
        .collect()
}

impl EditableDocument for GrammarDocument {
    type Node = GrammarNode;

    fn root(&self) -> GrammarNode {
        GrammarNode::from(self.root.clone())
    }

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn insert_comment_before(&mut self, anchor: &GrammarNode, text: &str) {
        let offset: usize = anchor.text_range().start().into();
        let indent = line_indent(&self.source, offset);
        self.splice(offset, 0, &format!("{text}\n{indent}"));
    }

    fn insert_comment_at_start(&mut self, text: &str) {
        self.splice(0, 0, &format!("{text}\n"));
    }

    fn replace_comment_text(&mut self, comment: &GrammarNode, text: &str) {
        let range = comment.text_range();
        self.splice(range.start().into(), range.len().into(), text);
    }
}
