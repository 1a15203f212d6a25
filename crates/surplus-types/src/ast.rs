//! AST node types for Surplus templates.
//!
//! The tree is strictly owned: every container holds its children in a
//! `Vec<Node>` in source order, and no node is shared between parents.
//! Nodes produced by the parser carry a [`Span`]; nodes synthesized later
//! (by a shim rule, for instance) carry none.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Node
// ══════════════════════════════════════════════════════════════════════════════

/// Any node in a template tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    CodeTopLevel(CodeTopLevel),
    HtmlElement(HtmlElement),
    HtmlInsert(HtmlInsert),
    EmbeddedCode(EmbeddedCode),
    CodeText(CodeText),
    HtmlText(HtmlText),
    HtmlComment(HtmlComment),
    StaticProperty(StaticProperty),
}

/// The fieldless tag of a [`Node`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    CodeTopLevel,
    HtmlElement,
    HtmlInsert,
    EmbeddedCode,
    CodeText,
    HtmlText,
    HtmlComment,
    StaticProperty,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 8] = [
        NodeKind::CodeTopLevel,
        NodeKind::HtmlElement,
        NodeKind::HtmlInsert,
        NodeKind::EmbeddedCode,
        NodeKind::CodeText,
        NodeKind::HtmlText,
        NodeKind::HtmlComment,
        NodeKind::StaticProperty,
    ];

    /// `true` for kinds that own a sequence (or, for inserts, a single
    /// embedded code block) of children.
    pub fn is_container(self) -> bool {
        !matches!(
            self,
            NodeKind::CodeText | NodeKind::HtmlText | NodeKind::HtmlComment
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CodeTopLevel => "code-top-level",
            NodeKind::HtmlElement => "html-element",
            NodeKind::HtmlInsert => "html-insert",
            NodeKind::EmbeddedCode => "embedded-code",
            NodeKind::CodeText => "code-text",
            NodeKind::HtmlText => "html-text",
            NodeKind::HtmlComment => "html-comment",
            NodeKind::StaticProperty => "static-property",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::CodeTopLevel(_) => NodeKind::CodeTopLevel,
            Node::HtmlElement(_) => NodeKind::HtmlElement,
            Node::HtmlInsert(_) => NodeKind::HtmlInsert,
            Node::EmbeddedCode(_) => NodeKind::EmbeddedCode,
            Node::CodeText(_) => NodeKind::CodeText,
            Node::HtmlText(_) => NodeKind::HtmlText,
            Node::HtmlComment(_) => NodeKind::HtmlComment,
            Node::StaticProperty(_) => NodeKind::StaticProperty,
        }
    }

    /// Source span, or `None` for synthesized nodes.
    pub fn span(&self) -> Option<Span> {
        match self {
            Node::CodeTopLevel(n) => n.span,
            Node::HtmlElement(n) => n.span,
            Node::HtmlInsert(n) => n.span,
            Node::EmbeddedCode(n) => n.span,
            Node::CodeText(n) => n.span,
            Node::HtmlText(n) => n.span,
            Node::HtmlComment(n) => n.span,
            Node::StaticProperty(n) => n.span,
        }
    }

    /// Attach a source span.
    pub fn with_span(mut self, span: Span) -> Self {
        let slot = match &mut self {
            Node::CodeTopLevel(n) => &mut n.span,
            Node::HtmlElement(n) => &mut n.span,
            Node::HtmlInsert(n) => &mut n.span,
            Node::EmbeddedCode(n) => &mut n.span,
            Node::CodeText(n) => &mut n.span,
            Node::HtmlText(n) => &mut n.span,
            Node::HtmlComment(n) => &mut n.span,
            Node::StaticProperty(n) => &mut n.span,
        };
        *slot = Some(span);
        self
    }

    /// The ordered children a traversal walks.
    ///
    /// Leaves have none. An insert exposes its embedded code's segments.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::CodeTopLevel(n) => &n.segments,
            Node::HtmlElement(n) => &n.content,
            Node::HtmlInsert(n) => &n.code.segments,
            Node::EmbeddedCode(n) => &n.segments,
            Node::StaticProperty(n) => &n.content,
            Node::CodeText(_) | Node::HtmlText(_) | Node::HtmlComment(_) => &[],
        }
    }

    /// String payload of a leaf, `None` for containers.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::CodeText(n) => Some(&n.text),
            Node::HtmlText(n) => Some(&n.text),
            Node::HtmlComment(n) => Some(&n.text),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let own = match self {
            // the embedded code block is a node in its own right
            Node::HtmlInsert(_) => 2,
            _ => 1,
        };
        own + self.children().iter().map(Node::count).sum::<usize>()
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    pub fn html_text(text: impl Into<String>) -> Self {
        HtmlText::new(text).into()
    }

    pub fn code_text(text: impl Into<String>) -> Self {
        CodeText::new(text).into()
    }

    pub fn comment(text: impl Into<String>) -> Self {
        HtmlComment::new(text).into()
    }

    pub fn element(tag: impl Into<String>, content: Vec<Node>) -> Self {
        HtmlElement::new(tag, content).into()
    }

    pub fn insert(segments: Vec<Node>) -> Self {
        HtmlInsert::new(EmbeddedCode::new(segments)).into()
    }

    pub fn static_property(name: impl Into<String>, content: Vec<Node>) -> Self {
        StaticProperty::new(name, content).into()
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$ty(node)
                }
            }
        )*
    };
}

impl_from_variant!(
    CodeTopLevel,
    HtmlElement,
    HtmlInsert,
    EmbeddedCode,
    CodeText,
    HtmlText,
    HtmlComment,
    StaticProperty,
);

// ══════════════════════════════════════════════════════════════════════════════
// Containers
// ══════════════════════════════════════════════════════════════════════════════

/// Root of a parsed template file: host-language code interleaved with
/// markup elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTopLevel {
    pub segments: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl CodeTopLevel {
    pub fn new(segments: Vec<Node>) -> Self {
        Self {
            segments,
            span: None,
        }
    }

    /// Number of nodes in the whole tree, including the root.
    pub fn count(&self) -> usize {
        1 + self.segments.iter().map(Node::count).sum::<usize>()
    }
}

/// `<tag>content</tag>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlElement {
    pub tag: String,
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl HtmlElement {
    pub fn new(tag: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            content,
            span: None,
        }
    }
}

/// `{ expr }` inside markup. Owns exactly one embedded code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlInsert {
    pub code: EmbeddedCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl HtmlInsert {
    pub fn new(code: EmbeddedCode) -> Self {
        Self { code, span: None }
    }
}

/// Host-language code embedded in markup; its segments may contain further
/// elements, recursively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedCode {
    pub segments: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl EmbeddedCode {
    pub fn new(segments: Vec<Node>) -> Self {
        Self {
            segments,
            span: None,
        }
    }
}

/// A static (non-reactive) property value, e.g. the body of
/// `<pre textContent="  ">`. Whitespace inside it is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticProperty {
    pub name: String,
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl StaticProperty {
    pub fn new(name: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            content,
            span: None,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Leaves
// ══════════════════════════════════════════════════════════════════════════════

/// Raw host-language source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl CodeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }
}

/// Markup text between tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl HtmlText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }
}

/// `<!-- text -->`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlComment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl HtmlComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: None,
        }
    }
}
