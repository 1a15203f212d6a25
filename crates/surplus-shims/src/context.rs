//! Per-visit mutation context handed to shim rules.

use surplus_types::ast::{Node, NodeKind};

/// The container whose child is being visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef<'a> {
    /// The visited node is the template root and has no parent.
    Root,
    TopLevel,
    Element { tag: &'a str },
    EmbeddedCode,
    StaticProperty { name: &'a str },
}

impl ParentRef<'_> {
    /// Kind of the parent container, `None` at the root.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            ParentRef::Root => None,
            ParentRef::TopLevel => Some(NodeKind::CodeTopLevel),
            ParentRef::Element { .. } => Some(NodeKind::HtmlElement),
            ParentRef::EmbeddedCode => Some(NodeKind::EmbeddedCode),
            ParentRef::StaticProperty { .. } => Some(NodeKind::StaticProperty),
        }
    }

    pub fn is_static_property(&self) -> bool {
        matches!(self, ParentRef::StaticProperty { .. })
    }
}

/// Handle a rule receives while one node is visited.
///
/// Exposes the node's position among its siblings and the edit primitives.
/// Edits are queued here and applied by the pass once the node's whole rule
/// chain has run, so rules never touch the sibling `Vec` themselves. A
/// context lives for exactly one visit.
#[derive(Debug)]
pub struct ShimContext<'a> {
    index: usize,
    parent: ParentRef<'a>,
    before: &'a [Node],
    after: &'a [Node],
    pruned: bool,
    insert_before: Vec<Node>,
    insert_after: Vec<Node>,
}

/// Edits collected by a finished visit.
#[derive(Debug, Default)]
pub(crate) struct Edits {
    pub(crate) prune: bool,
    pub(crate) before: Vec<Node>,
    pub(crate) after: Vec<Node>,
}

impl Edits {
    pub(crate) fn is_empty(&self) -> bool {
        !self.prune && self.before.is_empty() && self.after.is_empty()
    }
}

impl<'a> ShimContext<'a> {
    pub(crate) fn new(
        index: usize,
        parent: ParentRef<'a>,
        before: &'a [Node],
        after: &'a [Node],
    ) -> Self {
        Self {
            index,
            parent,
            before,
            after,
            pruned: false,
            insert_before: Vec::new(),
            insert_after: Vec::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(0, ParentRef::Root, &[], &[])
    }

    pub(crate) fn into_edits(self) -> Edits {
        Edits {
            prune: self.pruned,
            before: self.insert_before,
            after: self.insert_after,
        }
    }

    // ── Position ──────────────────────────────────────────────────────────────

    /// Index of the visited node in its parent's child sequence.
    ///
    /// Nodes queued with [`insert_before`](Self::insert_before) shift this
    /// forward, as they will sit in front of the node once applied.
    pub fn index(&self) -> usize {
        self.index + self.insert_before.len()
    }

    pub fn parent(&self) -> ParentRef<'a> {
        self.parent
    }

    /// Siblings preceding the visited node, as they stood when the visit began.
    pub fn siblings_before(&self) -> &'a [Node] {
        self.before
    }

    /// Siblings following the visited node, as they stood when the visit began.
    pub fn siblings_after(&self) -> &'a [Node] {
        self.after
    }

    pub fn previous_sibling(&self) -> Option<&'a Node> {
        self.before.last()
    }

    pub fn next_sibling(&self) -> Option<&'a Node> {
        self.after.first()
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    /// Remove the visited node from its parent.
    ///
    /// Rules attached earlier for this kind are skipped, and so is the walk
    /// into the node's own children.
    pub fn prune(&mut self) {
        self.pruned = true;
    }

    pub fn is_pruned(&self) -> bool {
        self.pruned
    }

    /// Place `node` directly in front of the visited node.
    ///
    /// The inserted node is visited once the current node's visit completes,
    /// including the walk into its children, and before the pass moves on.
    /// Anything that visit inserts after itself lands in front of the
    /// current node and is not visited.
    pub fn insert_before(&mut self, node: impl Into<Node>) {
        self.insert_before.push(node.into());
    }

    /// Place `node` directly after the visited node.
    ///
    /// It is not visited here; the pass reaches it as the next sibling.
    /// Several calls in one visit each land right after the visited node, so
    /// the last one inserted ends up nearest.
    pub fn insert_after(&mut self, node: impl Into<Node>) {
        self.insert_after.push(node.into());
    }
}
