//! Rule registry and the traversal that applies it.
//!
//! Each node kind owns a chain of rules. Visiting a node runs its chain from
//! the most recently attached rule backwards; the first rule that prunes
//! ends the chain. If no rule prunes, the kind's built-in behaviour runs
//! last, which for containers is the walk over their children.

use std::fmt;

use surplus_types::ast::*;
use tracing::{debug, trace, warn};

use crate::context::{Edits, ParentRef, ShimContext};

/// A rewrite rule for nodes of kind `T`.
pub type Rule<T> = Box<dyn Fn(&mut T, &mut ShimContext<'_>) + Send + Sync>;

// ══════════════════════════════════════════════════════════════════════════════
// Registry
// ══════════════════════════════════════════════════════════════════════════════

/// Per-kind rule chains.
///
/// Built once before any pass runs and only read afterwards. Attaching the
/// same rule twice composes it twice; nothing is deduplicated.
#[derive(Default)]
pub struct ShimRegistry {
    top_level: Vec<Rule<CodeTopLevel>>,
    element: Vec<Rule<HtmlElement>>,
    insert: Vec<Rule<HtmlInsert>>,
    embedded_code: Vec<Rule<EmbeddedCode>>,
    code_text: Vec<Rule<CodeText>>,
    html_text: Vec<Rule<HtmlText>>,
    comment: Vec<Rule<HtmlComment>>,
    static_property: Vec<Rule<StaticProperty>>,
}

impl ShimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with the given built-in rules attached in order.
    pub fn with_rules(rules: &[crate::RuleId]) -> Self {
        let mut registry = Self::new();
        for rule in rules {
            rule.attach(&mut registry);
        }
        registry
    }

    /// Attach `rule` to the kind `T`.
    ///
    /// It runs ahead of every rule already attached to `T` and can keep them
    /// from running by pruning the node.
    pub fn shim<T, F>(&mut self, rule: F) -> &mut Self
    where
        T: Shimmable,
        F: Fn(&mut T, &mut ShimContext<'_>) + Send + Sync + 'static,
    {
        let kind = T::KIND;
        let chain = T::chain_mut(self);
        chain.push(Box::new(rule));
        debug!(%kind, depth = chain.len(), "attached shim rule");
        self
    }

    /// Whether any rule has been attached.
    pub fn is_shimmed(&self) -> bool {
        NodeKind::ALL.iter().any(|&kind| self.rule_count(kind) > 0)
    }

    /// Length of the rule chain attached to `kind`.
    pub fn rule_count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::CodeTopLevel => self.top_level.len(),
            NodeKind::HtmlElement => self.element.len(),
            NodeKind::HtmlInsert => self.insert.len(),
            NodeKind::EmbeddedCode => self.embedded_code.len(),
            NodeKind::CodeText => self.code_text.len(),
            NodeKind::HtmlText => self.html_text.len(),
            NodeKind::HtmlComment => self.comment.len(),
            NodeKind::StaticProperty => self.static_property.len(),
        }
    }

    /// Run one pass over `tree`, rewriting it in place.
    ///
    /// The root itself cannot be removed or given siblings; such edits
    /// requested by a root rule are dropped with a warning.
    pub fn run(&self, tree: &mut CodeTopLevel) -> ShimStats {
        debug!(nodes = tree.count(), "starting shim pass");
        let mut pass = ShimPass::new(self);
        let mut ctx = ShimContext::root();
        pass.visit(tree, &mut ctx);

        let edits = ctx.into_edits();
        if !edits.is_empty() {
            warn!(
                prune = edits.prune,
                before = edits.before.len(),
                after = edits.after.len(),
                "ignoring edits requested on the template root"
            );
        }

        let stats = pass.stats;
        debug!(
            visited = stats.visited,
            pruned = stats.pruned,
            inserted = stats.inserted,
            "finished shim pass"
        );
        stats
    }
}

impl fmt::Debug for ShimRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in NodeKind::ALL {
            let count = self.rule_count(kind);
            if count > 0 {
                map.entry(&kind.name(), &count);
            }
        }
        map.finish()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Shimmable
// ══════════════════════════════════════════════════════════════════════════════

/// A node type rules can be attached to.
///
/// Implemented for every node struct in [`surplus_types::ast`].
pub trait Shimmable: Sized + 'static {
    const KIND: NodeKind;

    fn chain(registry: &ShimRegistry) -> &[Rule<Self>];

    fn chain_mut(registry: &mut ShimRegistry) -> &mut Vec<Rule<Self>>;

    /// Behaviour that runs once no attached rule has pruned the node.
    fn walk(&mut self, pass: &mut ShimPass<'_>, ctx: &mut ShimContext<'_>);
}

macro_rules! chain_accessors {
    ($field:ident) => {
        fn chain(registry: &ShimRegistry) -> &[Rule<Self>] {
            &registry.$field
        }

        fn chain_mut(registry: &mut ShimRegistry) -> &mut Vec<Rule<Self>> {
            &mut registry.$field
        }
    };
}

impl Shimmable for CodeTopLevel {
    const KIND: NodeKind = NodeKind::CodeTopLevel;
    chain_accessors!(top_level);

    fn walk(&mut self, pass: &mut ShimPass<'_>, _ctx: &mut ShimContext<'_>) {
        pass.shim_siblings(ParentRef::TopLevel, &mut self.segments);
    }
}

impl Shimmable for HtmlElement {
    const KIND: NodeKind = NodeKind::HtmlElement;
    chain_accessors!(element);

    fn walk(&mut self, pass: &mut ShimPass<'_>, _ctx: &mut ShimContext<'_>) {
        let HtmlElement { tag, content, .. } = self;
        pass.shim_siblings(ParentRef::Element { tag: tag.as_str() }, content);
    }
}

impl Shimmable for HtmlInsert {
    const KIND: NodeKind = NodeKind::HtmlInsert;
    chain_accessors!(insert);

    /// The embedded code shares the insert's context: pruning it removes the
    /// whole insert from the enclosing element.
    fn walk(&mut self, pass: &mut ShimPass<'_>, ctx: &mut ShimContext<'_>) {
        pass.visit(&mut self.code, ctx);
    }
}

impl Shimmable for EmbeddedCode {
    const KIND: NodeKind = NodeKind::EmbeddedCode;
    chain_accessors!(embedded_code);

    fn walk(&mut self, pass: &mut ShimPass<'_>, _ctx: &mut ShimContext<'_>) {
        pass.shim_siblings(ParentRef::EmbeddedCode, &mut self.segments);
    }
}

impl Shimmable for StaticProperty {
    const KIND: NodeKind = NodeKind::StaticProperty;
    chain_accessors!(static_property);

    fn walk(&mut self, pass: &mut ShimPass<'_>, _ctx: &mut ShimContext<'_>) {
        let StaticProperty { name, content, .. } = self;
        pass.shim_siblings(ParentRef::StaticProperty { name: name.as_str() }, content);
    }
}

macro_rules! leaf_shimmable {
    ($($ty:ident => $field:ident),* $(,)?) => {
        $(
            impl Shimmable for $ty {
                const KIND: NodeKind = NodeKind::$ty;
                chain_accessors!($field);

                fn walk(&mut self, _pass: &mut ShimPass<'_>, _ctx: &mut ShimContext<'_>) {}
            }
        )*
    };
}

leaf_shimmable!(
    CodeText => code_text,
    HtmlText => html_text,
    HtmlComment => comment,
);

// ══════════════════════════════════════════════════════════════════════════════
// Pass
// ══════════════════════════════════════════════════════════════════════════════

/// Counters for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShimStats {
    /// Rule chains run, one per node visit.
    pub visited: usize,
    pub pruned: usize,
    pub inserted: usize,
}

/// A traversal in progress. Created by [`ShimRegistry::run`].
pub struct ShimPass<'r> {
    registry: &'r ShimRegistry,
    stats: ShimStats,
}

impl<'r> ShimPass<'r> {
    fn new(registry: &'r ShimRegistry) -> Self {
        Self {
            registry,
            stats: ShimStats::default(),
        }
    }

    /// Run `node`'s rule chain, then its built-in walk unless pruned.
    pub fn visit<T: Shimmable>(&mut self, node: &mut T, ctx: &mut ShimContext<'_>) {
        self.stats.visited += 1;
        let registry = self.registry;
        for rule in T::chain(registry).iter().rev() {
            rule(node, ctx);
            if ctx.is_pruned() {
                return;
            }
        }
        node.walk(self, ctx);
    }

    fn visit_node(&mut self, node: &mut Node, ctx: &mut ShimContext<'_>) {
        match node {
            Node::CodeTopLevel(n) => self.visit(n, ctx),
            Node::HtmlElement(n) => self.visit(n, ctx),
            Node::HtmlInsert(n) => self.visit(n, ctx),
            Node::EmbeddedCode(n) => self.visit(n, ctx),
            Node::CodeText(n) => self.visit(n, ctx),
            Node::HtmlText(n) => self.visit(n, ctx),
            Node::HtmlComment(n) => self.visit(n, ctx),
            Node::StaticProperty(n) => self.visit(n, ctx),
        }
    }

    /// Visit every child of a container in order, applying edits as they
    /// are requested.
    fn shim_siblings(&mut self, parent: ParentRef<'_>, siblings: &mut Vec<Node>) {
        let mut index = 0;
        while index < siblings.len() {
            index = self.shim_at(parent, siblings, index);
        }
    }

    /// Visit `siblings[index]` and apply its edits. Returns the index of the
    /// next node to visit.
    fn shim_at(&mut self, parent: ParentRef<'_>, siblings: &mut Vec<Node>, index: usize) -> usize {
        let edits: Edits = {
            let (before, rest) = siblings.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                return index;
            };
            let mut ctx = ShimContext::new(index, parent, before, after);
            self.visit_node(current, &mut ctx);
            ctx.into_edits()
        };

        // `cursor` tracks the visited node. An inserted-before node's own
        // edits all land in front of it, so it moves by however much the
        // sequence grew.
        let mut cursor = index;
        for node in edits.before {
            trace!(kind = %node.kind(), index = cursor, "inserting node before");
            self.stats.inserted += 1;
            let len = siblings.len();
            siblings.insert(cursor, node);
            self.shim_at(parent, siblings, cursor);
            cursor += siblings.len() - len;
        }

        for node in edits.after {
            trace!(kind = %node.kind(), index = cursor + 1, "inserting node after");
            self.stats.inserted += 1;
            siblings.insert(cursor + 1, node);
        }

        if edits.prune {
            let removed = siblings.remove(cursor);
            trace!(kind = %removed.kind(), index = cursor, "pruned node");
            self.stats.pruned += 1;
            // the next sibling has shifted into `cursor`
            cursor
        } else {
            cursor + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_registry_is_not_shimmed() {
        let registry = ShimRegistry::new();
        assert!(!registry.is_shimmed());
        assert_eq!(format!("{registry:?}"), "{}");
    }

    #[test]
    fn test_attach_counts_per_kind() {
        let mut registry = ShimRegistry::new();
        registry
            .shim::<HtmlText, _>(|_, _| {})
            .shim::<HtmlText, _>(|_, _| {})
            .shim::<HtmlComment, _>(|_, _| {});
        assert!(registry.is_shimmed());
        assert_eq!(registry.rule_count(NodeKind::HtmlText), 2);
        assert_eq!(registry.rule_count(NodeKind::HtmlComment), 1);
        assert_eq!(registry.rule_count(NodeKind::HtmlElement), 0);
        assert_eq!(
            format!("{registry:?}"),
            r#"{"html-text": 2, "html-comment": 1}"#
        );
    }

    #[test]
    fn test_empty_registry_visits_every_node_once() {
        let mut tree = CodeTopLevel::new(vec![
            Node::code_text("let a = "),
            Node::element(
                "div",
                vec![
                    Node::html_text(" "),
                    Node::insert(vec![Node::code_text("x")]),
                    Node::static_property("title", vec![Node::html_text("t")]),
                ],
            ),
        ]);
        let before = tree.clone();
        let stats = ShimRegistry::new().run(&mut tree);
        assert_eq!(stats.visited, tree.count());
        assert_eq!(stats.pruned, 0);
        assert_eq!(stats.inserted, 0);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_root_edits_are_ignored() {
        let mut registry = ShimRegistry::new();
        registry.shim::<CodeTopLevel, _>(|_, ctx| {
            ctx.insert_after(Node::html_text("x"));
        });
        let mut tree = CodeTopLevel::new(vec![Node::code_text("a")]);
        let stats = registry.run(&mut tree);
        assert_eq!(stats.inserted, 0);
        assert_eq!(tree.segments, vec![Node::code_text("a")]);
    }

    #[test]
    fn test_pruned_root_skips_walk() {
        let mut registry = ShimRegistry::new();
        registry.shim::<CodeTopLevel, _>(|_, ctx| ctx.prune());
        let mut tree = CodeTopLevel::new(vec![Node::code_text("a")]);
        let stats = registry.run(&mut tree);
        assert_eq!(stats.visited, 1);
        assert_eq!(tree.segments.len(), 1);
    }
}
