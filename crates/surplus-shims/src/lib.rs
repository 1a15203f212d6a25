//! Surplus shim pass.
//!
//! Rewrites a parsed template tree in place so the generated code behaves the
//! same on targets that mangle certain markup (whitespace-only text, leading
//! comments). Rules attach to a node kind in a [`ShimRegistry`], compose
//! last-attached-first, and run in a single depth-first [`ShimRegistry::run`].
//!
//! ```
//! use surplus_shims::{RuleId, ShimRegistry};
//! use surplus_types::ast::{CodeTopLevel, Node};
//!
//! let registry = ShimRegistry::with_rules(&[RuleId::StripWhitespaceText]);
//! let mut tree = CodeTopLevel::new(vec![Node::element(
//!     "ul",
//!     vec![Node::html_text("  "), Node::element("li", vec![])],
//! )]);
//!
//! let stats = registry.run(&mut tree);
//! assert_eq!(stats.pruned, 1);
//! assert_eq!(tree.segments[0].children().len(), 1);
//! ```
//!
//! Rules only edit the tree through the [`ShimContext`] they are handed:
//! [`prune`](ShimContext::prune), [`insert_before`](ShimContext::insert_before)
//! and [`insert_after`](ShimContext::insert_after). A rule must never insert
//! a node that would trigger itself again; the pass does not guard against it.

mod context;
mod registry;
pub mod rules;

pub use context::{ParentRef, ShimContext};
pub use registry::{Rule, ShimPass, ShimRegistry, ShimStats, Shimmable};
pub use rules::{RuleId, UnknownRule, ZERO_WIDTH_MARKER};
