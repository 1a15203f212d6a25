//! Target profiles: what the execution target does to parsed markup.
//!
//! Probing a real target is the caller's job. The result is handed in as a
//! [`TargetProfile`] and turned into an ordered list of shim rules.

use serde::{Deserialize, Serialize};
use surplus_shims::{RuleId, ShimRegistry};

/// Markup-handling capabilities of an execution target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetProfile {
    /// Whitespace-only text nodes survive markup parsing (old IE drops them).
    pub preserves_whitespace_text_nodes: bool,
    /// A comment as the first child of an element survives (old IE drops it).
    pub preserves_initial_comments: bool,
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self {
            preserves_whitespace_text_nodes: true,
            preserves_initial_comments: true,
        }
    }
}

impl TargetProfile {
    /// A target that loses both whitespace-only text and leading comments.
    pub fn legacy() -> Self {
        Self {
            preserves_whitespace_text_nodes: false,
            preserves_initial_comments: false,
        }
    }

    /// Rules to attach for this target, in attachment order.
    pub fn rules(&self) -> Vec<RuleId> {
        let mut rules = vec![RuleId::StripWhitespaceText];
        if !self.preserves_whitespace_text_nodes {
            rules.push(RuleId::PreserveWhitespaceText);
        }
        if !self.preserves_initial_comments {
            rules.push(RuleId::MarkInitialComments);
        }
        rules
    }

    pub fn registry(&self) -> ShimRegistry {
        ShimRegistry::with_rules(&self.rules())
    }
}
