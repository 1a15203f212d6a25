//! Built-in shim rules.
//!
//! Each rule works around a target that loses markup when the generated
//! code assigns it through `innerHTML`-style parsing. Which of them to
//! attach is decided by the caller, usually from a target profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use surplus_types::ast::{HtmlComment, HtmlText};
use thiserror::Error;

use crate::ShimRegistry;

/// Zero-width no-break space. Not whitespace, so a text leaf prefixed with it
/// survives targets that drop whitespace-only text.
pub const ZERO_WIDTH_MARKER: char = '\u{FEFF}';

/// `true` when every char of `text` is whitespace. The empty string counts.
///
/// Follows `char::is_whitespace` minus U+0085 (NEL), which markup treats as
/// ordinary text. [`ZERO_WIDTH_MARKER`] is never whitespace.
pub fn is_whitespace_only(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() && c != '\u{0085}')
}

/// Remove whitespace-only markup text, except directly inside a static
/// property where whitespace is part of the value.
pub fn strip_whitespace_text(registry: &mut ShimRegistry) {
    registry.shim::<HtmlText, _>(|text, ctx| {
        if is_whitespace_only(&text.text) && !ctx.parent().is_static_property() {
            ctx.prune();
        }
    });
}

/// Prefix whitespace-only markup text with [`ZERO_WIDTH_MARKER`] so targets
/// that collapse such leaves keep them.
///
/// Attached after [`strip_whitespace_text`], it runs first and the marked
/// leaf is no longer whitespace-only, so it is kept.
pub fn preserve_whitespace_text(registry: &mut ShimRegistry) {
    registry.shim::<HtmlText, _>(|text, ctx| {
        if is_whitespace_only(&text.text) && !ctx.parent().is_static_property() {
            text.text.insert(0, ZERO_WIDTH_MARKER);
        }
    });
}

/// Put a marker text leaf in front of a comment that is the first child of
/// its container, for targets that drop leading comments.
pub fn mark_initial_comments(registry: &mut ShimRegistry) {
    registry.shim::<HtmlComment, _>(|_, ctx| {
        if ctx.index() == 0 {
            ctx.insert_before(HtmlText::new(ZERO_WIDTH_MARKER.to_string()));
        }
    });
}

// ══════════════════════════════════════════════════════════════════════════════
// Rule identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// Names a built-in rule so rule sets can be passed around as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    StripWhitespaceText,
    PreserveWhitespaceText,
    MarkInitialComments,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::StripWhitespaceText,
        RuleId::PreserveWhitespaceText,
        RuleId::MarkInitialComments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleId::StripWhitespaceText => "strip-whitespace-text",
            RuleId::PreserveWhitespaceText => "preserve-whitespace-text",
            RuleId::MarkInitialComments => "mark-initial-comments",
        }
    }

    pub fn attach(self, registry: &mut ShimRegistry) {
        match self {
            RuleId::StripWhitespaceText => strip_whitespace_text(registry),
            RuleId::PreserveWhitespaceText => preserve_whitespace_text(registry),
            RuleId::MarkInitialComments => mark_initial_comments(registry),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule name that matches no built-in rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shim rule: {0}")]
pub struct UnknownRule(pub String);

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}
