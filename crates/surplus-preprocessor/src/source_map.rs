//! Source map output: generated JavaScript back to template source.
//!
//! The map follows the revision 3 layout. Its `mappings` string is produced
//! by the code generator; this module only carries it and renders it the
//! way the chosen [`SourceMapMode`](crate::SourceMapMode) asks for.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Bytes `encodeURIComponent` leaves alone, so appended maps match what
/// browser tooling expects.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DATA_URL_PREFIX: &str = "data:application/json,";

/// A revision 3 source map for one preprocessed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    pub file: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// A map for a single template source.
    pub fn new(
        file: impl Into<String>,
        source_name: impl Into<String>,
        source_content: impl Into<String>,
        mappings: impl Into<String>,
    ) -> Self {
        Self {
            version: 3,
            file: file.into(),
            sources: vec![source_name.into()],
            sources_content: vec![source_content.into()],
            names: Vec::new(),
            mappings: mappings.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The map as a percent-encoded `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "{DATA_URL_PREFIX}{}",
            utf8_percent_encode(&self.to_json(), URI_COMPONENT)
        )
    }

    /// `src` followed by a `sourceMappingURL` comment carrying this map.
    pub fn append_to(&self, src: &str) -> String {
        format!("{src}\n//# sourceMappingURL={}", self.to_data_url())
    }
}
