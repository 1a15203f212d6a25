//! Caller-facing options and the resolved parameters passed down the
//! pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PreprocessResult;

/// How a source map is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// Return the map alongside the generated source.
    Extract,
    /// Append the map to the generated source as a data URL comment.
    Append,
}

impl fmt::Display for SourceMapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extract => write!(f, "extract"),
            Self::Append => write!(f, "append"),
        }
    }
}

/// Options as given by the caller. Every field may be left out.
///
/// ```
/// use surplus_preprocessor::{Options, SourceMapMode};
///
/// let opts = Options::from_json(r#"{ "sourcemap": "append" }"#).unwrap();
/// let params = opts.resolve();
/// assert_eq!(params.sourcemap, Some(SourceMapMode::Append));
/// assert!(!params.jsx);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// `null` and absent both disable source maps.
    pub sourcemap: Option<SourceMapMode>,
    /// Accept JSX-style attribute syntax.
    pub jsx: Option<bool>,
}

impl Options {
    /// Read options from a JSON object.
    pub fn from_json(json: &str) -> PreprocessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_sourcemap(mut self, mode: SourceMapMode) -> Self {
        self.sourcemap = Some(mode);
        self
    }

    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = Some(jsx);
        self
    }

    /// Fill in defaults.
    pub fn resolve(&self) -> Params {
        Params {
            sourcemap: self.sourcemap,
            jsx: self.jsx.unwrap_or(false),
        }
    }
}

/// Fully resolved options, handed to the parser and code generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub sourcemap: Option<SourceMapMode>,
    pub jsx: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreprocessError;

    #[test]
    fn test_defaults() {
        let params = Options::default().resolve();
        assert_eq!(params, Params { sourcemap: None, jsx: false });
    }

    #[test]
    fn test_from_json_all_fields() {
        let opts = Options::from_json(r#"{"sourcemap":"extract","jsx":true}"#).unwrap();
        assert_eq!(
            opts,
            Options::default()
                .with_sourcemap(SourceMapMode::Extract)
                .with_jsx(true)
        );
        assert_eq!(
            opts.resolve(),
            Params { sourcemap: Some(SourceMapMode::Extract), jsx: true }
        );
    }

    #[test]
    fn test_from_json_null_sourcemap() {
        let opts = Options::from_json(r#"{"sourcemap":null}"#).unwrap();
        assert_eq!(opts.resolve().sourcemap, None);
        assert_eq!(Options::from_json("{}").unwrap(), Options::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = Options::from_json(r#"{"sourcemap":"inline"}"#).unwrap_err();
        assert!(matches!(err, PreprocessError::InvalidOptions(_)));
        assert!(err.to_string().starts_with("invalid preprocess options"));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        let err = Options::from_json(r#"{"jsx":true,"minify":true}"#).unwrap_err();
        assert!(err.to_string().contains("minify"));
    }

    #[test]
    fn test_mode_display_matches_json() {
        for mode in [SourceMapMode::Extract, SourceMapMode::Append] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
