//! Preprocessor error types.

use thiserror::Error;

/// Errors surfaced by [`crate::preprocess`].
///
/// The shim pass itself cannot fail; everything here comes from the
/// options, the parser or the code generator.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// The options JSON could not be read.
    #[error("invalid preprocess options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// The template parser rejected the source.
    #[error("parse error: {0}")]
    Parse(String),

    /// The code generator failed on the shimmed tree.
    #[error("code generation error: {0}")]
    Codegen(String),

    /// A source map was requested but the generator produced none.
    #[error("source map mode '{0}' requires the code generator to produce a map")]
    MissingSourceMap(crate::SourceMapMode),
}

/// Preprocessor result type alias.
pub type PreprocessResult<T> = Result<T, PreprocessError>;
