//! The preprocess pipeline.
//!
//! 1. Resolve [`Options`] into [`Params`]
//! 2. Parse the template into a tree
//! 3. Run the shim pass over the tree, if any rule is attached
//! 4. Generate code from the rewritten tree
//! 5. Shape the result for the requested source map mode

use serde::Serialize;
use surplus_shims::ShimRegistry;
use surplus_types::ast::CodeTopLevel;
use tracing::debug;

use crate::error::{PreprocessError, PreprocessResult};
use crate::options::{Options, Params, SourceMapMode};
use crate::source_map::SourceMap;

// ══════════════════════════════════════════════════════════════════════════════
// Collaborators
// ══════════════════════════════════════════════════════════════════════════════

/// Turns template source into a tree.
pub trait TemplateParser {
    fn parse(&self, source: &str, params: &Params) -> PreprocessResult<CodeTopLevel>;
}

/// Turns a (shimmed) tree into code.
///
/// The tree it receives may differ from what the parser produced: nodes can
/// be gone, and inserted nodes have no span.
pub trait CodeGenerator {
    fn generate(&self, tree: &CodeTopLevel, params: &Params) -> PreprocessResult<Generated>;
}

impl<T: TemplateParser + ?Sized> TemplateParser for &T {
    fn parse(&self, source: &str, params: &Params) -> PreprocessResult<CodeTopLevel> {
        (**self).parse(source, params)
    }
}

impl<T: CodeGenerator + ?Sized> CodeGenerator for &T {
    fn generate(&self, tree: &CodeTopLevel, params: &Params) -> PreprocessResult<Generated> {
        (**self).generate(tree, params)
    }
}

/// What a [`CodeGenerator`] hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub src: String,
    /// Required when a source map mode is set, ignored otherwise.
    pub map: Option<SourceMap>,
}

impl Generated {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            map: None,
        }
    }

    pub fn with_map(mut self, map: SourceMap) -> Self {
        self.map = Some(map);
        self
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Output
// ══════════════════════════════════════════════════════════════════════════════

/// Result of preprocessing: plain source, or source plus an extracted map.
///
/// Serializes as a bare string or as `{ "src": ..., "map": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Source(String),
    Mapped { src: String, map: SourceMap },
}

impl Output {
    pub fn src(&self) -> &str {
        match self {
            Output::Source(src) | Output::Mapped { src, .. } => src,
        }
    }

    pub fn map(&self) -> Option<&SourceMap> {
        match self {
            Output::Source(_) => None,
            Output::Mapped { map, .. } => Some(map),
        }
    }

    fn shape(generated: Generated, mode: Option<SourceMapMode>) -> PreprocessResult<Self> {
        let Generated { src, map } = generated;
        match (mode, map) {
            (None, None) => Ok(Output::Source(src)),
            (None, Some(_)) => {
                debug!("dropping source map produced with source maps disabled");
                Ok(Output::Source(src))
            }
            (Some(SourceMapMode::Extract), Some(map)) => Ok(Output::Mapped { src, map }),
            (Some(SourceMapMode::Append), Some(map)) => Ok(Output::Source(map.append_to(&src))),
            (Some(mode), None) => Err(PreprocessError::MissingSourceMap(mode)),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Preprocessor
// ══════════════════════════════════════════════════════════════════════════════

/// A parser, a code generator and the shim registry to run between them.
pub struct Preprocessor<'r, P, G> {
    registry: &'r ShimRegistry,
    parser: P,
    generator: G,
}

impl<'r, P: TemplateParser, G: CodeGenerator> Preprocessor<'r, P, G> {
    pub fn new(registry: &'r ShimRegistry, parser: P, generator: G) -> Self {
        Self {
            registry,
            parser,
            generator,
        }
    }

    /// Preprocess one template.
    pub fn preprocess(&self, source: &str, options: &Options) -> PreprocessResult<Output> {
        let params = options.resolve();
        debug!(
            bytes = source.len(),
            sourcemap = ?params.sourcemap,
            jsx = params.jsx,
            "preprocessing template"
        );

        let mut tree = self.parser.parse(source, &params)?;
        if self.registry.is_shimmed() {
            self.registry.run(&mut tree);
        }

        let generated = self.generator.generate(&tree, &params)?;
        Output::shape(generated, params.sourcemap)
    }

    /// Like [`preprocess`](Self::preprocess), with options given as JSON.
    pub fn preprocess_json(&self, source: &str, options: &str) -> PreprocessResult<Output> {
        let options = Options::from_json(options)?;
        self.preprocess(source, &options)
    }
}

/// Preprocess one template with the process-wide registry (see
/// [`crate::install`]).
pub fn preprocess<P, G>(
    parser: &P,
    generator: &G,
    source: &str,
    options: &Options,
) -> PreprocessResult<Output>
where
    P: TemplateParser + ?Sized,
    G: CodeGenerator + ?Sized,
{
    Preprocessor::new(crate::installed(), parser, generator).preprocess(source, options)
}
