//! Surplus preprocessor: the entry point around the shim pass.
//!
//! ```text
//! template source → TemplateParser → shim pass → CodeGenerator → Output
//! ```
//!
//! Parsing and code generation are supplied by the caller through
//! [`TemplateParser`] and [`CodeGenerator`]. Which shim rules run is decided
//! by a [`TargetProfile`], resolved once per process by [`install`].

mod error;
mod global;
mod options;
mod preprocess;
mod profile;
pub mod source_map;

pub use error::{PreprocessError, PreprocessResult};
pub use global::{install, installed};
pub use options::{Options, Params, SourceMapMode};
pub use preprocess::{preprocess, CodeGenerator, Generated, Output, Preprocessor, TemplateParser};
pub use profile::TargetProfile;
pub use source_map::SourceMap;
