//! The parse, analyze and generate pipeline.

use crate::generate::generate;
use react_analyzer::{analyze, AnalyzeError, AnalyzeOptions, CaveatLog, ComponentModel};
use react_parser::{parse_component, ParseError, PreprocessOptions};
use thiserror::Error;
use tracing::debug;

/// Options for transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// The source is TypeScript; props come from interfaces and type aliases.
    pub ts: bool,
    /// The source carries Flow annotations, erased before parsing.
    pub flow: bool,
}

/// The result of transformation.
#[derive(Debug)]
pub struct TransformResult {
    /// The generated Vue component source.
    pub output_text: String,
    /// Everything that did not translate cleanly.
    pub caveats: CaveatLog,
}

/// A fatal transformation error. No output is produced.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Builds the component model of `source` without generating output.
pub fn build_model(source: &str, options: TransformOptions) -> Result<ComponentModel, TransformError> {
    let parsed = parse_component(source, PreprocessOptions { flow: options.flow })?;
    let model = analyze(&parsed, AnalyzeOptions { ts: options.ts })?;
    Ok(model)
}

/// Transforms a React component source into a Vue component.
pub fn transform(source: &str, options: TransformOptions) -> Result<TransformResult, TransformError> {
    let model = build_model(source, options)?;
    let output_text = generate(&model);
    debug!(
        bytes = output_text.len(),
        caveats = model.caveats.len(),
        "transformed component"
    );
    Ok(TransformResult {
        output_text,
        caveats: model.caveats,
    })
}
