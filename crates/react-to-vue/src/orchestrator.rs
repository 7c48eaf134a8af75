//! Runs one conversion from the command line.

use crate::cli::Args;
use crate::config::{resolve, ProjectConfig};
use crate::output::Formatter;
use camino::Utf8Path;
use miette::{Diagnostic, IntoDiagnostic, NamedSource, Result, SourceSpan, WrapErr};
use react_parser::{preprocess, PreprocessOptions};
use source_text::Span;
use std::fs;
use thiserror::Error;
use tracing::{debug, info};
use vue_transformer::{build_model, generate, TransformError, TransformOptions};

/// What a run produced, for the exit code.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub caveat_count: usize,
    pub fail_on_caveats: bool,
}

impl RunSummary {
    pub fn failed(&self) -> bool {
        self.fail_on_caveats && self.caveat_count > 0
    }
}

/// A fatal error pointing into the input file.
#[derive(Debug, Error, Diagnostic)]
pub enum FatalError {
    #[error("{message}")]
    #[diagnostic(
        code(react_to_vue::parse),
        help("the file must parse as JSX or TSX; pass --flow for Flow sources")
    )]
    Parse {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("{message}")]
    #[diagnostic(
        code(react_to_vue::multiple_components),
        help("split the file so that each holds a single class component")
    )]
    MultipleComponents {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("second class component")]
        span: SourceSpan,
    },
}

impl FatalError {
    /// Attaches the cleaned source the error's span points into.
    fn new(err: TransformError, path: &Utf8Path, raw: &str, options: TransformOptions) -> Self {
        let cleaned = preprocess(raw, PreprocessOptions { flow: options.flow });
        let src = NamedSource::new(path.as_str(), cleaned);
        match err {
            TransformError::Parse(err) => FatalError::Parse {
                message: err.to_string(),
                span: source_span(err.span),
                src,
            },
            TransformError::Analyze(err) => FatalError::MultipleComponents {
                span: source_span(err.span()),
                message: err.to_string(),
                src,
            },
        }
    }
}

fn source_span(span: Span) -> SourceSpan {
    (span.start_usize(), span.end_usize() - span.start_usize()).into()
}

/// Converts `args.input`, writes the Vue component and reports caveats.
pub fn run(args: &Args) -> Result<RunSummary> {
    let raw = fs::read_to_string(&args.input)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", args.input))?;

    let dir = args
        .input
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or(Utf8Path::new("."));
    let config = match ProjectConfig::discover(dir)? {
        Some((_, config)) => config,
        None => ProjectConfig::default(),
    };
    let resolved = resolve(args, &config, &raw);
    let options = resolved.transform;
    debug!(input = %args.input, ts = options.ts, flow = options.flow, "resolved options");

    let model = build_model(&raw, options)
        .map_err(|err| FatalError::new(err, &args.input, &raw, options))?;

    if args.emit_model {
        let json = serde_json::to_string_pretty(&model).into_diagnostic()?;
        println!("{json}");
    }

    let output_text = generate(&model);
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
                fs::create_dir_all(parent)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("failed to create {parent}"))?;
            }
            fs::write(path, &output_text)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to write {path}"))?;
            info!(output = %path, "wrote Vue component");
        }
        None if !args.emit_model => print!("{output_text}"),
        None => {}
    }

    let caveats = model.caveats.into_vec();
    if !caveats.is_empty() {
        let formatter = Formatter::new(args.format);
        eprint!("{}", formatter.format(&caveats, &args.input, &model.source_text));
    }

    Ok(RunSummary {
        caveat_count: caveats.len(),
        fail_on_caveats: resolved.fail_on_caveats,
    })
}
