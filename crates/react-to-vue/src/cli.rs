//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, ValueEnum};

/// Converts a React component into a Vue component.
#[derive(Debug, Parser)]
#[command(name = "react-to-vue")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// React component file to convert
    pub input: Utf8PathBuf,

    /// Write the Vue component to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Read props from TypeScript interfaces (default for .ts/.tsx files)
    #[arg(long)]
    pub ts: bool,

    /// Erase Flow annotations before parsing (default with an @flow pragma)
    #[arg(long)]
    pub flow: bool,

    /// Caveat report format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Exit with an error when any caveat is raised
    #[arg(long = "fail-on-caveats")]
    pub fail_on_caveats: bool,

    /// Print the extracted component model as JSON (for debugging)
    #[arg(long = "emit-model")]
    pub emit_model: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Caveat report format.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

impl Args {
    /// The log filter implied by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "react-to-vue",
            "src/Foo.jsx",
            "-o",
            "out/Foo.js",
            "--format",
            "json",
            "--fail-on-caveats",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.input.as_str(), "src/Foo.jsx");
        assert_eq!(args.output.as_deref().map(|p| p.as_str()), Some("out/Foo.js"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.fail_on_caveats);
        assert!(!args.ts);
        assert_eq!(args.log_level(), "trace");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["react-to-vue"]).is_err());
    }
}
