//! Caveat report formatting.

use crate::cli::OutputFormat;
use camino::Utf8Path;
use react_analyzer::Caveat;
use serde::Serialize;
use source_text::{ByteOffset, LineCol, LineIndex};

/// A caveat ready for JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedCaveat {
    /// The caveat code, e.g. `ambiguous-prop-type`.
    pub code: String,
    pub message: String,
    pub filename: String,
    /// Absent for caveats about the file as a whole.
    pub start: Option<Position>,
    pub end: Option<Position>,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

/// Formats caveats for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a run's caveats. `source` is the text the caveat spans point
    /// into.
    pub fn format(&self, caveats: &[Caveat], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(caveats, file_path, source),
            OutputFormat::Json => {
                let formatted = Self::format_json_caveats(caveats, file_path, source);
                serde_json::to_string_pretty(&formatted).unwrap_or_default()
            }
        }
    }

    fn format_human(caveats: &[Caveat], file_path: &Utf8Path, source: &str) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for caveat in caveats {
            match caveat.span {
                Some(span) => {
                    let start = line_index.line_col(span.start).unwrap_or(LineCol::new(0, 0));
                    output.push_str(&format!(
                        "{}:{}:{}\n",
                        file_path,
                        start.line + 1,
                        start.col + 1
                    ));
                }
                None => output.push_str(&format!("{file_path}\n")),
            }
            output.push_str(&format!("Caveat: {} ({})\n\n", caveat.message, caveat.code));
        }

        output.push_str(&summary(caveats.len()));
        output.push('\n');
        output
    }

    /// Formats caveats into JSON-ready structs.
    pub fn format_json_caveats(
        caveats: &[Caveat],
        file_path: &Utf8Path,
        source: &str,
    ) -> Vec<FormattedCaveat> {
        let line_index = LineIndex::new(source);
        let position = |offset: ByteOffset| {
            let at = line_index.line_col(offset).unwrap_or(LineCol::new(0, 0));
            Position {
                line: at.line + 1,
                column: at.col + 1,
                offset: u32::from(offset),
            }
        };

        caveats
            .iter()
            .map(|caveat| FormattedCaveat {
                code: caveat.code.to_string(),
                message: caveat.message.clone(),
                filename: file_path.to_string(),
                start: caveat.span.map(|span| position(span.start)),
                end: caveat.span.map(|span| position(span.end)),
            })
            .collect()
    }
}

/// The closing summary line.
pub fn summary(count: usize) -> String {
    let word = if count == 1 { "caveat" } else { "caveats" };
    format!("react-to-vue raised {count} {word}")
}
