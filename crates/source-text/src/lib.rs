//! Source text utilities shared by every react-to-vue stage.
//!
//! The parser hands out byte spans into the cleaned source, the analyzer
//! records them next to the code it slices, and the generator patches those
//! slices with [`TextEdit`]s. Line/column lookup is only needed for
//! diagnostics.

mod edit;
mod line_index;
mod span;

pub use edit::{apply_edits, TextEdit};
pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
