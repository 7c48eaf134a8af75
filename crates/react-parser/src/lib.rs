//! Front end for react-to-vue.
//!
//! This crate turns raw component source into a syntax tree the analyzer can
//! walk:
//! - [`preprocess`] cleans the text (function-bind, CRLF, optional Flow erasure)
//! - [`parse`] runs swc's TypeScript grammar with TSX and decorators
//! - [`repair`] applies the two tree repairs
//!
//! # Example
//!
//! ```
//! use react_parser::{parse_component, PreprocessOptions};
//!
//! let source = r#"
//! import React from 'react';
//!
//! export default class Hello extends React.Component {
//!   handle = () => this.setState({ clicked: true });
//!   render() {
//!     return <button onClick={::this.handle}>{this.props.label}</button>;
//!   }
//! }
//! "#;
//!
//! let parsed = parse_component(source, PreprocessOptions::default()).unwrap();
//! assert_eq!(parsed.module.body.len(), 2);
//! ```

mod error;
mod parser;
mod preprocess;
mod repair;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, ParsedModule};
pub use preprocess::{
    erase_flow_syntax, literal_line_starts, preprocess, remove_bad_code, PreprocessOptions,
};
pub use repair::{drop_spurious_trailing_comments, normalize_arrow_fields, repair};

/// Preprocesses, parses and repairs `raw` in one go.
pub fn parse_component(raw: &str, options: PreprocessOptions) -> Result<ParsedModule, ParseError> {
    let cleaned = preprocess(raw, options);
    let mut parsed = parse(cleaned)?;
    repair(&mut parsed);
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_component_empty() {
        let parsed = parse_component("", PreprocessOptions::default()).unwrap();
        assert!(parsed.module.body.is_empty());
    }

    #[test]
    fn test_flow_source_parses_after_erasure() {
        let source = "// @flow\ntype Props = {| +label: string, size?: ?number |};\nfunction Tag(props: Props) { return <b>{props.label}</b>; }\n";
        assert!(parse_component(source, PreprocessOptions::default()).is_err());
        let parsed = parse_component(source, PreprocessOptions { flow: true }).unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }
}
