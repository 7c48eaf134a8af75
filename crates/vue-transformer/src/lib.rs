//! React to Vue component transformation.
//!
//! This crate turns a single React component source file into a Vue 2
//! options-API component. It:
//! - cleans and parses the source (`react-parser`)
//! - extracts a component model (`react-analyzer`)
//! - emits the `export default { ... }` object with props, state, hooks and
//!   a render function, rewriting instance access on the way
//!
//! Anything that does not translate cleanly is reported as a caveat next to
//! the output, never as an error.
//!
//! # Example
//!
//! ```
//! use vue_transformer::{transform, TransformOptions};
//!
//! let source = r#"
//! import PropTypes from 'prop-types';
//!
//! function Counter(props) {
//!   return <span>{props.count}</span>;
//! }
//! Counter.propTypes = { count: PropTypes.number.isRequired };
//! "#;
//!
//! let result = transform(source, TransformOptions::default()).unwrap();
//! assert!(result.output_text.contains("count: { type: Number, required: true }"));
//! assert!(result.caveats.is_empty());
//! ```

mod generate;
mod layout;
mod props;
mod transform;

pub use generate::generate;
pub use react_analyzer::{Caveat, CaveatCode, CaveatLog, ComponentModel};
pub use transform::{build_model, transform, TransformError, TransformOptions, TransformResult};
