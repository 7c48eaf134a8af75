//! Component model extraction for react-to-vue.
//!
//! [`analyze`] walks the top level of a parsed React module once and builds a
//! [`ComponentModel`]:
//! - imports, minus the React framework packages
//! - verbatim declarations
//! - the class component, or the functional components
//! - prop contracts from TypeScript types or `propTypes` assignments
//! - caveats for everything that does not translate cleanly
//!
//! # Example
//!
//! ```
//! use react_analyzer::{analyze, AnalyzeOptions, VueType};
//! use react_parser::{parse_component, PreprocessOptions};
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
//! let parsed = parse_component(source, PreprocessOptions::default()).unwrap();
//! let model = analyze(&parsed, AnalyzeOptions::default()).unwrap();
//! let count = &model.prop_types["Counter"]["count"];
//! assert_eq!(count.vue_type, Some(VueType::Number));
//! assert!(count.required);
//! ```

mod assembler;
mod assignment;
mod caveat;
mod class_component;
mod error;
mod functional;
mod interface;
mod model;
mod sites;
mod type_token;

pub use assembler::AnalyzeOptions;
pub use caveat::{Caveat, CaveatCode, CaveatLog, HOC_MESSAGE, MISSING_VALIDATION_MESSAGE};
pub use error::AnalyzeError;
pub use interface::ANONYMOUS_COMPONENT;
pub use model::*;
pub use type_token::{TextSliceExtractor, TypeTokenExtractor};

use react_parser::ParsedModule;

/// Builds the component model of `parsed`.
pub fn analyze(
    parsed: &ParsedModule,
    options: AnalyzeOptions,
) -> Result<ComponentModel, AnalyzeError> {
    analyze_with(parsed, options, &TextSliceExtractor)
}

/// Like [`analyze`], reading interface member types with `extractor`.
pub fn analyze_with(
    parsed: &ParsedModule,
    options: AnalyzeOptions,
    extractor: &dyn TypeTokenExtractor,
) -> Result<ComponentModel, AnalyzeError> {
    assembler::Assembler::new(parsed, options, extractor).run()
}
