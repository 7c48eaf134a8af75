//! Model extraction over whole component files.

use pretty_assertions::assert_eq;
use react_analyzer::{
    analyze, AnalyzeError, AnalyzeOptions, CaveatCode, ComponentModel, FunctionOrigin,
    MemberRole, PropDescriptor, PropKind, VueType,
};
use react_parser::{parse_component, PreprocessOptions};

fn model(source: &str, ts: bool) -> Result<ComponentModel, AnalyzeError> {
    let parsed = parse_component(source, PreprocessOptions::default()).unwrap();
    analyze(&parsed, AnalyzeOptions { ts })
}

const TYPED_FOO: &str = r#"import * as React from 'react';
import { format } from './format';

interface FooProps {
  label: string;
  onClick?: () => void;
}

export default class Foo extends React.Component<FooProps> {
  render() {
    return <button onClick={this.props.onClick}>{format(this.props.label)}</button>;
  }
}
"#;

#[test]
fn test_typed_interface_props() {
    let model = model(TYPED_FOO, true).unwrap();
    let props = &model.prop_types["Foo"];
    assert_eq!(props.len(), 2);
    assert_eq!(
        props["label"],
        PropDescriptor {
            kind: PropKind::Typed,
            vue_type: Some(VueType::String),
            required: true,
            has_custom_validator: false,
        }
    );
    assert_eq!(props["onClick"].vue_type, Some(VueType::Function));
    assert!(!props["onClick"].required);
    assert_eq!(model.export_name.as_deref(), Some("Foo"));
    assert!(model.caveats.is_empty(), "{:?}", model.caveats);
    // The consumed interface is not copied into the output.
    assert!(model.declarations.is_empty());
}

#[test]
fn test_typed_interface_needs_ts_option() {
    let model = model(TYPED_FOO, false).unwrap();
    assert!(model.prop_types.is_empty());
    assert_eq!(model.declarations.len(), 1);
    assert!(model.declarations[0].starts_with("interface FooProps"));
    assert!(model.caveats.contains(CaveatCode::MissingPropValidation));
}

#[test]
fn test_imports_are_filtered_verbatim() {
    let model = model(
        "import React, { Component } from 'react';\nimport ReactDOM from \"react-dom\";\nimport PropTypes from 'prop-types';\nimport styles from './styles.css';\nimport { a,\n  b } from \"lib\"\nimport 'reactive';\n",
        false,
    )
    .unwrap();
    assert_eq!(
        model.imports,
        vec![
            "import styles from './styles.css';",
            "import { a,\n  b } from \"lib\"",
            "import 'reactive';",
        ]
    );
}

#[test]
fn test_two_top_level_classes_are_fatal() {
    let err = model(
        "class A extends Component { render() { return null; } }\nexport class B extends Component { render() { return null; } }\n",
        false,
    )
    .unwrap_err();
    let AnalyzeError::MultipleComponents { first, second, .. } = err;
    assert_eq!((first.as_str(), second.as_str()), ("A", "B"));
}

#[test]
fn test_missing_prop_validation() {
    let model = model(
        "export default function Hello(props) {\n  return <p>{props.name}</p>;\n}\n",
        false,
    )
    .unwrap();
    let messages = model.caveats.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("no props validation"));
}

#[test]
fn test_no_caveat_without_props_usage() {
    let model = model("export default function Logo() {\n  return <img />;\n}\n", false).unwrap();
    assert!(model.caveats.is_empty());
}

#[test]
fn test_assignment_props_on_functional_component() {
    let model = model(
        "import PropTypes from 'prop-types';\n\nconst Counter = ({ count }) => <b>{count}</b>;\n\nCounter.propTypes = { count: PropTypes.number.isRequired };\nCounter.defaultProps = { count: 0 };\n\nexport default Counter;\n",
        false,
    )
    .unwrap();
    let count = &model.prop_types["Counter"]["count"];
    assert_eq!(count.kind, PropKind::Validated);
    assert_eq!(count.vue_type, Some(VueType::Number));
    assert!(count.required);
    assert_eq!(model.default_props["Counter"]["count"], "0");
    assert_eq!(model.functional_components.len(), 1);
    assert_eq!(model.functional_components[0].origin, FunctionOrigin::Arrow);
    assert_eq!(model.export_name.as_deref(), Some("Counter"));
    assert!(model.caveats.is_empty());
}

#[test]
fn test_declarations_and_untransferred_statements() {
    let model = model(
        "const API = '/api'; // base url\nlet cache = new Map();\nconsole.log('loaded');\nexport default function App() { return null; }\n",
        false,
    )
    .unwrap();
    assert_eq!(
        model.declarations,
        vec!["const API = '/api'; // base url", "let cache = new Map();"]
    );
    let caveat = model.caveats.iter().next().unwrap();
    assert_eq!(caveat.code, CaveatCode::UntransferredStatement);
    assert!(caveat.message.contains("console.log('loaded');"));
}

#[test]
fn test_higher_order_component_is_flagged_and_extracted() {
    let model = model(
        "export default function withTheme(Inner) {\n  return class Themed extends Component {\n    render() { return <Inner theme=\"dark\" />; }\n  };\n}\n",
        false,
    )
    .unwrap();
    assert!(model.caveats.contains(CaveatCode::HigherOrderComponent));
    let class = model.class_component.as_ref().unwrap();
    assert_eq!(class.name, "Themed");
    assert_eq!(class.members[0].role, MemberRole::Render);
}

#[test]
fn test_default_export_of_call_is_flagged() {
    let model = model(
        "class List extends Component { render() { return null; } }\nexport default connect(mapState)(List);\n",
        false,
    )
    .unwrap();
    assert_eq!(model.class_component.as_ref().unwrap().name, "List");
    assert_eq!(model.caveats.len(), 1);
    assert_eq!(model.caveats.iter().next().unwrap().code, CaveatCode::HigherOrderComponent);
}

#[test]
fn test_typed_functional_component() {
    let model = model(
        "type BadgeProps = {\n  count: number;\n  tone?: 'info' | 'warn';\n};\n\nexport const Badge: React.FC<BadgeProps> = ({ count, tone }) => (\n  <span className={tone}>{count}</span>\n);\n",
        true,
    )
    .unwrap();
    let props = &model.prop_types["Badge"];
    assert_eq!(props["count"].vue_type, Some(VueType::Number));
    assert!(props["tone"].has_custom_validator);
    assert_eq!(
        model.caveats.iter().map(|c| c.code).collect::<Vec<_>>(),
        vec![CaveatCode::AmbiguousPropType]
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let first = model(TYPED_FOO, true).unwrap();
    let second = model(TYPED_FOO, true).unwrap();
    assert_eq!(first, second);
}
