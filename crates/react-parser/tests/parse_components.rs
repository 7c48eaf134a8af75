//! End-to-end front-end tests over realistic component sources.

use react_parser::{parse_component, ParseErrorKind, PreprocessOptions};
use swc_ecma_ast::{ClassMember, Decl, ModuleDecl, ModuleItem};

const TODO_LIST: &str = r#"import React, { Component } from 'react';
import PropTypes from 'prop-types';
import './todo.css';

interface Props {
  items: string[];
  onPick?: (item: string) => void;
}

export default class TodoList extends Component<Props> {
  state = { picked: null };

  pick = (item) => {
    this.setState({ picked: item });
  };

  render() {
    return (
      <ul className="todo">
        {this.props.items.map(item => <li onClick={::this.pick}>{item}</li>)}
      </ul>
    );
  }
}
"#;

fn class_members(item: &ModuleItem) -> &[ClassMember] {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
            swc_ecma_ast::DefaultDecl::Class(class) => &class.class.body,
            other => panic!("expected class, got {other:?}"),
        },
        ModuleItem::Stmt(swc_ecma_ast::Stmt::Decl(Decl::Class(class))) => &class.class.body,
        other => panic!("expected class, got {other:?}"),
    }
}

#[test]
fn test_typed_class_component() {
    let parsed = parse_component(TODO_LIST, PreprocessOptions::default()).unwrap();
    assert_eq!(parsed.module.body.len(), 5);

    let members = class_members(&parsed.module.body[4]);
    assert!(matches!(members[0], ClassMember::ClassProp(_)));
    assert!(matches!(members[1], ClassMember::Method(_)));
    assert!(matches!(members[2], ClassMember::Method(_)));
    assert!(!parsed.source().contains("::this"));
}

#[test]
fn test_malformed_input_is_fatal() {
    let err = parse_component("class A {\n  render() {\n", PreprocessOptions::default())
        .err()
        .unwrap();
    assert!(matches!(
        err.kind,
        ParseErrorKind::Syntax { .. } | ParseErrorKind::Recovered { .. }
    ));
}

#[test]
fn test_spans_index_cleaned_text() {
    let parsed = parse_component("\u{feff}import a from 'a';\r\n", PreprocessOptions::default())
        .unwrap();
    let span = parsed.span(swc_common::Spanned::span(&parsed.module.body[0]));
    assert_eq!(span.start_usize(), 0);
    assert_eq!(parsed.text(swc_common::Spanned::span(&parsed.module.body[0])), "import a from 'a';");
}
