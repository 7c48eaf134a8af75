//! Snapshot tests for the React to Vue transformer.
//!
//! Each snapshot holds the React source, the generated Vue component and the
//! caveats raised on the way.

use vue_transformer::{transform, TransformOptions};

fn transform_snapshot(name: &str, source: &str, options: TransformOptions) {
    let result = transform(source, options).expect("transform failed");
    let caveats = if result.caveats.is_empty() {
        "(none)".to_string()
    } else {
        result
            .caveats
            .iter()
            .map(|caveat| format!("{}: {}", caveat.code, caveat.message))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let output = format!(
        "=== Source ===\n{}\n\n=== Vue Output ===\n{}\n\n=== Caveats ===\n{}",
        source.trim(),
        result.output_text.trim_end(),
        caveats
    );
    insta::assert_snapshot!(name, output);
}

// ============================================================================
// Class components
// ============================================================================

#[test]
fn typed_class_component() {
    transform_snapshot(
        "typed_class_component",
        r#"
import React, { Component } from 'react';
import './foo.css';

interface FooProps {
  label: string;
  onClick?: () => void;
}

export default class Foo extends Component<FooProps> {
  state = { open: false };

  toggle = () => {
    this.setState({ open: !this.state.open });
  };

  componentDidMount() {
    console.log(this.props.label);
  }

  render() {
    return (
      <button className="foo" onClick={this.toggle}>
        {this.props.label}
      </button>
    );
  }
}
"#,
        TransformOptions {
            ts: true,
            flow: false,
        },
    );
}

#[test]
fn class_component_with_prop_types() {
    transform_snapshot(
        "class_component_with_prop_types",
        r#"
import React from 'react';
import PropTypes from 'prop-types';

class Timer extends React.Component {
  constructor(props) {
    super(props);
    this.state = { seconds: props.start };
    this.tick = this.tick.bind(this);
    this.interval = null;
  }

  get label() {
    return `${this.state.seconds}s`;
  }

  tick() {
    this.setState((prev) => ({ seconds: prev.seconds + 1 }));
  }

  shouldComponentUpdate() {
    return true;
  }

  componentDidMount() {
    this.interval = setInterval(this.tick, 1000);
  }

  componentWillUnmount() {
    clearInterval(this.interval);
  }

  // Renders the elapsed time.
  render() {
    return <div className="timer">{this.label} {this.props.children}</div>;
  }
}

Timer.propTypes = {
  start: PropTypes.number,
};

Timer.displayName = 'ElapsedTimer';

export default Timer;
"#,
        TransformOptions::default(),
    );
}

// ============================================================================
// Functional components
// ============================================================================

#[test]
fn functional_component_with_helper() {
    transform_snapshot(
        "functional_component_with_helper",
        r#"
import PropTypes from 'prop-types';
import { format } from './format';

const SIZES = ['sm', 'md', 'lg'];

function Icon(props) {
  return <i className={props.name} />;
}

const Badge = ({ label, size, children }) => (
  <span className={`badge badge-${size}`}>
    <Icon name="dot" />
    {format(label)}
    {children}
  </span>
);

Badge.propTypes = {
  label: PropTypes.string.isRequired,
  size: PropTypes.oneOf(SIZES),
};

Badge.defaultProps = {
  size: 'md',
};

export default Badge;
"#,
        TransformOptions::default(),
    );
}
