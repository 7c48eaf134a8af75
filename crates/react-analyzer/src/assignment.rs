//! Runtime prop contracts: `propTypes`, `defaultProps` and `displayName`,
//! assigned either as `Foo.propTypes = {...}` or as `static` class fields.

use crate::caveat::{Caveat, CaveatCode};
use crate::model::{ComponentModel, PropDescriptor, PropKind, PropMap};
use indexmap::IndexMap;
use react_parser::ParsedModule;
use swc_common::Spanned;
use swc_ecma_ast::*;
use tracing::{debug, trace};

/// The static fields this module understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticField {
    PropTypes,
    DefaultProps,
    DisplayName,
}

impl StaticField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "propTypes" => Some(StaticField::PropTypes),
            "defaultProps" => Some(StaticField::DefaultProps),
            "displayName" => Some(StaticField::DisplayName),
            _ => None,
        }
    }
}

/// Recognizes `<Ident>.<field> = <value>` for one of the static fields.
pub fn static_assignment(expr: &Expr) -> Option<(&str, StaticField, &Expr)> {
    let Expr::Assign(AssignExpr {
        op: AssignOp::Assign,
        left: AssignTarget::Simple(SimpleAssignTarget::Member(member)),
        right,
        ..
    }) = expr
    else {
        return None;
    };
    let (Expr::Ident(object), MemberProp::Ident(prop)) = (&*member.obj, &member.prop) else {
        return None;
    };
    let field = StaticField::from_name(&prop.sym)?;
    Some((&*object.sym, field, &**right))
}

/// Records a static field value for `component`.
///
/// Values of the wrong shape (a `propTypes` that is not an object literal, a
/// `displayName` that is not a string) are ignored and reported as `false`.
pub fn record_static(
    model: &mut ComponentModel,
    parsed: &ParsedModule,
    component: &str,
    field: StaticField,
    value: &Expr,
) -> bool {
    let value = crate::sites::unwrap_parens(value);
    match (field, value) {
        (StaticField::PropTypes, Expr::Object(object)) => {
            let typed = model
                .prop_types
                .get(component)
                .is_some_and(|props| props.values().any(|p| p.kind == PropKind::Typed));
            if typed {
                model.caveats.push(Caveat::new(
                    CaveatCode::DuplicatePropContract,
                    format!(
                        "`{component}` declares props both by type and by propTypes, propTypes ignored"
                    ),
                    parsed.span(object.span),
                ));
                return true;
            }
            let (props, caveats) = extract_prop_types(parsed, component, object);
            model.caveats.extend(caveats);
            model
                .prop_types
                .entry(component.to_string())
                .or_default()
                .extend(props);
            true
        }
        (StaticField::DefaultProps, Expr::Object(object)) => {
            let defaults = extract_default_props(parsed, object);
            debug!(component, count = defaults.len(), "default props");
            model
                .default_props
                .entry(component.to_string())
                .or_default()
                .extend(defaults);
            true
        }
        (StaticField::DisplayName, Expr::Lit(Lit::Str(name))) => {
            model.display_names.insert(
                component.to_string(),
                name.value.to_string_lossy().into_owned(),
            );
            true
        }
        _ => false,
    }
}

/// Converts a `propTypes` object into descriptors.
///
/// Only `PropTypes.<token>` and `PropTypes.<token>.isRequired` are read;
/// anything else gets the always-pass validator and a caveat.
pub fn extract_prop_types(
    parsed: &ParsedModule,
    component: &str,
    object: &ObjectLit,
) -> (PropMap, Vec<Caveat>) {
    let mut props = PropMap::new();
    let mut caveats = Vec::new();

    for prop in &object.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        let (name, descriptor) = match &**prop {
            Prop::KeyValue(kv) => {
                let Some(name) = prop_name(&kv.key) else {
                    continue;
                };
                (name, validator_descriptor(&kv.value))
            }
            Prop::Shorthand(ident) => (
                ident.sym.to_string(),
                PropDescriptor::from_token(PropKind::Validated, None, false),
            ),
            Prop::Method(method) => {
                let Some(name) = prop_name(&method.key) else {
                    continue;
                };
                (name, PropDescriptor::from_token(PropKind::Validated, None, false))
            }
            _ => continue,
        };
        trace!(component, prop = %name, ?descriptor, "validated prop");

        if descriptor.has_custom_validator {
            caveats.push(Caveat::new(
                CaveatCode::AmbiguousPropType,
                format!("ambiguous prop type for `{name}` on `{component}`, validation skipped"),
                parsed.span(prop.span()),
            ));
        }
        props.insert(name, descriptor);
    }

    (props, caveats)
}

fn validator_descriptor(value: &Expr) -> PropDescriptor {
    let (inner, required) = match value {
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) if &*prop.sym == "isRequired" => (&**obj, true),
        other => (other, false),
    };
    let token = match inner {
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) if matches!(&**obj, Expr::Ident(_) | Expr::Member(_)) => Some(&*prop.sym),
        _ => None,
    };
    PropDescriptor::from_token(PropKind::Validated, token, required)
}

/// Default values as raw source text, unevaluated.
pub fn extract_default_props(parsed: &ParsedModule, object: &ObjectLit) -> IndexMap<String, String> {
    let mut defaults = IndexMap::new();
    for prop in &object.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        match &**prop {
            Prop::KeyValue(kv) => {
                if let Some(name) = prop_name(&kv.key) {
                    defaults.insert(name, parsed.text(kv.value.span()).to_string());
                }
            }
            Prop::Shorthand(ident) => {
                defaults.insert(ident.sym.to_string(), ident.sym.to_string());
            }
            _ => {}
        }
    }
    defaults
}

pub(crate) fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(value) => Some(value.value.to_string_lossy().into_owned()),
        PropName::Num(num) => Some(num.value.to_string()),
        PropName::Computed(_) | PropName::BigInt(_) => None,
    }
}
