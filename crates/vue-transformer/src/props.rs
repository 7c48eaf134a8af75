//! The Vue `props` option.

use crate::layout::{dedent_tail, object_section};
use indexmap::IndexMap;
use react_analyzer::{ComponentModel, PropDescriptor};

/// The `props: { ... }` section for `component`, merging declared props
/// with their defaults. `None` when the component declares neither.
pub fn props_section(model: &ComponentModel, component: &str) -> Option<String> {
    let declared = model.prop_types.get(component);
    let defaults = model.default_props.get(component);

    let mut entries: IndexMap<&str, (Option<&PropDescriptor>, Option<&str>)> = IndexMap::new();
    for (name, descriptor) in declared.into_iter().flatten() {
        entries.insert(name.as_str(), (Some(descriptor), None));
    }
    for (name, value) in defaults.into_iter().flatten() {
        entries.entry(name.as_str()).or_default().1 = Some(value.as_str());
    }
    if entries.is_empty() {
        return None;
    }

    let lines: Vec<String> = entries
        .into_iter()
        .map(|(name, (descriptor, default))| {
            format!("{}: {}", object_key(name), prop_options(descriptor, default))
        })
        .collect();
    Some(object_section("props", &lines))
}

/// One prop's options object, e.g. `{ type: String, required: true }`.
pub fn prop_options(descriptor: Option<&PropDescriptor>, default: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(vue_type) = descriptor.and_then(|d| d.vue_type) {
        parts.push(format!("type: {}", vue_type.as_str()));
    }
    if descriptor.is_some_and(|d| d.required) {
        parts.push("required: true".to_string());
    }
    if let Some(default) = default {
        parts.push(format!("default: {}", default_value(default)));
    }
    if descriptor.is_some_and(|d| d.has_custom_validator) {
        parts.push("validator: () => true".to_string());
    }

    if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}

/// Object and array defaults become factories so instances do not share
/// them.
fn default_value(source: &str) -> String {
    let source = dedent_tail(source.trim());
    if source.starts_with('{') || source.starts_with('[') {
        format!("() => ({source})")
    } else {
        source
    }
}

/// A property key, quoted unless it is a plain identifier.
pub fn object_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// A single-quoted JavaScript string literal.
pub fn string_literal(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use react_analyzer::{PropKind, PropMap};

    fn model_with(props: &[(&str, PropDescriptor)], defaults: &[(&str, &str)]) -> ComponentModel {
        let mut model = ComponentModel::new("");
        let mut map = PropMap::new();
        for (name, descriptor) in props {
            map.insert(name.to_string(), *descriptor);
        }
        if !map.is_empty() {
            model.prop_types.insert("Foo".to_string(), map);
        }
        if !defaults.is_empty() {
            model.default_props.insert(
                "Foo".to_string(),
                defaults
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
        }
        model
    }

    #[test]
    fn test_typed_props() {
        let model = model_with(
            &[
                (
                    "label",
                    PropDescriptor::from_token(PropKind::Typed, Some("string"), true),
                ),
                ("onClick", PropDescriptor::function(PropKind::Typed, false)),
            ],
            &[],
        );
        assert_eq!(
            props_section(&model, "Foo").unwrap(),
            "props: {\n  label: { type: String, required: true },\n  onClick: { type: Function }\n}"
        );
    }

    #[test]
    fn test_defaults_merge_and_factories() {
        let model = model_with(
            &[(
                "items",
                PropDescriptor::from_token(PropKind::Validated, Some("array"), false),
            )],
            &[("items", "[]"), ("size", "'md'")],
        );
        assert_eq!(
            props_section(&model, "Foo").unwrap(),
            "props: {\n  items: { type: Array, default: () => ([]) },\n  size: { default: 'md' }\n}"
        );
    }

    #[test]
    fn test_unknown_type_gets_validator() {
        let descriptor = PropDescriptor::from_token(PropKind::Typed, Some("Date"), true);
        assert_eq!(
            prop_options(Some(&descriptor), None),
            "{ required: true, validator: () => true }"
        );
    }

    #[test]
    fn test_no_props() {
        assert_eq!(props_section(&ComponentModel::new(""), "Foo"), None);
    }

    #[test]
    fn test_object_keys() {
        assert_eq!(object_key("onClick"), "onClick");
        assert_eq!(object_key("data-id"), "'data-id'");
        assert_eq!(string_literal("it's"), "'it\\'s'");
        assert_eq!(string_literal("two\nlines\r"), "'two\\nlines\\r'");
    }
}
