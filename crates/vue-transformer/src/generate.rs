//! Vue component emission from a [`ComponentModel`].

use crate::layout::{dedent_tail, function_block, indent, object_section};
use crate::props::{object_key, props_section, string_literal};
use react_analyzer::{
    ClassComponent, ClassMemberInfo, CodeFragment, ComponentBody, ComponentModel,
    FunctionalComponent, LifecycleHook, MemberRole, SiteKind,
};
use source_text::{apply_edits, TextEdit};
use tracing::debug;

/// Generates the Vue component source for `model`.
///
/// Output order is fixed: imports, declarations, helper functions, then the
/// `export default { ... }` object. The same model always yields the same
/// text.
pub fn generate(model: &ComponentModel) -> String {
    let mut blocks = Vec::new();
    if !model.imports.is_empty() {
        blocks.push(model.imports.join("\n"));
    }
    blocks.extend(model.declarations.iter().cloned());

    let (sections, primary) = if let Some(class) = &model.class_component {
        (class_sections(model, class), Some(class.name.as_str()))
    } else if let Some(component) = model.primary_functional() {
        (functional_sections(model, component), Some(component.name.as_str()))
    } else {
        (orphan_sections(model), None)
    };

    blocks.extend(
        model
            .functional_components
            .iter()
            .filter(|component| Some(component.name.as_str()) != primary)
            .map(|component| component.source.clone()),
    );

    debug!(
        component = primary.unwrap_or_default(),
        sections = sections.len(),
        "generating Vue component"
    );
    blocks.push(export_default(&sections));

    let mut output = blocks.join("\n\n");
    output.push('\n');
    output
}

fn export_default(sections: &[String]) -> String {
    if sections.is_empty() {
        return "export default {};".to_string();
    }
    format!("export default {{\n{}\n}};", indent(&sections.join(",\n"), 2))
}

fn class_sections(model: &ComponentModel, class: &ClassComponent) -> Vec<String> {
    let mut sections = vec![name_section(model, &class.name)];
    sections.extend(props_section(model, &class.name));

    if let Some(state) = &class.state {
        let state = dedent_tail(&rewrite(state));
        sections.push(format!("data() {{\n{}\n}}", indent(&format!("return {state};"), 2)));
    }

    let getters: Vec<String> = class.members_with(MemberRole::Getter).map(member).collect();
    if !getters.is_empty() {
        sections.push(object_section("computed", &getters));
    }

    let methods: Vec<String> = class
        .members
        .iter()
        .filter(|m| matches!(m.role, MemberRole::Method | MemberRole::Static))
        .map(member)
        .collect();
    if !methods.is_empty() {
        sections.push(object_section("methods", &methods));
    }

    for info in &class.members {
        if let MemberRole::Lifecycle(hook) = info.role {
            sections.push(member_as(info, vue_hook(hook)));
        }
    }

    if !class.created.is_empty() {
        let statements: Vec<String> = class
            .created
            .iter()
            .map(|fragment| dedent_tail(&rewrite(fragment)))
            .collect();
        sections.push(format!(
            "created() {{\n{}\n}}",
            indent(&statements.join("\n"), 2)
        ));
    }

    if let Some(render) = class.members_with(MemberRole::Render).next() {
        let block = function_block("render(h)", &[], &rewrite(&render.body));
        sections.push(with_comments(&render.leading_comments, block));
    }
    sections
}

fn functional_sections(model: &ComponentModel, component: &FunctionalComponent) -> Vec<String> {
    let mut sections = vec![
        name_section(model, &component.name),
        "functional: true".to_string(),
    ];
    sections.extend(props_section(model, &component.name));

    let prelude: Vec<String> = component
        .props_binding
        .as_deref()
        .map(props_prelude)
        .into_iter()
        .collect();
    let render = match &component.body {
        ComponentBody::Block(fragment) => {
            function_block("render(h, context)", &prelude, &rewrite(fragment))
        }
        ComponentBody::Expr(fragment) => {
            let expr = dedent_tail(&rewrite(fragment));
            let mut lines = prelude;
            lines.push(format!("return {expr};"));
            format!("render(h, context) {{\n{}\n}}", indent(&lines.join("\n"), 2))
        }
    };
    sections.push(render);
    sections
}

/// No component was found; only a default-export name and props can carry
/// over.
fn orphan_sections(model: &ComponentModel) -> Vec<String> {
    let Some(name) = &model.export_name else {
        return Vec::new();
    };
    let mut sections = vec![name_section(model, name)];
    sections.extend(props_section(model, name));
    sections
}

fn name_section(model: &ComponentModel, component: &str) -> String {
    let name = model
        .display_names
        .get(component)
        .map_or(component, String::as_str);
    format!("name: {}", string_literal(name))
}

/// Binds the render context's props to the component's own parameter.
fn props_prelude(binding: &str) -> String {
    if !binding.starts_with('{') {
        return format!("const {binding} = context.props;");
    }
    let pattern = dedent_tail(binding);
    if mentions_children(&pattern) {
        format!("const {pattern} = {{ ...context.props, children: context.children }};")
    } else {
        format!("const {pattern} = context.props;")
    }
}

fn mentions_children(pattern: &str) -> bool {
    pattern
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .any(|word| word == "children")
}

fn member(info: &ClassMemberInfo) -> String {
    member_as(info, &object_key(&info.name))
}

fn member_as(info: &ClassMemberInfo, name: &str) -> String {
    let mut header = String::new();
    if info.is_async {
        header.push_str("async ");
    }
    if info.is_generator {
        header.push('*');
    }
    header.push_str(name);
    header.push('(');
    header.push_str(&info.params);
    header.push(')');

    let block = function_block(&header, &[], &rewrite(&info.body));
    with_comments(&info.leading_comments, block)
}

fn with_comments(comments: &[String], text: String) -> String {
    if comments.is_empty() {
        return text;
    }
    let mut lines: Vec<String> = comments.iter().map(|c| dedent_tail(c)).collect();
    lines.push(text);
    lines.join("\n")
}

fn vue_hook(hook: LifecycleHook) -> &'static str {
    match hook {
        LifecycleHook::WillMount => "beforeMount",
        LifecycleHook::DidMount => "mounted",
        LifecycleHook::WillUpdate => "beforeUpdate",
        LifecycleHook::DidUpdate => "updated",
        LifecycleHook::WillUnmount => "beforeDestroy",
        LifecycleHook::DidCatch => "errorCaptured",
    }
}

/// Applies the instance-access rewrites to a fragment.
pub fn rewrite(fragment: &CodeFragment) -> String {
    let edits = fragment
        .sites
        .iter()
        .map(|site| TextEdit::replace(site.range, replacement(site.kind)))
        .collect();
    apply_edits(&fragment.text, edits)
}

fn replacement(kind: SiteKind) -> &'static str {
    match kind {
        SiteKind::PropsMember | SiteKind::StateMember | SiteKind::ConstructorPropsMember => {
            "this"
        }
        SiteKind::PropsObject => "this.$props",
        SiteKind::StateObject => "this.$data",
        SiteKind::Children => "this.$slots.default",
        SiteKind::SetStateCallee => "Object.assign",
        SiteKind::SetStateArgs => "this.$data, ",
        SiteKind::ClassNameAttr => "class",
        SiteKind::FunctionalChildren => "context.children",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use react_analyzer::Site;
    use source_text::Span;

    fn site(start: usize, end: usize, kind: SiteKind) -> Site {
        Site {
            range: Span::from_offsets(start, end),
            kind,
        }
    }

    #[test]
    fn test_rewrite_set_state() {
        let fragment = CodeFragment {
            text: "this.setState({ n: this.state.n + 1 })".to_string(),
            sites: vec![
                site(0, 13, SiteKind::SetStateCallee),
                site(14, 14, SiteKind::SetStateArgs),
                site(19, 29, SiteKind::StateMember),
            ],
        };
        assert_eq!(
            rewrite(&fragment),
            "Object.assign(this.$data, { n: this.n + 1 })"
        );
    }

    #[test]
    fn test_rewrite_children_and_class_name() {
        let fragment = CodeFragment {
            text: "<div className=\"x\">{this.props.children}</div>".to_string(),
            sites: vec![
                site(5, 14, SiteKind::ClassNameAttr),
                site(20, 39, SiteKind::Children),
            ],
        };
        assert_eq!(
            rewrite(&fragment),
            "<div class=\"x\">{this.$slots.default}</div>"
        );
    }

    #[test]
    fn test_props_prelude() {
        assert_eq!(props_prelude("props"), "const props = context.props;");
        assert_eq!(
            props_prelude("{ label, size = 1 }"),
            "const { label, size = 1 } = context.props;"
        );
        assert_eq!(
            props_prelude("{ title, children }"),
            "const { title, children } = { ...context.props, children: context.children };"
        );
    }

    #[test]
    fn test_empty_model() {
        assert_eq!(generate(&ComponentModel::new("")), "export default {};\n");
    }

    #[test]
    fn test_hook_names() {
        assert_eq!(vue_hook(LifecycleHook::WillMount), "beforeMount");
        assert_eq!(vue_hook(LifecycleHook::WillUnmount), "beforeDestroy");
        assert_eq!(vue_hook(LifecycleHook::DidCatch), "errorCaptured");
    }
}
