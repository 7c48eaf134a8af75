//! Typed prop contracts.
//!
//! A pre-pass correlates components with the type naming their props; the
//! main traversal then converts the members of each correlated interface or
//! object type alias into [`PropDescriptor`]s.

use crate::caveat::{Caveat, CaveatCode};
use crate::model::{PropDescriptor, PropKind, PropMap};
use crate::type_token::TypeTokenExtractor;
use react_parser::ParsedModule;
use swc_common::Spanned;
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};
use tracing::{debug, trace};

/// Name given to a default-exported class without an identifier.
pub const ANONYMOUS_COMPONENT: &str = "Component";

/// `(component, props type)` pairs in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlations {
    pairs: Vec<(String, String)>,
}

impl Correlations {
    pub fn push(&mut self, component: impl Into<String>, interface: impl Into<String>) {
        let (component, interface) = (component.into(), interface.into());
        trace!(%component, %interface, "correlated props type");
        self.pairs.push((component, interface));
    }

    /// Components whose props are declared by `interface`.
    pub fn components_for<'a>(&'a self, interface: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(_, i)| i == interface)
            .map(|(c, _)| c.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Records which type declares the props of each component.
///
/// Classes anywhere in the module are correlated through the first type
/// argument of their superclass (`extends Component<Props>`). Top-level
/// functional components are correlated through the annotation of their first
/// parameter, or through an `FC<Props>` annotation on the binding.
pub fn correlate(module: &Module) -> Correlations {
    let mut visitor = ClassCorrelator::default();
    module.visit_with(&mut visitor);
    let mut correlations = visitor.correlations;

    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl))
            | ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. })) => {
                correlate_decl(decl, &mut correlations);
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                if let DefaultDecl::Fn(FnExpr {
                    ident: Some(ident),
                    function,
                }) = &export.decl
                {
                    correlate_function(&ident.sym, &function.params, &mut correlations);
                }
            }
            _ => {}
        }
    }

    debug!(count = correlations.pairs.len(), "props type correlations");
    correlations
}

#[derive(Default)]
struct ClassCorrelator {
    correlations: Correlations,
}

impl Visit for ClassCorrelator {
    fn visit_class_decl(&mut self, decl: &ClassDecl) {
        self.record(&decl.ident.sym, &decl.class);
        decl.class.visit_children_with(self);
    }

    fn visit_class_expr(&mut self, expr: &ClassExpr) {
        let name = expr
            .ident
            .as_ref()
            .map_or(ANONYMOUS_COMPONENT, |ident| &*ident.sym);
        self.record(name, &expr.class);
        expr.class.visit_children_with(self);
    }
}

impl ClassCorrelator {
    fn record(&mut self, name: &str, class: &Class) {
        let first = class
            .super_type_params
            .as_ref()
            .and_then(|params| params.params.first());
        if let Some(interface) = first.and_then(|ty| plain_type_ref(ty)) {
            self.correlations.push(name, interface);
        }
    }
}

fn correlate_decl(decl: &Decl, correlations: &mut Correlations) {
    match decl {
        Decl::Fn(func) => correlate_function(&func.ident.sym, &func.function.params, correlations),
        Decl::Var(var) => {
            for declarator in &var.decls {
                let Pat::Ident(binding) = &declarator.name else {
                    continue;
                };
                let annotated = binding
                    .type_ann
                    .as_ref()
                    .and_then(|ann| component_type_argument(&ann.type_ann));
                if let Some(interface) = annotated {
                    correlations.push(&*binding.id.sym, interface);
                    continue;
                }
                let Some(init) = declarator.init.as_deref() else {
                    continue;
                };
                if let Expr::Arrow(arrow) = crate::sites::unwrap_parens(init) {
                    if let Some(interface) = arrow.params.first().and_then(pat_type_ref) {
                        correlations.push(&*binding.id.sym, interface);
                    }
                }
            }
        }
        _ => {}
    }
}

fn correlate_function(name: &str, params: &[Param], correlations: &mut Correlations) {
    if let Some(interface) = params.first().and_then(|param| pat_type_ref(&param.pat)) {
        correlations.push(name, interface);
    }
}

/// The props type of an `FC<P>`, `React.FC<P>`, `FunctionComponent<P>` or
/// `React.FunctionComponent<P>` annotation.
fn component_type_argument(ty: &TsType) -> Option<&str> {
    let TsType::TsTypeRef(type_ref) = ty else {
        return None;
    };
    let name = match &type_ref.type_name {
        TsEntityName::Ident(ident) => &*ident.sym,
        TsEntityName::TsQualifiedName(qualified) => match &qualified.left {
            TsEntityName::Ident(left) if &*left.sym == "React" => &*qualified.right.sym,
            _ => return None,
        },
    };
    if !matches!(name, "FC" | "FunctionComponent" | "SFC" | "StatelessComponent") {
        return None;
    }
    let first = type_ref.type_params.as_ref()?.params.first()?;
    plain_type_ref(first)
}

fn pat_type_ref(pat: &Pat) -> Option<&str> {
    let ann = match pat {
        Pat::Ident(binding) => binding.type_ann.as_ref(),
        Pat::Object(object) => object.type_ann.as_ref(),
        Pat::Assign(assign) => return pat_type_ref(&assign.left),
        _ => None,
    }?;
    plain_type_ref(&ann.type_ann)
}

/// The name of a type reference without type arguments.
fn plain_type_ref(ty: &TsType) -> Option<&str> {
    match ty {
        TsType::TsTypeRef(TsTypeRef {
            type_name: TsEntityName::Ident(ident),
            type_params: None,
            ..
        }) => Some(&*ident.sym),
        _ => None,
    }
}

/// The members of an interface or of an alias to an object type.
pub fn contract_members(decl: &Decl) -> Option<(&str, &[TsTypeElement])> {
    match decl {
        Decl::TsInterface(interface) => Some((&*interface.id.sym, interface.body.body.as_slice())),
        Decl::TsTypeAlias(alias) => match &*alias.type_ann {
            TsType::TsTypeLit(literal) => Some((&*alias.id.sym, literal.members.as_slice())),
            _ => None,
        },
        _ => None,
    }
}

/// Converts the members of a props type into descriptors.
///
/// Members whose type has no bare token in the known-type table get the
/// always-pass validator and an "ambiguous prop type" caveat.
pub fn extract_props(
    parsed: &ParsedModule,
    component: &str,
    members: &[TsTypeElement],
    extractor: &dyn TypeTokenExtractor,
) -> (PropMap, Vec<Caveat>) {
    let mut props = PropMap::new();
    let mut caveats = Vec::new();

    for member in members {
        let (name, descriptor) = match member {
            TsTypeElement::TsPropertySignature(signature) => {
                let Some(name) = key_name(&signature.key) else {
                    continue;
                };
                let required = !signature.optional;
                let is_function = signature
                    .type_ann
                    .as_ref()
                    .is_some_and(|ann| is_function_type(&ann.type_ann));
                let descriptor = if is_function {
                    PropDescriptor::function(PropKind::Typed, required)
                } else {
                    let text = member_text(parsed, signature.span);
                    let token = extractor.extract(&name, &text);
                    PropDescriptor::from_token(PropKind::Typed, token.as_deref(), required)
                };
                (name, descriptor)
            }
            TsTypeElement::TsMethodSignature(signature) => {
                let Some(name) = key_name(&signature.key) else {
                    continue;
                };
                (
                    name,
                    PropDescriptor::function(PropKind::Typed, !signature.optional),
                )
            }
            _ => continue,
        };

        if descriptor.has_custom_validator {
            caveats.push(Caveat::new(
                CaveatCode::AmbiguousPropType,
                format!("ambiguous prop type for `{name}` on `{component}`, validation skipped"),
                parsed.span(member.span()),
            ));
        }
        props.insert(name, descriptor);
    }

    debug!(component, count = props.len(), "typed props");
    (props, caveats)
}

/// The member's source slice, extended over a `;` or `,` separator that swc
/// leaves outside the member span.
fn member_text(parsed: &ParsedModule, span: swc_common::Span) -> String {
    let text = parsed.text(span);
    let rest = &parsed.source()[parsed.offset(span.hi)..];
    let separator = rest
        .trim_start_matches([' ', '\t'])
        .chars()
        .next()
        .filter(|c| matches!(c, ';' | ','));
    match separator {
        Some(sep) if !text.ends_with([';', ',']) => format!("{text}{sep}"),
        _ => text.to_string(),
    }
}

fn is_function_type(ty: &TsType) -> bool {
    match ty {
        TsType::TsFnOrConstructorType(TsFnOrConstructorType::TsFnType(_)) => true,
        TsType::TsParenthesizedType(paren) => is_function_type(&paren.type_ann),
        _ => false,
    }
}

fn key_name(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(value)) => Some(value.value.to_string_lossy().into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VueType;
    use crate::type_token::TextSliceExtractor;
    use pretty_assertions::assert_eq;
    use react_parser::{parse_component, PreprocessOptions};

    fn parsed(source: &str) -> ParsedModule {
        parse_component(source, PreprocessOptions::default()).unwrap()
    }

    fn props_of(source: &str, component: &str) -> (PropMap, Vec<Caveat>) {
        let parsed = parsed(source);
        let decl = parsed
            .module
            .body
            .iter()
            .find_map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) if contract_members(decl).is_some() => {
                    Some(decl)
                }
                _ => None,
            })
            .unwrap();
        let (_, members) = contract_members(decl).unwrap();
        extract_props(&parsed, component, members, &TextSliceExtractor)
    }

    #[test]
    fn test_correlate_class_and_functions() {
        let parsed = parsed(
            "class Foo extends React.Component<FooProps, State> {}\n\
             function Bar(props: BarProps) { return null; }\n\
             export const Baz: React.FC<BazProps> = ({ a }) => null;\n\
             const Qux = ({ b }: QuxProps) => null;\n\
             const wrap = () => class Inner extends Component<InnerProps> {};\n",
        );
        let correlations = correlate(&parsed.module);
        assert_eq!(correlations.components_for("FooProps").collect::<Vec<_>>(), vec!["Foo"]);
        assert_eq!(correlations.components_for("BarProps").collect::<Vec<_>>(), vec!["Bar"]);
        assert_eq!(correlations.components_for("BazProps").collect::<Vec<_>>(), vec!["Baz"]);
        assert_eq!(correlations.components_for("QuxProps").collect::<Vec<_>>(), vec!["Qux"]);
        assert_eq!(
            correlations.components_for("InnerProps").collect::<Vec<_>>(),
            vec!["Inner"]
        );
    }

    #[test]
    fn test_generic_super_argument_is_not_correlated() {
        let parsed = parsed("class Foo extends Component<Props<string>> {}\n");
        assert!(correlate(&parsed.module).is_empty());
    }

    #[test]
    fn test_label_and_on_click() {
        let (props, caveats) = props_of(
            "interface Props {\n  label: string;\n  onClick?: () => void;\n}\n",
            "Foo",
        );
        assert_eq!(
            props["label"],
            PropDescriptor {
                kind: PropKind::Typed,
                vue_type: Some(VueType::String),
                required: true,
                has_custom_validator: false,
            }
        );
        assert_eq!(
            props["onClick"],
            PropDescriptor {
                kind: PropKind::Typed,
                vue_type: Some(VueType::Function),
                required: false,
                has_custom_validator: false,
            }
        );
        assert!(caveats.is_empty());
    }

    #[test]
    fn test_method_signature_is_function() {
        let (props, _) = props_of(
            "interface Props {\n  render(): string;\n  select?(id: number): boolean;\n}\n",
            "Foo",
        );
        assert_eq!(props["render"].vue_type, Some(VueType::Function));
        assert!(props["render"].required);
        assert_eq!(props["select"].vue_type, Some(VueType::Function));
        assert!(!props["select"].required);
        assert!(!props["select"].has_custom_validator);
    }

    #[test]
    fn test_unknown_and_composite_types_are_permissive() {
        let (props, caveats) = props_of(
            "type Props = {\n  when: Date;\n  size: 'sm' | 'lg';\n  tags?: string[];\n  count: number\n};\n",
            "Foo",
        );
        for name in ["when", "size", "tags"] {
            assert_eq!(props[name].vue_type, None, "{name}");
            assert!(props[name].has_custom_validator, "{name}");
        }
        assert!(!props["tags"].required);
        assert_eq!(props["count"].vue_type, Some(VueType::Number));
        assert_eq!(caveats.len(), 3);
        assert!(caveats.iter().all(|c| c.code == CaveatCode::AmbiguousPropType));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let (props, _) = props_of(
            "interface P {\n  z: string;\n  a: number;\n  m: boolean;\n}\n",
            "Foo",
        );
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }
}
