//! Functional component extraction.
//!
//! Two shapes count, both at the top level of the module:
//! - a function declaration, optionally behind `export` or `export default`
//! - a variable whose initializer is an arrow function, parentheses aside
//!
//! The arrow must be the initializer itself (`body.N.declarations.M.init`,
//! four path segments from the module root). An `export` wrapper adds a fifth
//! segment (`body.N.declaration.declarations.M.init`); it is deliberately not
//! counted, so `export const Foo = () => ...` is a component too. Arrows
//! nested deeper, such as `memo(() => ...)`, are helpers or wrappers and stay
//! declarations.

use crate::model::{ComponentBody, FunctionOrigin, FunctionalComponent};
use crate::sites::{collect, unwrap_parens, SiteMode};
use react_parser::ParsedModule;
use swc_common::{Span as SwcSpan, Spanned};
use swc_ecma_ast::*;
use tracing::debug;

/// The arrow function a declarator binds, if it is a component candidate.
pub fn arrow_component(declarator: &VarDeclarator) -> Option<(&str, &ArrowExpr)> {
    let Pat::Ident(binding) = &declarator.name else {
        return None;
    };
    match unwrap_parens(declarator.init.as_deref()?) {
        Expr::Arrow(arrow) => Some((&*binding.id.sym, arrow)),
        _ => None,
    }
}

/// A functional component from a function declaration. `source_span` covers
/// the declaration as it should be reproduced verbatim.
pub fn from_function(
    parsed: &ParsedModule,
    name: &str,
    function: &Function,
    source_span: SwcSpan,
) -> Option<FunctionalComponent> {
    let pats: Vec<&Pat> = function.params.iter().map(|param| &param.pat).collect();
    let (props_binding, mode) = props_binding(parsed, pats.first().copied());
    let body = function.body.as_ref()?;
    let body = ComponentBody::Block(collect(parsed, body, mode).fragment);

    let component = FunctionalComponent {
        name: name.to_string(),
        params: pats.iter().map(|pat| parsed.text(pat.span()).to_string()).collect(),
        props_binding,
        body,
        origin: FunctionOrigin::Declaration,
        is_async: function.is_async,
        source: parsed.text(source_span).to_string(),
        span: parsed.span(source_span),
    };
    debug!(component = name, origin = "declaration", "functional component");
    Some(component)
}

/// A functional component from an arrow bound to a variable.
pub fn from_arrow(
    parsed: &ParsedModule,
    name: &str,
    arrow: &ArrowExpr,
    source_span: SwcSpan,
) -> FunctionalComponent {
    let (props_binding, mode) = props_binding(parsed, arrow.params.first());
    let body = match &*arrow.body {
        BlockStmtOrExpr::BlockStmt(block) => {
            ComponentBody::Block(collect(parsed, block, mode).fragment)
        }
        BlockStmtOrExpr::Expr(expr) => {
            ComponentBody::Expr(collect(parsed, &**expr, mode).fragment)
        }
    };

    debug!(component = name, origin = "arrow", "functional component");
    FunctionalComponent {
        name: name.to_string(),
        params: arrow
            .params
            .iter()
            .map(|pat| parsed.text(pat.span()).to_string())
            .collect(),
        props_binding,
        body,
        origin: FunctionOrigin::Arrow,
        is_async: arrow.is_async,
        source: parsed.text(source_span).to_string(),
        span: parsed.span(source_span),
    }
}

/// The first parameter's pattern without its type annotation, and the site
/// mode to collect the body with.
fn props_binding(parsed: &ParsedModule, first: Option<&Pat>) -> (Option<String>, SiteMode) {
    let binding = first.and_then(|pat| pattern_text(parsed, pat));
    let ident = first.and_then(|pat| match pat {
        Pat::Ident(binding) => Some(binding.id.sym.to_string()),
        _ => None,
    });
    (binding, SiteMode::Functional { props_binding: ident })
}

fn pattern_text(parsed: &ParsedModule, pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(binding) => Some(binding.id.sym.to_string()),
        Pat::Object(object) => {
            let end = object
                .type_ann
                .as_ref()
                .map_or(object.span.hi, |ann| ann.span.lo.min(object.span.hi));
            let text = parsed.text(SwcSpan::new(object.span.lo, end));
            Some(text.trim_end().trim_end_matches(':').trim_end().to_string())
        }
        Pat::Assign(assign) => pattern_text(parsed, &assign.left),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SiteKind;
    use pretty_assertions::assert_eq;
    use react_parser::{parse_component, PreprocessOptions};

    fn parsed(source: &str) -> ParsedModule {
        parse_component(source, PreprocessOptions::default()).unwrap()
    }

    #[test]
    fn test_function_declaration() {
        let parsed = parsed("function Card(props) {\n  return <div>{props.children}</div>;\n}\n");
        let ModuleItem::Stmt(Stmt::Decl(Decl::Fn(func))) = &parsed.module.body[0] else {
            panic!("expected function");
        };
        let span = parsed.module.body[0].span();
        let component = from_function(&parsed, &func.ident.sym, &func.function, span).unwrap();
        assert_eq!(component.props_binding.as_deref(), Some("props"));
        assert_eq!(component.params, vec!["props"]);
        assert_eq!(component.origin, FunctionOrigin::Declaration);
        assert!(component.body.fragment().has_site(SiteKind::FunctionalChildren));
        assert!(component.source.starts_with("function Card(props)"));
    }

    #[test]
    fn test_arrow_with_typed_destructuring() {
        let parsed = parsed("const Tag = ({ label, size = 1 }: TagProps) => <b>{label}</b>;\n");
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = &parsed.module.body[0] else {
            panic!("expected variable");
        };
        let (name, arrow) = arrow_component(&var.decls[0]).unwrap();
        let component = from_arrow(&parsed, name, arrow, var.span);
        assert_eq!(component.name, "Tag");
        assert_eq!(component.props_binding.as_deref(), Some("{ label, size = 1 }"));
        assert_eq!(component.origin, FunctionOrigin::Arrow);
        let ComponentBody::Expr(body) = &component.body else {
            panic!("expected expression body");
        };
        assert_eq!(body.text, "<b>{label}</b>");
    }

    #[test]
    fn test_wrapped_arrow_is_not_a_component() {
        let parsed =
            parsed("const Memo = memo(() => null);\nconst n = 1;\nconst P = (() => null);\n");
        let candidates: Vec<Option<&str>> = parsed
            .module
            .body
            .iter()
            .map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => {
                    arrow_component(&var.decls[0]).map(|(name, _)| name)
                }
                _ => None,
            })
            .collect();
        assert_eq!(candidates, vec![None, None, Some("P")]);
    }
}
