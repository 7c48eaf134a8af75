//! Class component extraction.

use crate::assignment::{prop_name, record_static, StaticField};
use crate::caveat::{Caveat, CaveatCode, HOC_MESSAGE};
use crate::model::{
    ClassComponent, ClassMemberInfo, CodeFragment, ComponentModel, LifecycleHook, MemberRole,
    UNSUPPORTED_LIFECYCLES,
};
use crate::sites::{collect, unwrap_parens, Collected, SiteMode};
use react_parser::ParsedModule;
use swc_common::Spanned;
use swc_ecma_ast::*;
use tracing::{debug, trace};

/// Where a class component was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A statement of the module body, optionally behind `export`.
    TopLevel,
    /// `export default class ...`
    DefaultExport,
    /// Anywhere else: inside a function, a call argument, an initializer.
    Nested,
}

/// Extracts `class` into a [`ClassComponent`], recording static prop
/// contracts and caveats on `model` as it goes.
pub fn extract_class(
    model: &mut ComponentModel,
    parsed: &ParsedModule,
    name: &str,
    class: &Class,
    placement: Placement,
) -> ClassComponent {
    let span = parsed.span(class.span);
    if placement == Placement::Nested {
        model
            .caveats
            .push(Caveat::new(CaveatCode::HigherOrderComponent, HOC_MESSAGE, span));
    }
    if !class.decorators.is_empty() {
        model.caveats.push(Caveat::new(
            CaveatCode::Decorators,
            "decorators unsupported",
            parsed.span(class.decorators[0].span),
        ));
    }

    let mut extractor = ClassExtractor {
        model,
        parsed,
        component: name,
        state: None,
        created: Vec::new(),
        members: Vec::new(),
    };
    for member in &class.body {
        extractor.member(member);
    }

    debug!(
        component = name,
        members = extractor.members.len(),
        created = extractor.created.len(),
        has_state = extractor.state.is_some(),
        "extracted class component"
    );
    ClassComponent {
        name: name.to_string(),
        span,
        state: extractor.state,
        created: extractor.created,
        members: extractor.members,
    }
}

struct ClassExtractor<'m, 'p> {
    model: &'m mut ComponentModel,
    parsed: &'p ParsedModule,
    component: &'p str,
    state: Option<CodeFragment>,
    created: Vec<CodeFragment>,
    members: Vec<ClassMemberInfo>,
}

impl ClassExtractor<'_, '_> {
    fn member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Constructor(ctor) => self.constructor(ctor),
            ClassMember::Method(method) => self.method(method),
            ClassMember::ClassProp(prop) => self.field(prop),
            ClassMember::PrivateMethod(private) => {
                self.untransferred(private.span, format!("#{}", private.key.name));
            }
            ClassMember::PrivateProp(private) => {
                self.untransferred(private.span, format!("#{}", private.key.name));
            }
            ClassMember::StaticBlock(block) => {
                self.caveat(
                    block.span,
                    CaveatCode::StaticMember,
                    "static block unsupported".to_string(),
                );
            }
            ClassMember::AutoAccessor(accessor) => {
                self.untransferred(accessor.span, "accessor".to_string());
            }
            ClassMember::TsIndexSignature(_) | ClassMember::Empty(_) => {}
        }
    }

    fn constructor(&mut self, ctor: &Constructor) {
        let ctor_props = ctor.params.first().and_then(|param| match param {
            ParamOrTsParamProp::Param(Param {
                pat: Pat::Ident(binding),
                ..
            }) => Some(binding.id.sym.to_string()),
            _ => None,
        });
        let Some(body) = &ctor.body else {
            return;
        };
        let mode = SiteMode::Class { ctor_props };

        for stmt in &body.stmts {
            if let Stmt::Expr(ExprStmt { expr, .. }) = stmt {
                if is_super_call(expr) || is_bind_assignment(expr) {
                    trace!(component = self.component, "dropping constructor boilerplate");
                    continue;
                }
                if let Some(value) = this_state_assignment(expr) {
                    let collected = collect(self.parsed, value, mode.clone());
                    self.state = Some(self.take(collected));
                    continue;
                }
            }

            let collected = collect(self.parsed, stmt, mode.clone());
            let mut fragment = self.take(collected);
            let trailing = self.parsed.trailing_comments(stmt.span().hi);
            if !trailing.is_empty() {
                fragment.text = format!("{} {}", fragment.text, trailing.join(" "));
            }
            self.created.push(fragment);
        }
    }

    fn method(&mut self, method: &ClassMethod) {
        let Some(name) = prop_name(&method.key) else {
            self.untransferred(method.span, "computed method".to_string());
            return;
        };
        let Some(body) = &method.function.body else {
            return;
        };

        let role = if method.is_static {
            self.caveat(
                method.span,
                CaveatCode::StaticMember,
                format!("static member `{name}` unsupported, kept as a method"),
            );
            MemberRole::Static
        } else {
            match method.kind {
                MethodKind::Getter => MemberRole::Getter,
                MethodKind::Setter => {
                    self.caveat(
                        method.span,
                        CaveatCode::Setter,
                        format!("setter `{name}` unsupported, dropped"),
                    );
                    return;
                }
                MethodKind::Method => self.method_role(&name, method),
            }
        };
        trace!(component = self.component, member = %name, ?role, "class member");

        let body = self.method_body(body);
        let params = method
            .function
            .params
            .iter()
            .map(|param| self.parsed.text(param.span).to_string())
            .collect::<Vec<_>>()
            .join(", ");

        self.members.push(ClassMemberInfo {
            name,
            role,
            params,
            body,
            is_async: method.function.is_async,
            is_generator: method.function.is_generator,
            leading_comments: self.parsed.leading_comments(method.span.lo),
        });
    }

    fn method_role(&mut self, name: &str, method: &ClassMethod) -> MemberRole {
        if name == "render" {
            return MemberRole::Render;
        }
        if let Some(hook) = LifecycleHook::from_method_name(name) {
            return MemberRole::Lifecycle(hook);
        }
        if UNSUPPORTED_LIFECYCLES.contains(&name) {
            self.caveat(
                method.span,
                CaveatCode::UnsupportedLifecycle,
                format!("lifecycle `{name}` has no Vue counterpart, kept as a method"),
            );
        }
        MemberRole::Method
    }

    fn field(&mut self, prop: &ClassProp) {
        let Some(name) = prop_name(&prop.key) else {
            self.untransferred(prop.span, "computed field".to_string());
            return;
        };
        let Some(value) = prop.value.as_deref() else {
            return;
        };

        if prop.is_static {
            let recorded = StaticField::from_name(&name).is_some_and(|field| {
                record_static(self.model, self.parsed, self.component, field, value)
            });
            if !recorded {
                self.caveat(
                    prop.span,
                    CaveatCode::StaticMember,
                    format!("static member `{name}` unsupported, dropped"),
                );
            }
            return;
        }

        let collected = collect(self.parsed, value, SiteMode::Class { ctor_props: None });
        let fragment = self.take(collected);
        if name == "state" {
            self.state = Some(fragment);
        } else {
            self.created.push(fragment.wrapped(&format!("this.{name} = "), ";"));
        }
    }

    /// The method body, braces included. A body synthesized from a concise
    /// arrow holds a lone `return` spanning the whole block and is rebuilt
    /// around the returned expression.
    fn method_body(&mut self, body: &BlockStmt) -> CodeFragment {
        let mode = SiteMode::Class { ctor_props: None };
        if let [Stmt::Return(ReturnStmt {
            arg: Some(arg),
            span,
        })] = body.stmts.as_slice()
        {
            if *span == body.span {
                let collected = collect(self.parsed, &**arg, mode);
                return self.take(collected).wrapped("{ return ", "; }");
            }
        }
        let collected = collect(self.parsed, body, mode);
        self.take(collected)
    }

    /// Keeps the fragment and reports the `setState` calls it holds that
    /// the rewrite cannot express.
    fn take(&mut self, collected: Collected) -> CodeFragment {
        for span in collected.state_updaters {
            self.model.caveats.push(Caveat::new(
                CaveatCode::StateUpdater,
                "setState with a callback or non-object argument, check the rewritten call",
                span,
            ));
        }
        collected.fragment
    }

    fn caveat(&mut self, span: swc_common::Span, code: CaveatCode, message: String) {
        self.model
            .caveats
            .push(Caveat::new(code, message, self.parsed.span(span)));
    }

    fn untransferred(&mut self, span: swc_common::Span, what: String) {
        self.caveat(
            span,
            CaveatCode::UntransferredStatement,
            format!("class member `{what}` not transferred"),
        );
    }
}

fn is_super_call(expr: &Expr) -> bool {
    matches!(expr, Expr::Call(CallExpr { callee: Callee::Super(_), .. }))
}

/// `this.x = this.y.bind(this)`
fn is_bind_assignment(expr: &Expr) -> bool {
    let Expr::Assign(AssignExpr {
        left: AssignTarget::Simple(SimpleAssignTarget::Member(target)),
        right,
        ..
    }) = expr
    else {
        return false;
    };
    if !matches!(&*target.obj, Expr::This(_)) {
        return false;
    }
    let Expr::Call(CallExpr {
        callee: Callee::Expr(callee),
        args,
        ..
    }) = unwrap_parens(right)
    else {
        return false;
    };
    let Expr::Member(MemberExpr {
        obj,
        prop: MemberProp::Ident(method),
        ..
    }) = &**callee
    else {
        return false;
    };
    &*method.sym == "bind"
        && matches!(&**obj, Expr::Member(inner) if matches!(&*inner.obj, Expr::This(_)))
        && matches!(args.as_slice(), [arg] if matches!(&*arg.expr, Expr::This(_)))
}

/// The value of `this.state = value`.
fn this_state_assignment(expr: &Expr) -> Option<&Expr> {
    let Expr::Assign(AssignExpr {
        op: AssignOp::Assign,
        left: AssignTarget::Simple(SimpleAssignTarget::Member(target)),
        right,
        ..
    }) = expr
    else {
        return None;
    };
    match (&*target.obj, &target.prop) {
        (Expr::This(_), MemberProp::Ident(prop)) if &*prop.sym == "state" => Some(&**right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SiteKind;
    use pretty_assertions::assert_eq;
    use react_parser::{parse_component, PreprocessOptions};

    fn extract(source: &str) -> (ClassComponent, ComponentModel) {
        let parsed = parse_component(source, PreprocessOptions::default()).unwrap();
        let mut model = ComponentModel::new(parsed.source());
        let class = parsed
            .module
            .body
            .iter()
            .find_map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) => Some(class),
                _ => None,
            })
            .unwrap();
        let component = extract_class(
            &mut model,
            &parsed,
            &class.ident.sym,
            &class.class,
            Placement::TopLevel,
        );
        (component, model)
    }

    #[test]
    fn test_member_roles() {
        let (component, model) = extract(
            "class Clock extends Component {\n  componentDidMount() { this.tick(); }\n  shouldComponentUpdate() { return true; }\n  get label() { return this.props.label; }\n  set label(v) {}\n  tick = () => this.setState({ now: Date.now() });\n  render() { return <span>{this.state.now}</span>; }\n}\n",
        );
        let roles: Vec<(&str, MemberRole)> = component
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.role))
            .collect();
        assert_eq!(
            roles,
            vec![
                ("componentDidMount", MemberRole::Lifecycle(LifecycleHook::DidMount)),
                ("shouldComponentUpdate", MemberRole::Method),
                ("label", MemberRole::Getter),
                ("tick", MemberRole::Method),
                ("render", MemberRole::Render),
            ]
        );
        let codes: Vec<CaveatCode> = model.caveats.iter().map(|c| c.code).collect();
        assert_eq!(codes, vec![CaveatCode::UnsupportedLifecycle, CaveatCode::Setter]);
    }

    #[test]
    fn test_constructor_state_and_created() {
        let (component, model) = extract(
            "class Form extends Component {\n  constructor(props) {\n    super(props);\n    this.state = { value: props.initial };\n    this.submit = this.submit.bind(this);\n    this.timer = null; // cleared on unmount\n  }\n  submit() {}\n  render() { return null; }\n}\n",
        );
        let state = component.state.unwrap();
        assert_eq!(state.text, "{ value: props.initial }");
        assert_eq!(state.sites.len(), 1);
        assert_eq!(state.sites[0].kind, SiteKind::ConstructorPropsMember);
        assert_eq!(
            component.created.iter().map(|f| f.text.as_str()).collect::<Vec<_>>(),
            vec!["this.timer = null; // cleared on unmount"]
        );
        assert!(model.caveats.is_empty());
    }

    #[test]
    fn test_fields_and_statics() {
        let (component, model) = extract(
            "class List extends Component {\n  static propTypes = { items: PropTypes.array };\n  static defaultProps = { items: [] };\n  static displayName = 'TodoList';\n  static contextTypes = {};\n  state = { open: false };\n  count = 0;\n  render() { return null; }\n}\n",
        );
        assert_eq!(component.state.unwrap().text, "{ open: false }");
        assert_eq!(component.created[0].text, "this.count = 0;");
        assert_eq!(
            model.prop_types["List"]["items"].vue_type,
            Some(crate::model::VueType::Array)
        );
        assert_eq!(model.default_props["List"]["items"], "[]");
        assert_eq!(model.display_names["List"], "TodoList");
        assert_eq!(model.caveats.len(), 1);
        assert_eq!(model.caveats.iter().next().unwrap().code, CaveatCode::StaticMember);
    }

    #[test]
    fn test_decorators_and_leading_comments() {
        let (component, model) = extract(
            "@observer\nclass Store extends Component {\n  // Renders the store.\n  render() { return null; }\n}\n",
        );
        assert_eq!(component.members[0].leading_comments, vec!["// Renders the store."]);
        assert_eq!(model.caveats.messages(), vec!["decorators unsupported"]);
    }

    #[test]
    fn test_set_state_updater_caveat() {
        let (_, model) = extract(
            "class A extends Component {\n  inc() { this.setState(s => ({ n: s.n + 1 })); }\n  render() { return null; }\n}\n",
        );
        assert!(model.caveats.contains(CaveatCode::StateUpdater));
    }
}
