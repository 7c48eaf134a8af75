//! Collection of instance-access sites inside a code fragment.

use crate::model::{CodeFragment, Site, SiteKind};
use react_parser::ParsedModule;
use source_text::Span;
use swc_common::{Span as SwcSpan, Spanned};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

/// Which component shape a fragment belongs to.
#[derive(Debug, Clone)]
pub(crate) enum SiteMode {
    /// A class member; `ctor_props` names the constructor's props parameter.
    Class { ctor_props: Option<String> },
    /// A functional component body reading props through `props_binding`.
    Functional { props_binding: Option<String> },
}

/// A fragment plus the `setState` calls it could not express faithfully.
pub(crate) struct Collected {
    pub fragment: CodeFragment,
    /// Absolute spans of `setState` calls with a callback or non-object
    /// argument.
    pub state_updaters: Vec<Span>,
}

/// Slices `node` out of the source and records its sites.
pub(crate) fn collect<'p, N>(parsed: &'p ParsedModule, node: &N, mode: SiteMode) -> Collected
where
    N: VisitWith<SiteCollector<'p>> + Spanned,
{
    let mut collector = SiteCollector::new(parsed, node.span(), mode);
    node.visit_with(&mut collector);
    collector.finish()
}

pub(crate) struct SiteCollector<'p> {
    parsed: &'p ParsedModule,
    base: SwcSpan,
    mode: SiteMode,
    sites: Vec<Site>,
    state_updaters: Vec<Span>,
}

impl<'p> SiteCollector<'p> {
    fn new(parsed: &'p ParsedModule, base: SwcSpan, mode: SiteMode) -> Self {
        Self {
            parsed,
            base,
            mode,
            sites: Vec::new(),
            state_updaters: Vec::new(),
        }
    }

    fn finish(mut self) -> Collected {
        self.sites.sort_by_key(|site| site.range.start);
        Collected {
            fragment: CodeFragment {
                text: self.parsed.text(self.base).to_string(),
                sites: self.sites,
            },
            state_updaters: self.state_updaters,
        }
    }

    fn push(&mut self, span: SwcSpan, kind: SiteKind) {
        let base = self.parsed.span(self.base);
        let range = self.parsed.span(span);
        if base.contains_span(range) {
            self.sites.push(Site {
                range: range.relative_to(base.start),
                kind,
            });
        }
    }

    fn push_insertion(&mut self, offset: usize, kind: SiteKind) {
        let base = self.parsed.span(self.base);
        let at = Span::from_offsets(offset, offset);
        if base.contains_span(at) {
            self.sites.push(Site {
                range: at.relative_to(base.start),
                kind,
            });
        }
    }

    fn class_member(&mut self, member: &MemberExpr) -> bool {
        let SiteMode::Class { ctor_props } = &self.mode else {
            return false;
        };
        let ctor_props = ctor_props.clone();

        if let (Some(object), MemberProp::Ident(prop)) = (this_member(&member.obj), &member.prop) {
            let kind = match (object, &*prop.sym) {
                ("props", "children") => {
                    self.push(member.span, SiteKind::Children);
                    return true;
                }
                ("props", _) => SiteKind::PropsMember,
                ("state", _) => SiteKind::StateMember,
                _ => return false,
            };
            self.push(member.obj.span(), kind);
            return true;
        }
        match member_of_this(member) {
            Some("props") => {
                self.push(member.span, SiteKind::PropsObject);
                return true;
            }
            Some("state") => {
                self.push(member.span, SiteKind::StateObject);
                return true;
            }
            _ => {}
        }
        if let (Expr::Ident(object), MemberProp::Ident(_), Some(binding)) =
            (&*member.obj, &member.prop, ctor_props)
        {
            if &*object.sym == binding.as_str() {
                self.push(member.obj.span(), SiteKind::ConstructorPropsMember);
                return true;
            }
        }
        false
    }

    fn functional_member(&mut self, member: &MemberExpr) -> bool {
        let SiteMode::Functional {
            props_binding: Some(binding),
        } = &self.mode
        else {
            return false;
        };
        let is_children = match (&*member.obj, &member.prop) {
            (Expr::Ident(object), MemberProp::Ident(prop)) => {
                &*object.sym == binding.as_str() && &*prop.sym == "children"
            }
            _ => false,
        };
        if is_children {
            self.push(member.span, SiteKind::FunctionalChildren);
        }
        is_children
    }
}

impl Visit for SiteCollector<'_> {
    fn visit_member_expr(&mut self, member: &MemberExpr) {
        if self.class_member(member) || self.functional_member(member) {
            return;
        }
        member.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        let Callee::Expr(callee) = &call.callee else {
            call.visit_children_with(self);
            return;
        };
        let is_set_state = matches!(self.mode, SiteMode::Class { .. })
            && matches!(&**callee, Expr::Member(m)
                if matches!(&*m.obj, Expr::This(_))
                    && matches!(&m.prop, MemberProp::Ident(p) if &*p.sym == "setState"));
        if !is_set_state {
            call.visit_children_with(self);
            return;
        }

        self.push(callee.span(), SiteKind::SetStateCallee);
        let callee_end = self.parsed.offset(callee.span().hi);
        if let Some(paren) = self.parsed.source()[callee_end..].find('(') {
            self.push_insertion(callee_end + paren + 1, SiteKind::SetStateArgs);
        }

        let plain_object = call.args.len() == 1
            && call.args[0].spread.is_none()
            && matches!(unwrap_parens(&call.args[0].expr), Expr::Object(_));
        if !plain_object {
            self.state_updaters.push(self.parsed.span(call.span));
        }
        call.args.visit_with(self);
    }

    fn visit_jsx_attr(&mut self, attr: &JSXAttr) {
        if let JSXAttrName::Ident(name) = &attr.name {
            if &*name.sym == "className" {
                self.push(name.span, SiteKind::ClassNameAttr);
            }
        }
        attr.value.visit_with(self);
    }
}

/// `"props"` for `this.props`, `"state"` for `this.state`, and so on.
fn this_member(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Member(member) => member_of_this(member),
        _ => None,
    }
}

fn member_of_this(member: &MemberExpr) -> Option<&str> {
    match (&*member.obj, &member.prop) {
        (Expr::This(_), MemberProp::Ident(prop)) => Some(&*prop.sym),
        _ => None,
    }
}

pub(crate) fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        other => other,
    }
}
