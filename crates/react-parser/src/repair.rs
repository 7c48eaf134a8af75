//! Local tree repairs applied between parsing and extraction.
//!
//! Both repairs are deterministic and idempotent.

use crate::ParsedModule;
use swc_common::comments::Comments;
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, ClassMember, ClassMethod, Expr, Function,
    MethodKind, Module, Param, ReturnStmt, Stmt,
};
use swc_ecma_visit::{Visit, VisitMut, VisitMutWith, VisitWith};
use tracing::trace;

/// Runs both repairs.
pub fn repair(parsed: &mut ParsedModule) {
    drop_spurious_trailing_comments(parsed);
    normalize_arrow_fields(&mut parsed.module);
}

/// Drops trailing comments attached to a block-body statement when the
/// statement is directly followed by a newline. Such a comment starts on a
/// later line and belongs to whatever follows; keeping it would emit it twice.
pub fn drop_spurious_trailing_comments(parsed: &ParsedModule) {
    let mut collector = BlockStatementEnds::default();
    parsed.module.visit_with(&mut collector);

    let source = parsed.source().as_bytes();
    for end in collector.ends {
        if source.get(parsed.offset(end)) == Some(&b'\n') && parsed.comments.has_trailing(end) {
            trace!(offset = parsed.offset(end), "dropping spurious trailing comment");
            parsed.comments.take_trailing(end);
        }
    }
}

#[derive(Default)]
struct BlockStatementEnds {
    ends: Vec<BytePos>,
}

impl Visit for BlockStatementEnds {
    fn visit_block_stmt(&mut self, block: &BlockStmt) {
        self.ends.extend(block.stmts.iter().map(|stmt| stmt.span().hi));
        block.visit_children_with(self);
    }
}

/// Rewrites class properties initialized with an arrow function into
/// methods, so `handle = () => {}` and `handle() {}` look the same to the
/// extractors.
pub fn normalize_arrow_fields(module: &mut Module) {
    module.visit_mut_with(&mut ArrowFieldNormalizer);
}

struct ArrowFieldNormalizer;

impl VisitMut for ArrowFieldNormalizer {
    fn visit_mut_class_member(&mut self, member: &mut ClassMember) {
        member.visit_mut_children_with(self);

        let ClassMember::ClassProp(prop) = member else {
            return;
        };
        let Some(value) = prop.value.take() else {
            return;
        };
        let arrow = match *value {
            Expr::Arrow(arrow) => arrow,
            other => {
                prop.value = Some(Box::new(other));
                return;
            }
        };

        let method = ClassMethod {
            span: prop.span,
            key: prop.key.clone(),
            function: Box::new(arrow_into_function(arrow)),
            kind: MethodKind::Method,
            is_static: prop.is_static,
            accessibility: prop.accessibility,
            is_abstract: false,
            is_optional: prop.is_optional,
            is_override: prop.is_override,
        };
        *member = ClassMember::Method(method);
    }
}

fn arrow_into_function(arrow: ArrowExpr) -> Function {
    let body = match *arrow.body {
        BlockStmtOrExpr::BlockStmt(block) => block,
        BlockStmtOrExpr::Expr(expr) => BlockStmt {
            span: expr.span(),
            ctxt: arrow.ctxt,
            stmts: vec![Stmt::Return(ReturnStmt {
                span: expr.span(),
                arg: Some(expr),
            })],
        },
    };

    Function {
        params: arrow
            .params
            .into_iter()
            .map(|pat| Param {
                span: pat.span(),
                decorators: Vec::new(),
                pat,
            })
            .collect(),
        decorators: Vec::new(),
        span: arrow.span,
        ctxt: arrow.ctxt,
        body: Some(body),
        is_generator: arrow.is_generator,
        is_async: arrow.is_async,
        type_params: arrow.type_params,
        return_type: arrow.return_type,
    }
}
