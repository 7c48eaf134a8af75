//! The single traversal that builds a [`ComponentModel`].

use crate::assignment::{record_static, static_assignment};
use crate::caveat::{Caveat, CaveatCode, HOC_MESSAGE, MISSING_VALIDATION_MESSAGE};
use crate::class_component::{extract_class, Placement};
use crate::error::AnalyzeError;
use crate::functional::{arrow_component, from_arrow, from_function};
use crate::interface::{
    contract_members, correlate, extract_props, Correlations, ANONYMOUS_COMPONENT,
};
use crate::model::{ComponentModel, PropKind};
use crate::type_token::TypeTokenExtractor;
use react_parser::ParsedModule;
use swc_common::{Span as SwcSpan, Spanned};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};
use tracing::{debug, trace};

/// Import sources that have no meaning in the generated component.
const FRAMEWORK_PACKAGES: &[&str] = &["react", "prop-types", "react-dom"];

/// Options for [`crate::analyze`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Props are declared by TypeScript types; enables the correlation
    /// pre-pass.
    pub ts: bool,
}

pub(crate) struct Assembler<'p> {
    parsed: &'p ParsedModule,
    extractor: &'p dyn TypeTokenExtractor,
    correlations: Correlations,
    model: ComponentModel,
    /// Name and span of the class component taken from the top level.
    top_level_class: Option<(String, SwcSpan)>,
}

impl<'p> Assembler<'p> {
    pub(crate) fn new(
        parsed: &'p ParsedModule,
        options: AnalyzeOptions,
        extractor: &'p dyn TypeTokenExtractor,
    ) -> Self {
        let correlations = if options.ts {
            correlate(&parsed.module)
        } else {
            Correlations::default()
        };
        Self {
            parsed,
            extractor,
            correlations,
            model: ComponentModel::new(parsed.source()),
            top_level_class: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<ComponentModel, AnalyzeError> {
        let parsed = self.parsed;
        for item in &parsed.module.body {
            match item {
                ModuleItem::ModuleDecl(decl) => self.module_decl(decl)?,
                ModuleItem::Stmt(stmt) => self.stmt(stmt)?,
            }
        }

        self.nested_classes();

        if !self.model.has_prop_contract() && parsed.source().contains("props") {
            self.model.caveats.push(Caveat::unanchored(
                CaveatCode::MissingPropValidation,
                MISSING_VALIDATION_MESSAGE,
            ));
        }

        debug!(
            imports = self.model.imports.len(),
            declarations = self.model.declarations.len(),
            functional = self.model.functional_components.len(),
            class = self.model.class_component.is_some(),
            caveats = self.model.caveats.len(),
            "assembled component model"
        );
        Ok(self.model)
    }

    fn module_decl(&mut self, decl: &ModuleDecl) -> Result<(), AnalyzeError> {
        match decl {
            ModuleDecl::Import(import) => {
                let source = import.src.value.to_string_lossy();
                if FRAMEWORK_PACKAGES.contains(&&*source) {
                    trace!(%source, "eliding framework import");
                } else {
                    self.model
                        .imports
                        .push(self.parsed.text(import.span).to_string());
                }
            }
            ModuleDecl::ExportDecl(export) => self.decl(&export.decl, export.span)?,
            ModuleDecl::ExportDefaultDecl(export) => self.default_decl(export)?,
            ModuleDecl::ExportDefaultExpr(export) => self.default_expr(export),
            ModuleDecl::ExportNamed(_)
            | ModuleDecl::ExportAll(_)
            | ModuleDecl::TsImportEquals(_)
            | ModuleDecl::TsExportAssignment(_)
            | ModuleDecl::TsNamespaceExport(_) => self.untransferred(decl.span()),
        }
        Ok(())
    }

    fn default_decl(&mut self, export: &ExportDefaultDecl) -> Result<(), AnalyzeError> {
        match &export.decl {
            DefaultDecl::Class(class) => {
                let name = ident_or_anonymous(class.ident.as_ref());
                self.model.export_name = Some(name.clone());
                self.class(&name, &class.class, Placement::DefaultExport)?;
            }
            DefaultDecl::Fn(func) => {
                let name = ident_or_anonymous(func.ident.as_ref());
                self.model.export_name = Some(name.clone());
                // The wrapper is left out so a helper copy does not export twice.
                let source_span = SwcSpan::new(func.function.span.lo, export.span.hi);
                if let Some(component) =
                    from_function(self.parsed, &name, &func.function, source_span)
                {
                    self.model.functional_components.push(component);
                }
            }
            DefaultDecl::TsInterfaceDecl(interface) => {
                if !self.contract(&Decl::TsInterface(interface.clone()), export.span) {
                    self.declaration(export.span);
                }
            }
        }
        Ok(())
    }

    fn default_expr(&mut self, export: &ExportDefaultExpr) {
        match crate::sites::unwrap_parens(&export.expr) {
            Expr::Ident(ident) => self.model.export_name = Some(ident.sym.to_string()),
            Expr::Arrow(arrow) => {
                self.model.export_name = Some(ANONYMOUS_COMPONENT.to_string());
                let component = from_arrow(self.parsed, ANONYMOUS_COMPONENT, arrow, arrow.span);
                self.model.functional_components.push(component);
            }
            _ => {
                self.model.caveats.push(Caveat::new(
                    CaveatCode::HigherOrderComponent,
                    HOC_MESSAGE,
                    self.parsed.span(export.span),
                ));
            }
        }
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), AnalyzeError> {
        match stmt {
            Stmt::Decl(decl) => self.decl(decl, stmt.span())?,
            Stmt::Expr(expr_stmt) => {
                let recorded = static_assignment(&expr_stmt.expr).is_some_and(
                    |(component, field, value)| {
                        record_static(&mut self.model, self.parsed, component, field, value)
                    },
                );
                if !recorded {
                    self.untransferred(expr_stmt.span);
                }
            }
            Stmt::Empty(_) => {}
            Stmt::Block(_)
            | Stmt::Debugger(_)
            | Stmt::With(_)
            | Stmt::Return(_)
            | Stmt::Labeled(_)
            | Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::If(_)
            | Stmt::Switch(_)
            | Stmt::Throw(_)
            | Stmt::Try(_)
            | Stmt::While(_)
            | Stmt::DoWhile(_)
            | Stmt::For(_)
            | Stmt::ForIn(_)
            | Stmt::ForOf(_) => self.untransferred(stmt.span()),
        }
        Ok(())
    }

    /// A declaration at the top level. `item_span` covers the whole item,
    /// including an `export` keyword.
    fn decl(&mut self, decl: &Decl, item_span: SwcSpan) -> Result<(), AnalyzeError> {
        match decl {
            Decl::Class(class) => {
                self.class(&class.ident.sym, &class.class, Placement::TopLevel)?;
            }
            Decl::Fn(func) => {
                if let Some(component) =
                    from_function(self.parsed, &func.ident.sym, &func.function, item_span)
                {
                    self.model.functional_components.push(component);
                }
            }
            Decl::Var(var) => match var.decls.as_slice() {
                [declarator] if arrow_component(declarator).is_some() => {
                    if let Some((name, arrow)) = arrow_component(declarator) {
                        let component = from_arrow(self.parsed, name, arrow, item_span);
                        self.model.functional_components.push(component);
                    }
                }
                _ => self.declaration(item_span),
            },
            Decl::TsInterface(_) | Decl::TsTypeAlias(_) => {
                if !self.contract(decl, item_span) {
                    self.declaration(item_span);
                }
            }
            Decl::Using(_) | Decl::TsEnum(_) | Decl::TsModule(_) => self.declaration(item_span),
        }
        Ok(())
    }

    /// Extracts props from a correlated interface or object type alias.
    /// Returns false when `decl` declares no component's props.
    fn contract(&mut self, decl: &Decl, span: SwcSpan) -> bool {
        let Some((interface, members)) = contract_members(decl) else {
            return false;
        };
        let components: Vec<String> = self
            .correlations
            .components_for(interface)
            .map(str::to_string)
            .collect();
        if components.is_empty() {
            return false;
        }

        for component in components {
            let (props, caveats) =
                extract_props(self.parsed, &component, members, self.extractor);
            self.model.caveats.extend(caveats);
            let validated = self
                .model
                .prop_types
                .get(&component)
                .is_some_and(|props| props.values().any(|p| p.kind == PropKind::Validated));
            if validated {
                self.model.caveats.push(Caveat::new(
                    CaveatCode::DuplicatePropContract,
                    format!(
                        "`{component}` declares props both by type and by propTypes, propTypes ignored"
                    ),
                    self.parsed.span(span),
                ));
            }
            self.model.prop_types.insert(component, props);
        }
        true
    }

    fn class(
        &mut self,
        name: &str,
        class: &Class,
        placement: Placement,
    ) -> Result<(), AnalyzeError> {
        if let Some((first, _)) = &self.top_level_class {
            return Err(AnalyzeError::MultipleComponents {
                first: first.clone(),
                second: name.to_string(),
                span: self.parsed.span(class.span),
            });
        }
        self.top_level_class = Some((name.to_string(), class.span));
        let component = extract_class(&mut self.model, self.parsed, name, class, placement);
        self.model.class_component = Some(component);
        Ok(())
    }

    /// Classes below the top level: each raises a caveat, and the first is
    /// extracted when the top level has none.
    fn nested_classes(&mut self) {
        let mut finder = NestedClassFinder {
            skip: self.top_level_class.as_ref().map(|(_, span)| *span),
            found: Vec::new(),
            first: None,
        };
        self.parsed.module.visit_with(&mut finder);

        let mut found = finder.found.into_iter();
        if let (None, Some((name, class))) = (&self.top_level_class, finder.first) {
            // Extraction reports the first one itself.
            found.next();
            let component =
                extract_class(&mut self.model, self.parsed, &name, &class, Placement::Nested);
            self.model.class_component = Some(component);
        }
        for span in found {
            self.model.caveats.push(Caveat::new(
                CaveatCode::HigherOrderComponent,
                HOC_MESSAGE,
                self.parsed.span(span),
            ));
        }
    }

    fn declaration(&mut self, span: SwcSpan) {
        let mut text = self.parsed.text(span).to_string();
        let trailing = self.parsed.trailing_comments(span.hi);
        if !trailing.is_empty() {
            text = format!("{text} {}", trailing.join(" "));
        }
        self.model.declarations.push(text);
    }

    fn untransferred(&mut self, span: SwcSpan) {
        let text = self.parsed.text(span);
        let first_line = text.lines().next().unwrap_or_default().trim();
        let snippet: String = first_line.chars().take(60).collect();
        let ellipsis = if snippet.len() < text.trim().len() { "..." } else { "" };
        self.model.caveats.push(Caveat::new(
            CaveatCode::UntransferredStatement,
            format!("top-level statement not transferred: `{snippet}{ellipsis}`"),
            self.parsed.span(span),
        ));
    }
}

fn ident_or_anonymous(ident: Option<&Ident>) -> String {
    ident.map_or_else(|| ANONYMOUS_COMPONENT.to_string(), |ident| ident.sym.to_string())
}

/// Finds class declarations and expressions other than the top-level
/// component.
struct NestedClassFinder {
    skip: Option<SwcSpan>,
    found: Vec<SwcSpan>,
    first: Option<(String, Class)>,
}

impl NestedClassFinder {
    fn record(&mut self, name: &str, class: &Class) {
        if self.skip == Some(class.span) {
            return;
        }
        trace!(name, "nested class");
        if self.first.is_none() {
            self.first = Some((name.to_string(), class.clone()));
        }
        self.found.push(class.span);
    }
}

impl Visit for NestedClassFinder {
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
