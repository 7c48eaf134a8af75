//! The framework-neutral component model.

use crate::caveat::CaveatLog;
use indexmap::IndexMap;
use source_text::Span;

/// Vue's runtime prop types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VueType {
    Array,
    Boolean,
    Function,
    Number,
    Object,
    String,
    Symbol,
}

impl VueType {
    /// Looks up a declared type token. The table is exact and
    /// case-sensitive: `String` or `string[]` are not known tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "array" => Some(VueType::Array),
            "bool" | "boolean" => Some(VueType::Boolean),
            "func" => Some(VueType::Function),
            "number" => Some(VueType::Number),
            "object" => Some(VueType::Object),
            "string" => Some(VueType::String),
            "symbol" => Some(VueType::Symbol),
            _ => None,
        }
    }

    /// The constructor name used in a Vue `props` block.
    pub fn as_str(&self) -> &'static str {
        match self {
            VueType::Array => "Array",
            VueType::Boolean => "Boolean",
            VueType::Function => "Function",
            VueType::Number => "Number",
            VueType::Object => "Object",
            VueType::String => "String",
            VueType::Symbol => "Symbol",
        }
    }
}

/// Which mechanism declared a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PropKind {
    /// A member of a TypeScript interface or object type.
    Typed,
    /// A `propTypes` validator.
    Validated,
}

/// One declared prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropDescriptor {
    pub kind: PropKind,
    pub vue_type: Option<VueType>,
    pub required: bool,
    /// The prop gets an always-pass validator instead of a type.
    pub has_custom_validator: bool,
}

impl PropDescriptor {
    /// A descriptor for a type token; unknown tokens fall back to the
    /// always-pass validator.
    pub fn from_token(kind: PropKind, token: Option<&str>, required: bool) -> Self {
        let vue_type = token.and_then(VueType::from_token);
        Self {
            kind,
            vue_type,
            required,
            has_custom_validator: vue_type.is_none(),
        }
    }

    /// A descriptor for a callable prop.
    pub fn function(kind: PropKind, required: bool) -> Self {
        Self {
            kind,
            vue_type: Some(VueType::Function),
            required,
            has_custom_validator: false,
        }
    }
}

/// Props of one component, in declaration order.
pub type PropMap = IndexMap<String, PropDescriptor>;

/// A verbatim slice of the source plus the instance-access sites inside it.
///
/// Site ranges are relative to `text`. The generator decides what each site
/// becomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CodeFragment {
    pub text: String,
    pub sites: Vec<Site>,
}

impl CodeFragment {
    /// A fragment with no sites.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sites: Vec::new(),
        }
    }

    /// Surrounds the fragment with fixed text, keeping its sites in place.
    pub fn wrapped(self, prefix: &str, suffix: &str) -> Self {
        let delta = prefix.len() as u32;
        Self {
            text: format!("{prefix}{}{suffix}", self.text),
            sites: self
                .sites
                .into_iter()
                .map(|site| Site {
                    range: site.range.shifted(delta),
                    kind: site.kind,
                })
                .collect(),
        }
    }

    /// Returns true if any site has the given kind.
    pub fn has_site(&self, kind: SiteKind) -> bool {
        self.sites.iter().any(|site| site.kind == kind)
    }
}

/// A place in a fragment that refers to the component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Site {
    pub range: Span,
    pub kind: SiteKind,
}

/// What an instance-access site reads or calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SiteKind {
    /// The `this.props` part of `this.props.name`.
    PropsMember,
    /// The `this.state` part of `this.state.name`.
    StateMember,
    /// A bare `this.props`.
    PropsObject,
    /// A bare `this.state`.
    StateObject,
    /// The whole of `this.props.children`.
    Children,
    /// The `props` part of `props.name` inside a constructor taking `props`.
    ConstructorPropsMember,
    /// The `this.setState` callee.
    SetStateCallee,
    /// The empty range right after the `(` of a `setState` call.
    SetStateArgs,
    /// The name of a `className` JSX attribute.
    ClassNameAttr,
    /// The whole of `<binding>.children` in a functional component.
    FunctionalChildren,
}

/// React lifecycle methods with a Vue counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LifecycleHook {
    WillMount,
    DidMount,
    WillUpdate,
    DidUpdate,
    WillUnmount,
    DidCatch,
}

impl LifecycleHook {
    /// Maps a React method name, including the `UNSAFE_` spellings.
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "componentWillMount" | "UNSAFE_componentWillMount" => Some(LifecycleHook::WillMount),
            "componentDidMount" => Some(LifecycleHook::DidMount),
            "componentWillUpdate" | "UNSAFE_componentWillUpdate" => {
                Some(LifecycleHook::WillUpdate)
            }
            "componentDidUpdate" => Some(LifecycleHook::DidUpdate),
            "componentWillUnmount" => Some(LifecycleHook::WillUnmount),
            "componentDidCatch" => Some(LifecycleHook::DidCatch),
            _ => None,
        }
    }
}

/// React lifecycle methods with no Vue counterpart.
pub const UNSUPPORTED_LIFECYCLES: &[&str] = &[
    "shouldComponentUpdate",
    "componentWillReceiveProps",
    "UNSAFE_componentWillReceiveProps",
    "getSnapshotBeforeUpdate",
    "getDerivedStateFromProps",
    "getDerivedStateFromError",
    "getChildContext",
];

/// What a class member becomes in the generated component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MemberRole {
    Render,
    Lifecycle(LifecycleHook),
    Getter,
    Method,
    Static,
}

/// One method-like member of a class component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassMemberInfo {
    pub name: String,
    pub role: MemberRole,
    /// Parameter list source, without the parentheses.
    pub params: String,
    /// The body block, braces included.
    pub body: CodeFragment,
    pub is_async: bool,
    pub is_generator: bool,
    /// Comments written directly above the member.
    pub leading_comments: Vec<String>,
}

/// The single class component of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassComponent {
    pub name: String,
    pub span: Span,
    /// The initial state expression.
    pub state: Option<CodeFragment>,
    /// Statements to run when the instance is created, in source order.
    pub created: Vec<CodeFragment>,
    pub members: Vec<ClassMemberInfo>,
}

impl ClassComponent {
    /// Members with the given role, in source order.
    pub fn members_with(&self, role: MemberRole) -> impl Iterator<Item = &ClassMemberInfo> {
        self.members.iter().filter(move |member| member.role == role)
    }
}

/// How a functional component was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FunctionOrigin {
    /// `function Name(props) { ... }`
    Declaration,
    /// `const Name = (props) => ...`
    Arrow,
}

/// A functional component body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComponentBody {
    /// A block, braces included.
    Block(CodeFragment),
    /// The expression of a concise arrow body.
    Expr(CodeFragment),
}

impl ComponentBody {
    pub fn fragment(&self) -> &CodeFragment {
        match self {
            ComponentBody::Block(fragment) | ComponentBody::Expr(fragment) => fragment,
        }
    }
}

/// A top-level functional component.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionalComponent {
    pub name: String,
    /// Parameter sources, type annotations included.
    pub params: Vec<String>,
    /// The first parameter's pattern without its type annotation.
    pub props_binding: Option<String>,
    pub body: ComponentBody,
    pub origin: FunctionOrigin,
    pub is_async: bool,
    /// The whole declaration, verbatim.
    pub source: String,
    pub span: Span,
}

/// Everything the generator needs, extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentModel {
    /// Import statements, minus the React framework packages.
    pub imports: Vec<String>,
    /// Top-level declarations that are not components, verbatim.
    pub declarations: Vec<String>,
    pub class_component: Option<ClassComponent>,
    pub functional_components: Vec<FunctionalComponent>,
    /// Component name to its declared props.
    pub prop_types: IndexMap<String, PropMap>,
    /// Component name to prop name to default value source.
    pub default_props: IndexMap<String, IndexMap<String, String>>,
    /// Component name to explicit display name.
    pub display_names: IndexMap<String, String>,
    pub caveats: CaveatLog,
    /// The identifier exported as default.
    pub export_name: Option<String>,
    /// The cleaned text every slice was taken from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub source_text: String,
}

impl ComponentModel {
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            ..Default::default()
        }
    }

    /// Returns true if either prop path produced anything.
    pub fn has_prop_contract(&self) -> bool {
        !self.prop_types.is_empty() || !self.default_props.is_empty()
    }

    /// The functional component the file is about: the one exported as
    /// default, else the first one.
    pub fn primary_functional(&self) -> Option<&FunctionalComponent> {
        self.export_name
            .as_deref()
            .and_then(|name| self.functional_components.iter().find(|c| c.name == name))
            .or_else(|| self.functional_components.first())
    }
}
