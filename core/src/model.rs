//! Shared domain model: `Module`, `Provider`, `Parameter`, `Scope`, and the
//! dependency-id newtype they're keyed by.

use std::fmt;

/// `{name ?? '_'}:{type}` — uniquely identifies a provider or a parameter
/// reference across modules. Kept as a nominal newtype rather than a bare
/// `String` so ids and arbitrary text can't be mixed up at call sites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new(name: Option<&str>, type_spelling: &str) -> Self {
        DependencyId(format!("{}:{}", name.unwrap_or("_"), type_spelling))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The syntactic shape that carried a module's providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Class,
    Struct,
    Extension,
}

/// The lifecycle of instances a module's providers hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Singleton,
    Transient,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => "singleton",
            Scope::Transient => "transient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderForm {
    Property,
    Function,
}

/// One provider parameter that isn't defaulted is one dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: String,
    /// External call-site label; `_` means unlabeled.
    pub label: String,
    /// Raw default-value source text, never evaluated. Its presence removes
    /// this parameter from graph edges and from the emitted argument list.
    pub default_value: Option<String>,
    pub referenced_name: Option<String>,
}

impl Parameter {
    pub fn id(&self) -> DependencyId {
        DependencyId::new(self.referenced_name.as_deref(), &self.ty)
    }
}

/// A computed property or return-typed function inside a module.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub form: ProviderForm,
    pub optional_name: Option<String>,
    pub return_type: String,
    /// The identifier invoked on the module instance: the property name or
    /// the function name.
    pub body: String,
    pub parameters: Vec<Parameter>,
}

impl Provider {
    pub fn id(&self) -> DependencyId {
        DependencyId::new(self.optional_name.as_deref(), &self.return_type)
    }

    /// Ordered ids of parameters with no default value.
    pub fn dependency_edges(&self) -> Vec<DependencyId> {
        self.parameters
            .iter()
            .filter(|p| p.default_value.is_none())
            .map(Parameter::id)
            .collect()
    }
}

/// A type declaration marked as providing dependencies under a single scope.
#[derive(Debug, Clone)]
pub struct Module {
    pub kind: ModuleKind,
    pub scope: Scope,
    /// The declared type name (for `extension`, the extended type's name).
    pub name: String,
    /// The union of import names visible in the file declaring this module.
    pub imports: Vec<String>,
    pub providers: Vec<Provider>,
}
