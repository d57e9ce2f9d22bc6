//! The tagged-variant syntax tree produced by the lexer/parser front end.
//!
//! Nothing here is semantic: types are kept as their exact source spelling, and
//! attributes are a flat list rather than a typed table. The extractor is the only
//! consumer that assigns meaning to any of this.

/// A `@Name` or `@Name("literal")` attribute attached to a declaration or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute's bare name, e.g. `Named` in `@Named("Production")`.
    pub name: String,
    /// The first string-literal argument, if any.
    pub arg: Option<String>,
}

impl Attribute {
    /// Find the first attribute whose name contains `token` and return its string
    /// argument. Substring match, not equality, per the naming-attribute contract.
    pub fn find_named<'a>(attrs: &'a [Attribute], token: &str) -> Option<&'a str> {
        attrs
            .iter()
            .find(|attr| attr.name.contains(token))
            .and_then(|attr| attr.arg.as_deref())
    }
}

/// One function or property parameter.
#[derive(Debug, Clone)]
pub struct ParameterDecl {
    pub attrs: Vec<Attribute>,
    /// External call-site label; `_` means unlabeled.
    pub label: String,
    /// Internal binding name used inside the function body (unused by emission,
    /// kept for fidelity to the source).
    pub name: String,
    pub ty: String,
    /// Raw default-value source text, never evaluated.
    pub default_value: Option<String>,
}

/// A `func` member or top-level function.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub attrs: Vec<Attribute>,
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: Option<String>,
}

/// A `var` member or top-level variable.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub attrs: Vec<Attribute>,
    /// Number of bindings declared on this statement (`var a, b: Int` is 2).
    pub binding_count: usize,
    pub name: String,
    pub ty: Option<String>,
    pub has_initializer: bool,
}

/// A member recognized inside a type declaration's body.
#[derive(Debug, Clone)]
pub enum Member {
    Variable(VariableDecl),
    Function(FunctionDecl),
}

/// The shared shape of `class` / `struct` / `extension` declarations.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub attrs: Vec<Attribute>,
    /// The declared name (for `extension`, the extended type's name).
    pub name: String,
    pub conformances: Vec<String>,
    pub members: Vec<Member>,
}

/// A top-level syntactic construct recognized by the parser.
#[derive(Debug, Clone)]
pub enum Declaration {
    Import(String),
    Class(TypeDecl),
    Struct(TypeDecl),
    Extension(TypeDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
}

/// One source file's parse result.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Every import name textually present in the file, in source order.
    pub imports: Vec<String>,
    pub decls: Vec<Declaration>,
}
