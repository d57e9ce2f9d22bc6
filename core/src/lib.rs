//! Dependency-injection registration code generator core.
//!
//! Pipeline: lex/parse source text into a [`syntax::ParsedFile`], extract
//! [`model::Module`]s and their providers, resolve the dependency graph into
//! a registration order, reshape into a presentation view, and emit a single
//! generated source string. Everything here is synchronous and
//! single-threaded; there is no shared mutable state across stages (see the
//! concurrency notes this crate is built from).

pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod graph;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod present;
pub mod syntax;

pub use config::Config;
pub use error::ResolveError;
pub use model::{DependencyId, Module};
pub use syntax::ParsedFile;

/// Parse one source file's contents into a [`ParsedFile`]. Never fails: a
/// malformed file simply yields whatever prefix of declarations was
/// recognized.
pub fn parse_source(source: &str) -> ParsedFile {
    parser::parse(source)
}

/// Run the full pipeline over a set of already-parsed files and produce the
/// generated source string, or the first validation failure encountered.
pub fn generate(files: &[ParsedFile], config: &Config) -> Result<String, ResolveError> {
    let modules: Vec<Module> = files.iter().flat_map(|file| extract::extract_modules(file, config)).collect();
    let providers: Vec<model::Provider> = modules.iter().flat_map(|m| m.providers.iter().cloned()).collect();

    let order = graph::resolve_order(&providers)?;
    let view = present::present(&modules, &order, &config.container_import);
    Ok(emit::emit(&view))
}

/// Convenience: parse and generate directly from raw source strings, for
/// callers that haven't already parsed their files.
pub fn generate_from_sources(sources: &[String], config: &Config) -> Result<String, ResolveError> {
    let files: Vec<ParsedFile> = sources.iter().map(|s| parse_source(s)).collect();
    generate(&files, config)
}
