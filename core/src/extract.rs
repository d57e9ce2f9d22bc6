//! Module Extractor and Provider Extractor (§4.1/§4.2): walk a parsed file's
//! top-level declarations and turn scope-conforming type declarations into
//! `Module`s, and their `var`/`func` members into `Provider`s.

use crate::config::Config;
use crate::model::{Module, ModuleKind, Parameter, Provider, ProviderForm};
use crate::syntax::{Attribute, Declaration, FunctionDecl, Member, ParameterDecl, ParsedFile, TypeDecl, VariableDecl};

/// Walk one parsed file's top-level declarations and extract every
/// scope-conforming module. Malformed or non-conforming declarations simply
/// yield no module: there are no semantic failures here (§4.1).
pub fn extract_modules(file: &ParsedFile, config: &Config) -> Vec<Module> {
    file.decls
        .iter()
        .filter_map(|decl| match decl {
            Declaration::Class(t) => extract_module(t, ModuleKind::Class, file, config),
            Declaration::Struct(t) => extract_module(t, ModuleKind::Struct, file, config),
            Declaration::Extension(t) => extract_module(t, ModuleKind::Extension, file, config),
            Declaration::Function(_) | Declaration::Variable(_) | Declaration::Import(_) => None,
        })
        .collect()
}

fn extract_module(decl: &TypeDecl, kind: ModuleKind, file: &ParsedFile, config: &Config) -> Option<Module> {
    // The first recognized scope marker in source order wins.
    let scope = decl.conformances.iter().find_map(|c| config.scope_for(c))?;
    let providers = decl.members.iter().filter_map(|member| extract_provider(member, config)).collect();
    Some(Module {
        kind,
        scope,
        name: decl.name.clone(),
        imports: file.imports.clone(),
        providers,
    })
}

fn extract_provider(member: &Member, config: &Config) -> Option<Provider> {
    match member {
        Member::Variable(v) => extract_property_provider(v, config),
        Member::Function(f) => extract_function_provider(f, config),
    }
}

/// A variable is a property provider iff it declares exactly one binding,
/// none of its bindings has an initializer, and it carries an explicit type
/// annotation.
fn extract_property_provider(v: &VariableDecl, config: &Config) -> Option<Provider> {
    if v.binding_count != 1 || v.has_initializer {
        return None;
    }
    let return_type = v.ty.clone()?;
    let optional_name = Attribute::find_named(&v.attrs, &config.naming_attribute).map(str::to_string);
    Some(Provider {
        form: ProviderForm::Property,
        optional_name,
        return_type,
        body: v.name.clone(),
        parameters: Vec::new(),
    })
}

/// A function is a provider iff it declares an explicit return type;
/// void-returning functions are ignored.
fn extract_function_provider(f: &FunctionDecl, config: &Config) -> Option<Provider> {
    let return_type = f.return_type.clone()?;
    let optional_name = Attribute::find_named(&f.attrs, &config.naming_attribute).map(str::to_string);
    let parameters = f.parameters.iter().map(|p| extract_parameter(p, config)).collect();
    Some(Provider {
        form: ProviderForm::Function,
        optional_name,
        return_type,
        body: f.name.clone(),
        parameters,
    })
}

fn extract_parameter(p: &ParameterDecl, config: &Config) -> Parameter {
    // The parser has already stripped any leading attribute wrapper off the
    // type spelling itself, so `p.ty` is already the cleaned-up base type.
    let referenced_name = Attribute::find_named(&p.attrs, &config.parameter_name_attribute).map(str::to_string);
    Parameter {
        ty: p.ty.clone(),
        label: p.label.clone(),
        default_value: p.default_value.clone(),
        referenced_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn extracts_singleton_module_with_property_provider() {
        let file = parse(
            r#"
            import Swinject

            class NetworkModule: SingletonModule {
                var client: APIClient {
                    APIClient()
                }
            }
            "#,
        );
        let config = Config::default();
        let modules = extract_modules(&file, &config);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "NetworkModule");
        assert_eq!(modules[0].imports, vec!["Swinject".to_string()]);
        assert_eq!(modules[0].providers.len(), 1);
        assert_eq!(modules[0].providers[0].id().as_str(), "_:APIClient");
    }

    #[test]
    fn non_conforming_declaration_yields_no_module() {
        let file = parse(
            r#"
            class PlainHelper: Equatable {
                var value: Int {
                    0
                }
            }
            "#,
        );
        let modules = extract_modules(&file, &Config::default());
        assert!(modules.is_empty());
    }

    #[test]
    fn stored_property_and_void_function_are_not_providers() {
        let file = parse(
            r#"
            class Module: TransientModule {
                var count: Int = 0
                func configure() {
                    print("noop")
                }
                var client: APIClient {
                    APIClient()
                }
            }
            "#,
        );
        let modules = extract_modules(&file, &Config::default());
        assert_eq!(modules[0].providers.len(), 1);
        assert_eq!(modules[0].providers[0].body, "client");
    }

    #[test]
    fn naming_attribute_becomes_optional_name() {
        let file = parse(
            r#"
            class NetworkModule: SingletonModule {
                @Named("Production")
                var apiClient: APIClient {
                    APIClient()
                }
            }
            "#,
        );
        let modules = extract_modules(&file, &Config::default());
        assert_eq!(modules[0].providers[0].optional_name.as_deref(), Some("Production"));
        assert_eq!(modules[0].providers[0].id().as_str(), "Production:APIClient");
    }

    #[test]
    fn function_provider_drops_defaulted_parameter_from_edges() {
        let file = parse(
            r#"
            class ServiceModule: TransientModule {
                func provideFactory(delegate: Delegate = Delegate()) -> Factory {
                    Factory(delegate: delegate)
                }
            }
            "#,
        );
        let modules = extract_modules(&file, &Config::default());
        let provider = &modules[0].providers[0];
        assert_eq!(provider.parameters.len(), 1);
        assert!(provider.dependency_edges().is_empty());
    }

    #[test]
    fn extension_module_name_is_extended_type() {
        let file = parse(
            r#"
            extension Container: SingletonModule {
                var logger: Logger {
                    Logger()
                }
            }
            "#,
        );
        let modules = extract_modules(&file, &Config::default());
        assert_eq!(modules[0].name, "Container");
        assert!(matches!(modules[0].kind, ModuleKind::Extension));
    }
}
