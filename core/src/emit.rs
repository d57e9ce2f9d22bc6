//! Code Emitter (§4.5): renders a `PresentedView` into a complete generated
//! Swift source string via a small indent-tracking string builder, rather
//! than a syntax-tree builder — the contract is the literal output text.

use crate::present::{PresentedView, ProviderView};

struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Writer { out: String::new(), depth: 0 }
    }

    fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Render the view. Pure function of its input: no timestamps, no
/// environment, LF line endings, a final trailing newline.
pub fn emit(view: &PresentedView) -> String {
    let mut w = Writer::new();

    for import in &view.imports {
        w.line(&format!("import {import}"));
    }
    w.line("");

    w.line("extension Container {");
    w.indent();
    w.line("func register() {");
    w.indent();

    for name in &view.module_names {
        w.line(&format!("let {} = {}()", name.to_lowercase(), name));
    }
    if !view.module_names.is_empty() && !view.providers.is_empty() {
        w.line("");
    }

    for (i, provider) in view.providers.iter().enumerate() {
        emit_provider(&mut w, provider);
        if i + 1 < view.providers.len() {
            w.line("");
        }
    }

    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");

    w.out
}

fn emit_provider(w: &mut Writer, provider: &ProviderView) {
    let instance = provider.module_name.to_lowercase();
    w.line(&format!(
        "self.register({}.self, name: \"{}\", objectScope: .{}) {{ resolver in",
        provider.return_type, provider.registration_name, provider.scope
    ));
    w.indent();

    if !provider.is_function {
        w.line(&format!("{instance}.{}", provider.body));
    } else if provider.parameters.is_empty() {
        w.line(&format!("{instance}.{}()", provider.body));
    } else {
        w.line(&format!("{instance}.{}(", provider.body));
        w.indent();
        for (i, param) in provider.parameters.iter().enumerate() {
            let resolve = format!("resolver.resolve({}.self, name: \"{}\")", param.ty, param.resolver_name);
            // The first argument never carries a label, regardless of
            // whether one is recorded; only later labeled arguments do.
            let rendered = match &param.label {
                Some(label) if i > 0 => format!("{label}: {resolve}"),
                _ => resolve,
            };
            let rendered = if param.is_last { rendered } else { format!("{rendered},") };
            w.line(&rendered);
        }
        w.dedent();
        w.line(")");
    }

    w.dedent();
    w.line("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::ParameterView;

    #[test]
    fn emits_property_provider_with_no_arguments() {
        let view = PresentedView {
            imports: vec!["Swinject".to_string()],
            module_names: vec!["NetworkModule".to_string()],
            providers: vec![ProviderView {
                module_name: "NetworkModule".to_string(),
                is_function: false,
                return_type: "APIClient".to_string(),
                registration_name: "APIClient".to_string(),
                body: "client".to_string(),
                scope: "singleton",
                parameters: Vec::new(),
            }],
        };
        let out = emit(&view);
        assert!(out.contains("let networkModule = NetworkModule()"));
        assert!(out.contains(
            "self.register(APIClient.self, name: \"APIClient\", objectScope: .singleton) { resolver in"
        ));
        assert!(out.contains("networkModule.client"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn emits_function_provider_with_first_argument_unlabeled() {
        let view = PresentedView {
            imports: vec!["Swinject".to_string()],
            module_names: vec!["ServiceModule".to_string()],
            providers: vec![ProviderView {
                module_name: "ServiceModule".to_string(),
                is_function: true,
                return_type: "UserService".to_string(),
                registration_name: "UserService".to_string(),
                body: "provideUserService".to_string(),
                scope: "transient",
                parameters: vec![
                    ParameterView {
                        ty: "APIClient".to_string(),
                        label: Some("apiClient".to_string()),
                        resolver_name: "Production".to_string(),
                        is_last: false,
                    },
                    ParameterView {
                        ty: "Logger".to_string(),
                        label: Some("logger".to_string()),
                        resolver_name: "Logger".to_string(),
                        is_last: true,
                    },
                ],
            }],
        };
        let out = emit(&view);
        assert!(out.contains("serviceModule.provideUserService("));
        assert!(out.contains("resolver.resolve(APIClient.self, name: \"Production\"),"));
        assert!(out.contains("logger: resolver.resolve(Logger.self, name: \"Logger\")"));
        assert!(!out.contains("apiClient: resolver.resolve(APIClient"));
    }
}
