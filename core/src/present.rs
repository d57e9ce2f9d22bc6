//! Presentation Mapper (§4.4): flattens the validated `(modules, order)` pair
//! into an emission-ready view. Nothing here is fallible — resolution already
//! guaranteed every id in `order` has a matching provider.

use std::collections::{BTreeSet, HashMap};

use crate::model::{DependencyId, Module, Parameter, Provider, ProviderForm};

pub struct ParameterView {
    pub ty: String,
    /// Omitted when the original label was the `_` sentinel.
    pub label: Option<String>,
    /// `referencedName` if present, else the parameter's type.
    pub resolver_name: String,
    pub is_last: bool,
}

pub struct ProviderView {
    pub module_name: String,
    pub is_function: bool,
    pub return_type: String,
    /// `optionalName ?? returnType`.
    pub registration_name: String,
    pub body: String,
    pub scope: &'static str,
    /// Only parameters without default values.
    pub parameters: Vec<ParameterView>,
}

pub struct PresentedView {
    /// Deduplicated, lexicographically sorted, includes the container import.
    pub imports: Vec<String>,
    pub providers: Vec<ProviderView>,
    /// Duplicate-free module names in first-appearance order.
    pub module_names: Vec<String>,
}

pub fn present(modules: &[Module], order: &[DependencyId], container_import: &str) -> PresentedView {
    let mut imports: BTreeSet<String> = modules.iter().flat_map(|m| m.imports.iter().cloned()).collect();
    imports.insert(container_import.to_string());

    let mut by_id: HashMap<DependencyId, (&Module, &Provider)> = HashMap::new();
    for module in modules {
        for provider in &module.providers {
            by_id.insert(provider.id(), (module, provider));
        }
    }

    let mut providers = Vec::new();
    let mut module_names = Vec::new();
    for id in order {
        let (module, provider) = match by_id.get(id) {
            Some(pair) => *pair,
            None => continue,
        };
        if !module_names.contains(&module.name) {
            module_names.push(module.name.clone());
        }
        providers.push(build_provider_view(module, provider));
    }

    PresentedView {
        imports: imports.into_iter().collect(),
        providers,
        module_names,
    }
}

fn build_provider_view(module: &Module, provider: &Provider) -> ProviderView {
    let registration_name = provider.optional_name.clone().unwrap_or_else(|| provider.return_type.clone());
    let params: Vec<&Parameter> = provider.parameters.iter().filter(|p| p.default_value.is_none()).collect();
    let last_index = params.len().saturating_sub(1);
    let parameters = params
        .into_iter()
        .enumerate()
        .map(|(i, p)| ParameterView {
            ty: p.ty.clone(),
            label: if p.label == "_" { None } else { Some(p.label.clone()) },
            resolver_name: p.referenced_name.clone().unwrap_or_else(|| p.ty.clone()),
            is_last: i == last_index,
        })
        .collect();

    ProviderView {
        module_name: module.name.clone(),
        is_function: matches!(provider.form, ProviderForm::Function),
        return_type: provider.return_type.clone(),
        registration_name,
        body: provider.body.clone(),
        scope: module.scope.as_str(),
        parameters,
    }
}
