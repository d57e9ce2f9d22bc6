//! Graph Resolver (§4.3): validates the provider set (missing, duplicate) and
//! topologically sorts it into a registration order.

use std::collections::{BTreeMap, HashSet};

use crate::error::ResolveError;
use crate::model::{DependencyId, Provider};

/// Build the provider graph, validate it, and return a deterministic
/// registration order: every provider after all of its non-defaulted
/// dependencies.
pub fn resolve_order(providers: &[Provider]) -> Result<Vec<DependencyId>, ResolveError> {
    // A BTreeMap keyed by id gives the sorted, deterministic iteration order
    // the topological visit relies on for free.
    let mut graph: BTreeMap<DependencyId, Vec<DependencyId>> = BTreeMap::new();
    for provider in providers {
        graph.insert(provider.id(), provider.dependency_edges());
    }

    let referenced: HashSet<&DependencyId> = graph.values().flatten().collect();
    let mut missing: Vec<DependencyId> = referenced
        .into_iter()
        .filter(|id| !graph.contains_key(*id))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(ResolveError::missing_dependencies(missing));
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for provider in providers {
        let id = provider.id();
        if !seen.insert(id.clone()) {
            duplicates.push(id);
        }
    }
    if !duplicates.is_empty() {
        return Err(ResolveError::duplicate_dependencies(duplicates));
    }

    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut order = Vec::new();

    for key in graph.keys().cloned().collect::<Vec<_>>() {
        visit(&key, &graph, &mut visited, &mut on_stack, &mut order)?;
    }

    Ok(order)
}

fn visit(
    node: &DependencyId,
    graph: &BTreeMap<DependencyId, Vec<DependencyId>>,
    visited: &mut HashSet<DependencyId>,
    on_stack: &mut HashSet<DependencyId>,
    order: &mut Vec<DependencyId>,
) -> Result<(), ResolveError> {
    if on_stack.contains(node) {
        let edges = graph.get(node).cloned().unwrap_or_default();
        return Err(ResolveError::circular_dependency(node.clone(), edges));
    }
    if visited.contains(node) {
        return Ok(());
    }

    on_stack.insert(node.clone());
    if let Some(edges) = graph.get(node) {
        for edge in edges.clone() {
            visit(&edge, graph, visited, on_stack, order)?;
        }
    }
    on_stack.remove(node);
    visited.insert(node.clone());
    order.push(node.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProviderForm;

    fn provider(name: Option<&str>, return_type: &str, deps: &[&str]) -> Provider {
        Provider {
            form: ProviderForm::Function,
            optional_name: name.map(str::to_string),
            return_type: return_type.to_string(),
            body: "provide".to_string(),
            parameters: deps
                .iter()
                .map(|dep| crate::model::Parameter {
                    ty: dep.to_string(),
                    label: "_".to_string(),
                    default_value: None,
                    referenced_name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn linear_chain_orders_dependencies_first() {
        let providers = vec![provider(None, "A", &["B"]), provider(None, "B", &["C"]), provider(None, "C", &[])];
        let order = resolve_order(&providers).unwrap();
        let ids: Vec<&str> = order.iter().map(DependencyId::as_str).collect();
        assert_eq!(ids, vec!["_:C", "_:B", "_:A"]);
    }

    #[test]
    fn missing_dependency_is_reported_before_ordering() {
        let providers = vec![provider(None, "A", &["B"]), provider(None, "B", &["C", "E"]), provider(None, "C", &["D"])];
        let err = resolve_order(&providers).unwrap_err();
        assert_eq!(err.to_string(), "Missing dependencies: _:D, _:E");
    }

    #[test]
    fn duplicate_provider_ids_are_reported() {
        let providers = vec![provider(None, "A", &[]), provider(None, "A", &[])];
        let err = resolve_order(&providers).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate dependencies found: _:A");
    }

    #[test]
    fn cycle_is_reported() {
        let providers = vec![provider(None, "A", &["B"]), provider(None, "B", &["C"]), provider(None, "C", &["A"])];
        let err = resolve_order(&providers).unwrap_err();
        assert!(err.to_string().starts_with("Circular dependency detected at"));
    }

    #[test]
    fn defaulted_parameter_is_pruned_from_edges() {
        let mut factory = provider(None, "Factory", &[]);
        factory.parameters.push(crate::model::Parameter {
            ty: "Delegate".to_string(),
            label: "delegate".to_string(),
            default_value: Some("Delegate()".to_string()),
            referenced_name: None,
        });
        let order = resolve_order(&[factory]).unwrap();
        assert_eq!(order.len(), 1);
    }
}
