//! The core's error taxonomy. Every variant is fatal to the generation run:
//! the resolver never recovers locally, it surfaces the first validation
//! failure to the caller.

use std::fmt;

use thiserror::Error;

use crate::model::DependencyId;

/// A comma-joined list of ids, used for the missing/duplicate messages.
#[derive(Debug, Clone)]
pub struct IdList(pub Vec<DependencyId>);

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(DependencyId::as_str).collect::<Vec<_>>().join(", ");
        f.write_str(&joined)
    }
}

/// An arrow-joined list of edges, used for the circular-dependency message.
#[derive(Debug, Clone)]
pub struct EdgeList(pub Vec<DependencyId>);

impl fmt::Display for EdgeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(DependencyId::as_str).collect::<Vec<_>>().join(" -> ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Missing dependencies: {0}")]
    MissingDependencies(IdList),

    #[error("Duplicate dependencies found: {0}")]
    DuplicateDependencies(IdList),

    #[error("Circular dependency detected at '{0}' with one of its dependencies: {1}")]
    CircularDependency(DependencyId, EdgeList),
}

impl ResolveError {
    pub fn missing_dependencies(ids: Vec<DependencyId>) -> Self {
        ResolveError::MissingDependencies(IdList(ids))
    }

    pub fn duplicate_dependencies(ids: Vec<DependencyId>) -> Self {
        ResolveError::DuplicateDependencies(IdList(ids))
    }

    pub fn circular_dependency(node: DependencyId, edges: Vec<DependencyId>) -> Self {
        ResolveError::CircularDependency(node, EdgeList(edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependencies_message() {
        let err = ResolveError::missing_dependencies(vec![
            DependencyId::new(None, "D"),
            DependencyId::new(None, "E"),
        ]);
        assert_eq!(err.to_string(), "Missing dependencies: _:D, _:E");
    }

    #[test]
    fn circular_dependency_message() {
        let err = ResolveError::circular_dependency(
            DependencyId::new(None, "A"),
            vec![DependencyId::new(None, "A")],
        );
        assert_eq!(
            err.to_string(),
            "Circular dependency detected at '_:A' with one of its dependencies: _:A"
        );
    }
}
