//! Pipeline configuration: attribute tokens, scope marker names, and the
//! container import. Everything the extractor/resolver/emitter need to vary
//! between target projects is threaded explicitly through this value — there
//! is no global state in the core (see the Design Notes on global state).

use crate::model::Scope;

/// Conformance names that mark a type declaration as a module, and the scope
/// each one maps to.
#[derive(Debug, Clone)]
pub struct ScopeMarkers {
    pub singleton: String,
    pub transient: String,
}

impl Default for ScopeMarkers {
    fn default() -> Self {
        ScopeMarkers {
            singleton: "SingletonModule".to_string(),
            transient: "TransientModule".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Substring that identifies a name-carrying attribute on a provider
    /// declaration.
    pub naming_attribute: String,
    /// Substring that identifies a name-carrying attribute on a parameter.
    pub parameter_name_attribute: String,
    pub scope_markers: ScopeMarkers,
    /// Fixed container import appended to the import set unconditionally.
    pub container_import: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            naming_attribute: "Named".to_string(),
            parameter_name_attribute: "Named".to_string(),
            scope_markers: ScopeMarkers::default(),
            container_import: "Swinject".to_string(),
        }
    }
}

impl Config {
    /// Look up the scope for a recognized conformance name, if any.
    pub fn scope_for(&self, conformance: &str) -> Option<Scope> {
        if conformance == self.scope_markers.singleton {
            Some(Scope::Singleton)
        } else if conformance == self.scope_markers.transient {
            Some(Scope::Transient)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_default_scope_markers() {
        let config = Config::default();
        assert_eq!(config.scope_for("SingletonModule"), Some(Scope::Singleton));
        assert_eq!(config.scope_for("TransientModule"), Some(Scope::Transient));
        assert_eq!(config.scope_for("Codable"), None);
    }
}
