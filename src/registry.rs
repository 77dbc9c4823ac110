//! Read-only cache of the server's plugin registry.

use std::collections::BTreeMap;

use crate::api::Plugin;
use crate::config_form::PrimitiveType;

/// Cached plugin list, refreshed whenever a page that needs it loads.
///
/// The server stays authoritative; a stale cache at run creation simply
/// surfaces as the server's validation error.
#[derive(Clone, Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Replace the cache with a freshly fetched list.
    pub fn replace(&mut self, plugins: Vec<Plugin>) {
        self.plugins = plugins;
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Look up a plugin by id.
    pub fn get(&self, plugin_id: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|plugin| plugin.id == plugin_id)
    }

    /// Config schema for a plugin; unknown ids read as an empty schema.
    pub fn schema_for(&self, plugin_id: &str) -> BTreeMap<String, PrimitiveType> {
        self.get(plugin_id)
            .map(|plugin| plugin.config_schema.clone())
            .unwrap_or_default()
    }

    /// First plugin in registry order, used as the default selection.
    pub fn first(&self) -> Option<&Plugin> {
        self.plugins.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PluginStatus;

    fn plugin(id: &str) -> Plugin {
        Plugin {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            status: PluginStatus::Active,
            error_message: None,
            config_schema: BTreeMap::from([("count".to_string(), PrimitiveType::Int)]),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn lookup_by_id_and_default_selection() {
        let mut registry = PluginRegistry::default();
        registry.replace(vec![plugin("demo"), plugin("custom")]);
        assert_eq!(registry.get("custom").unwrap().display_name, "CUSTOM");
        assert_eq!(registry.first().unwrap().id, "demo");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn unknown_plugin_reads_as_empty_schema() {
        let registry = PluginRegistry::default();
        assert!(registry.schema_for("missing").is_empty());
    }
}
