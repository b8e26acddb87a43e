//! Static registry of tile providers.
//!
//! The registry is the only place that decides which remote hosts may be
//! contacted. It is built once at startup and shared read-only by every
//! request handler.

use std::collections::BTreeMap;

use super::types::{validate_provider_name, ProviderError, TileProviderConfig};

/// Built-in providers: `(name, url template)`.
const BUILTIN_PROVIDERS: &[(&str, &str)] = &[
    (
        "esri-satellite",
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    ),
    ("openstreetmap", "https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
    ("osm-topo", "https://tile.opentopomap.org/{z}/{x}/{y}.png"),
    (
        "terrain",
        "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png",
    ),
];

/// Named set of tile providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, TileProviderConfig>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in providers.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, template) in BUILTIN_PROVIDERS {
            // Built-in templates are known-good.
            if let Ok(config) = TileProviderConfig::new(*template) {
                registry.providers.insert((*name).to_string(), config);
            }
        }
        registry
    }

    /// Adds a provider, replacing any existing one with the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        config: TileProviderConfig,
    ) -> Result<(), ProviderError> {
        let name = name.into();
        validate_provider_name(&name)?;
        self.providers.insert(name, config);
        Ok(())
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_provider(
        mut self,
        name: impl Into<String>,
        config: TileProviderConfig,
    ) -> Result<Self, ProviderError> {
        self.insert(name, config)?;
        Ok(self)
    }

    /// Looks up a provider by name.
    pub fn get(&self, name: &str) -> Option<&TileProviderConfig> {
        self.providers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Provider names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}
