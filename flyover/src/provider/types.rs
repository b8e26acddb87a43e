//! Provider types and errors

use std::collections::BTreeMap;

use thiserror::Error;

/// User agent sent to every built-in provider.
pub const DEFAULT_USER_AGENT: &str = "GPX-3D-Flyover/1.0";

/// Errors raised while building provider configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Provider name is empty or contains characters unsafe for a path segment.
    #[error("Invalid provider name '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidName(String),

    /// URL template is missing one of the `{z}`, `{x}`, `{y}` placeholders.
    #[error("URL template '{template}' is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
}

/// Configuration for one remote tile provider.
///
/// Immutable once built; the registry hands out shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct TileProviderConfig {
    url_template: String,
    headers: BTreeMap<String, String>,
}

impl TileProviderConfig {
    /// Creates a provider config, validating the URL template.
    ///
    /// The template must contain `{z}`, `{x}` and `{y}`. Providers that
    /// address tiles as row/column (ArcGIS) simply order them differently.
    pub fn new(url_template: impl Into<String>) -> Result<Self, ProviderError> {
        let url_template = url_template.into();
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !url_template.contains(placeholder) {
                return Err(ProviderError::MissingPlaceholder {
                    template: url_template,
                    placeholder,
                });
            }
        }

        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            url_template,
            headers,
        })
    }

    /// Sets (or replaces) an outbound request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the outbound request headers.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Builds the remote URL for a tile.
    ///
    /// No range validation is done; out-of-range coordinates are left for
    /// the upstream to reject.
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Checks that a provider name is usable as a single cache path segment.
pub fn validate_provider_name(name: &str) -> Result<(), ProviderError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ProviderError::InvalidName(name.to_string()))
    }
}
