//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::net::SocketAddr;
use std::path::PathBuf;

use ini::{Ini, Properties};

use super::file::{ConfigFile, ConfigFileError};
use super::size::parse_size;
use crate::provider::{validate_provider_name, TileProviderConfig};

/// Prefix of provider section names: `[provider.<name>]`.
const PROVIDER_SECTION_PREFIX: &str = "provider.";

/// Prefix of extra header keys inside a provider section.
const HEADER_KEY_PREFIX: &str = "header.";

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = section.get("bind") {
            config.server.bind =
                v.trim()
                    .parse::<SocketAddr>()
                    .map_err(|_| ConfigFileError::InvalidValue {
                        section: "server".to_string(),
                        key: "bind".to_string(),
                        value: v.to_string(),
                        reason: "expected an address like '127.0.0.1:5000'".to_string(),
                    })?;
        }
        if let Some(v) = section.get("max_upload_size") {
            config.server.max_upload_size =
                parse_size(v).map_err(|_| ConfigFileError::InvalidValue {
                    section: "server".to_string(),
                    key: "max_upload_size".to_string(),
                    value: v.to_string(),
                    reason: "expected format like '16MB', '512KB', or '1GB'".to_string(),
                })?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache.directory = expand_tilde(v);
            }
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
    }

    // [provider.<name>] sections
    for (section_name, properties) in ini.iter() {
        let Some(section) = section_name else {
            continue;
        };
        let Some(name) = section.strip_prefix(PROVIDER_SECTION_PREFIX) else {
            continue;
        };
        validate_provider_name(name).map_err(|e| ConfigFileError::InvalidSection {
            section: section.to_string(),
            reason: e.to_string(),
        })?;
        let provider = parse_provider_section(section, properties)?;
        config.providers.push((name.to_string(), provider));
    }

    Ok(config)
}

fn parse_provider_section(
    section: &str,
    properties: &Properties,
) -> Result<TileProviderConfig, ConfigFileError> {
    let url = properties
        .get("url")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigFileError::InvalidSection {
            section: section.to_string(),
            reason: "missing 'url'".to_string(),
        })?;

    let mut provider =
        TileProviderConfig::new(url).map_err(|e| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: "url".to_string(),
            value: url.to_string(),
            reason: e.to_string(),
        })?;

    if let Some(v) = properties.get("user_agent") {
        provider = provider.with_header("User-Agent", v.trim());
    }

    for (key, value) in properties.iter() {
        if let Some(header) = key.strip_prefix(HEADER_KEY_PREFIX) {
            if header.is_empty() {
                return Err(ConfigFileError::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "header name is empty".to_string(),
                });
            }
            provider = provider.with_header(header, value.trim());
        }
    }

    Ok(provider)
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_UPLOAD_SIZE;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        ConfigFile::from_ini_str(content)
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_server_section() {
        let config = parse(
            r#"
[server]
bind = 0.0.0.0:9000
max_upload_size = 32MB
"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.server.max_upload_size, 32 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_bind() {
        let err = parse("[server]\nbind = localhost\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "bind"
        ));
    }

    #[test]
    fn test_invalid_upload_size() {
        let err = parse("[server]\nmax_upload_size = lots\n").unwrap_err();
        assert!(err.to_string().contains("max_upload_size"));
    }

    #[test]
    fn test_upload_size_default_kept_when_absent() {
        let config = parse("[server]\nbind = 127.0.0.1:1234\n").unwrap();
        assert_eq!(config.server.max_upload_size, DEFAULT_MAX_UPLOAD_SIZE);
    }

    #[test]
    fn test_download_timeout() {
        assert_eq!(
            parse("[download]\ntimeout = 5\n").unwrap().download.timeout,
            5
        );
        assert!(parse("[download]\ntimeout = 0\n").is_err());
        assert!(parse("[download]\ntimeout = soon\n").is_err());
    }

    #[test]
    fn test_cache_directory_tilde_expansion() {
        let config = parse("[cache]\ndirectory = ~/tiles\n").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.cache.directory, home.join("tiles"));
        }
    }

    #[test]
    fn test_blank_cache_directory_keeps_default() {
        let config = parse("[cache]\ndirectory =\n").unwrap();
        assert_eq!(config.cache, ConfigFile::default().cache);
    }

    #[test]
    fn test_provider_section() {
        let config = parse(
            r#"
[provider.hillshade]
url = https://hillshade.example.com/{z}/{x}/{y}.png
user_agent = my-flyover/0.1
header.Referer = https://example.com/
"#,
        )
        .unwrap();

        assert_eq!(config.providers.len(), 1);
        let (name, provider) = &config.providers[0];
        assert_eq!(name, "hillshade");
        assert_eq!(
            provider.tile_url(1, 2, 3),
            "https://hillshade.example.com/1/2/3.png"
        );
        assert_eq!(provider.headers()["User-Agent"], "my-flyover/0.1");
        assert_eq!(provider.headers()["Referer"], "https://example.com/");
    }

    #[test]
    fn test_provider_missing_url() {
        let err = parse("[provider.broken]\nuser_agent = x\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidSection { .. }));
    }

    #[test]
    fn test_provider_url_missing_placeholder() {
        let err = parse("[provider.broken]\nurl = https://t/{z}/{x}.png\n").unwrap_err();
        assert!(err.to_string().contains("{y}"));
    }

    #[test]
    fn test_provider_unsafe_name() {
        let err = parse("[provider.Bad Name]\nurl = https://t/{z}/{x}/{y}\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidSection { .. }));
    }

    #[test]
    fn test_unrelated_sections_ignored() {
        let config = parse("[providers]\nurl = nothing\n[other]\nkey = value\n").unwrap();
        assert!(config.providers.is_empty());
    }
}
