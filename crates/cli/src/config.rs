use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub(crate) const DEFAULT_BASE_URL: &str = "https://rapport.local/";
pub(crate) const ENV_BASE_URL: &str = "RAPPORT_BASE_URL";
pub(crate) const ENV_PRETTY: &str = "RAPPORT_PRETTY";

/// Keys accepted in a `--config` file (JSON or TOML).
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    pretty: Option<bool>,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default)]
pub(crate) struct ConfigFlags<'a> {
    pub config: Option<&'a Path>,
    pub base_url: Option<&'a str>,
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub base_url: String,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pretty: false,
        }
    }
}

impl Settings {
    pub(crate) fn from_env(flags: &ConfigFlags<'_>) -> Result<Self> {
        Self::resolve(flags, |key| std::env::var(key).ok())
    }

    /// Flag > environment > file > default.
    pub(crate) fn resolve(
        flags: &ConfigFlags<'_>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = match flags.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };
        let mut settings = Settings::default();

        if let Some(base_url) = file.base_url {
            settings.base_url = base_url;
        }
        if let Some(pretty) = file.pretty {
            settings.pretty = pretty;
        }

        if let Some(base_url) = env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            settings.base_url = base_url;
        }
        if let Some(raw) = env(ENV_PRETTY) {
            settings.pretty = parse_bool(&raw)
                .ok_or_else(|| anyhow!("{ENV_PRETTY} must be 1/0/true/false, got {raw:?}"))?;
        }

        if let Some(base_url) = flags.base_url {
            settings.base_url = base_url.to_string();
        }
        if flags.pretty {
            settings.pretty = true;
        }

        settings.base_url = settings.base_url.trim().to_string();
        if settings.base_url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        Ok(settings)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_raw(&bytes).with_context(|| format!("Invalid config {}", path.display()))
}

fn parse_raw(bytes: &[u8]) -> Result<FileConfig> {
    match serde_json::from_slice(bytes) {
        Ok(config) => Ok(config),
        Err(json_err) if json_err.is_syntax() || json_err.is_eof() => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })
        }
        Err(json_err) => Err(anyhow!("Config parse error: {json_err}")),
    }
}
