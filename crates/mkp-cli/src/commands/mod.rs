//! Command handler modules for the `mkp` CLI.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod order;
pub mod review;
pub mod window;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, warn};

use mkp_api::{ActionGateway, HttpBackend};
use mkp_config::secrets::resolve_api_token;
use mkp_config::{report_unused_keys, ApiSettings, Surface, UnusedKeyPolicy};

/// Fallback base URL when no `--config` is given.
pub const ENV_API_BASE_URL: &str = "MKP_API_BASE_URL";

pub type AdminGateway = ActionGateway<HttpBackend>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Build the admin gateway from layered config, or from the environment when
/// no config path is given. The admin token is required either way.
pub fn connect_admin(config_paths: &[String]) -> Result<AdminGateway> {
    let (settings, config_json) = if config_paths.is_empty() {
        let base_url = std::env::var(ENV_API_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| {
                format!("CONFIG_MISSING: pass --config <path> or set {ENV_API_BASE_URL}")
            })?;
        let config_json = json!({ "api": { "base_url": base_url } });
        (ApiSettings::from_config_json(&config_json)?, config_json)
    } else {
        let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
        let loaded = mkp_config::load_layered_yaml(&path_refs)?;
        debug!(config_hash = %loaded.config_hash, "config loaded");
        warn_unused_keys(&loaded.config_json)?;
        (
            ApiSettings::from_config_json(&loaded.config_json)?,
            loaded.config_json,
        )
    };

    let token = resolve_api_token(&config_json, Surface::Admin)?;
    let backend = HttpBackend::new(
        &settings.base_url,
        Duration::from_secs(settings.timeout_secs),
        token.value,
    )
    .context("backend init failed")?;
    Ok(ActionGateway::new(backend))
}

fn warn_unused_keys(config_json: &Value) -> Result<()> {
    let report = report_unused_keys(Surface::Admin, config_json, UnusedKeyPolicy::Warn)?;
    if !report.is_clean() {
        warn!(
            surface = %report.surface,
            unused = ?report.unused_leaf_pointers,
            "config contains keys the admin surface does not read"
        );
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp argument.
pub fn parse_utc(flag: &str, raw: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(raw.trim())
        .with_context(|| format!("invalid --{flag} '{raw}': expected RFC 3339"))?;
    Ok(dt.with_timezone(&Utc))
}

/// `Some(x)` prints as `x`, `None` as `-`.
pub fn opt_str(v: Option<&str>) -> &str {
    v.unwrap_or("-")
}
