//! API token resolution.
//!
//! # Contract
//! - Config YAML stores only the env var NAME that holds a token
//!   (`api.token_env.admin`, `api.token_env.portal`).
//! - Callers invoke [`resolve_api_token`] once at startup and pass the result
//!   into the backend constructor.
//! - `Debug` on [`ResolvedToken`] redacts the value; errors name the env var,
//!   never its contents.
//!
//! # Surface-aware enforcement
//! - `ADMIN`:  token is **required** (every back-office call is authenticated).
//! - `PORTAL`: token is optional (storefront reads work anonymously).

use anyhow::{bail, Result};
use serde_json::Value;

use crate::consumption::Surface;

pub const DEFAULT_ADMIN_TOKEN_ENV: &str = "MKP_ADMIN_TOKEN";
pub const DEFAULT_PORTAL_TOKEN_ENV: &str = "MKP_PORTAL_TOKEN";

/// A bearer token resolved from the environment. **Redacted in `Debug`.**
#[derive(Clone)]
pub struct ResolvedToken {
    /// Name of the env var the token came from.
    pub env_var: String,
    pub value: Option<String>,
}

impl std::fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("env_var", &self.env_var)
            .field("value", &self.value.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Read a non-empty string at `pointer`.
fn read_str_at(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Unset and blank both count as missing.
fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Env var name configured for `surface`, falling back to the well-known default.
pub fn token_env_name(config_json: &Value, surface: Surface) -> String {
    match surface {
        Surface::Admin => read_str_at(config_json, "/api/token_env/admin")
            .unwrap_or_else(|| DEFAULT_ADMIN_TOKEN_ENV.to_string()),
        Surface::Portal => read_str_at(config_json, "/api/token_env/portal")
            .unwrap_or_else(|| DEFAULT_PORTAL_TOKEN_ENV.to_string()),
    }
}

/// Resolve the API token for `surface`.
///
/// # Errors
/// `SECRETS_MISSING` naming the env var when `surface` requires a token and
/// the variable is unset or blank.
pub fn resolve_api_token(config_json: &Value, surface: Surface) -> Result<ResolvedToken> {
    let env_var = token_env_name(config_json, surface);
    let value = resolve_env(&env_var);

    if surface == Surface::Admin && value.is_none() {
        bail!(
            "SECRETS_MISSING surface=ADMIN: required env var '{}' (api token) is not set or empty",
            env_var,
        );
    }

    Ok(ResolvedToken { env_var, value })
}
