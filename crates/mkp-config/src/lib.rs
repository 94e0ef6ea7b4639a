//! mkp-config
//!
//! Layered YAML configuration for marketplace clients.
//!
//! - Docs merge in order: earlier docs are base, later docs override.
//! - The merged document is canonicalised and hashed (SHA-256) so two
//!   operators can confirm they run the same effective config.
//! - Literal secrets are refused; YAML stores env var NAMES only
//!   (see [`secrets`]).
//! - Unused keys are reported per [`Surface`].

pub mod consumption;
pub mod secrets;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

pub use consumption::{consumed_pointers, Surface};

/// Known secret-like prefixes. Any leaf string starting with one of these
/// aborts loading with CONFIG_SECRET_DETECTED.
const SECRET_PREFIXES: &[&str] = &[
    "eyJ",        // JWT (base64 '{"')
    "Bearer ",    // pasted Authorization header
    "sk-",        // generic API secret key
    "sk_live",    // Stripe live
    "sk_test",    // Stripe test
    "AKIA",       // AWS access key ID
    "-----BEGIN", // PEM private keys
    "ghp_",       // GitHub PAT
];

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Unused-key report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub surface: String,
    /// Pointer prefixes the surface reads, as registered
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Compare every leaf of `config_json` against what `surface` reads.
///
/// Under `Fail` a non-empty report becomes a CONFIG_UNUSED_KEYS error.
pub fn report_unused_keys(
    surface: Surface,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let consumed = consumed_pointers(surface);
    let unused: BTreeSet<String> = leaves(config_json)
        .into_iter()
        .map(|(ptr, _)| ptr)
        .filter(|ptr| !consumed.iter().any(|c| covers(c, ptr)))
        .collect();

    let report = UnusedKeyReport {
        surface: surface.as_str().to_string(),
        consumed_prefixes: consumed.iter().map(|c| c.to_string()).collect(),
        unused_leaf_pointers: unused.into_iter().collect(),
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS (surface={}): {}",
            report.surface,
            report.unused_leaf_pointers.join(", ")
        );
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// API settings
// ---------------------------------------------------------------------------

/// Connection settings for the marketplace REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL without trailing slash, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `/api/base_url` (required) and `/api/timeout_secs` (optional).
    pub fn from_config_json(config_json: &Value) -> Result<Self> {
        let base_url = config_json
            .pointer("/api/base_url")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .context("CONFIG_MISSING: /api/base_url must be a non-empty string")?;

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!(
                "CONFIG_INVALID: /api/base_url must start with http:// or https://, got '{}'",
                base_url
            );
        }

        let timeout_secs = match config_json.pointer("/api/timeout_secs") {
            None | Some(Value::Null) => DEFAULT_TIMEOUT_SECS,
            Some(v) => match v.as_u64() {
                Some(n) if n > 0 => n,
                _ => bail!("CONFIG_INVALID: /api/timeout_secs must be a positive integer"),
            },
        };

        Ok(Self {
            timeout_secs,
            ..Self::new(base_url)
        })
    }
}

// ---------------------------------------------------------------------------
// Layered loading + hashing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        merged = deep_merge(merged, v_json);
    }

    enforce_no_secret_literals(&merged)?;

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; any other overlay value replaces the base.
fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut into), Value::Object(from)) => {
            for (key, value) in from {
                let merged = match into.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                into.insert(key, merged);
            }
            Value::Object(into)
        }
        (_, replacement) => replacement,
    }
}

// serde_json's default Map is BTreeMap-backed (no preserve_order feature),
// so object keys serialize sorted and key order in the YAML does not matter.
fn canonicalize_json(v: &Value) -> Result<String> {
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn enforce_no_secret_literals(v: &Value) -> Result<()> {
    let hit = leaves(v)
        .into_iter()
        .find(|(_, leaf)| leaf.as_str().is_some_and(looks_like_secret));
    match hit {
        Some((ptr, _)) => bail!("CONFIG_SECRET_DETECTED leaf={ptr} value=REDACTED"),
        None => Ok(()),
    }
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim_start();
    t.len() >= 8 && SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}

// ---------------------------------------------------------------------------
// JSON-pointer helpers
// ---------------------------------------------------------------------------

/// `/api/token_env` covers itself and `/api/token_env/admin`, not `/api/token_envx`.
fn covers(consumed: &str, leaf: &str) -> bool {
    match leaf.strip_prefix(consumed) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Every scalar in `v` with its RFC 6901 pointer. Array elements use their index.
fn leaves(v: &Value) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    let mut stack = vec![(String::new(), v)];
    while let Some((ptr, node)) = stack.pop() {
        match node {
            Value::Object(map) => stack.extend(map.iter().map(|(k, child)| {
                let token = k.replace('~', "~0").replace('/', "~1");
                (format!("{ptr}/{token}"), child)
            })),
            Value::Array(items) => stack.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| (format!("{ptr}/{i}"), child)),
            ),
            scalar if ptr.is_empty() => out.push(("/".to_string(), scalar)),
            scalar => out.push((ptr, scalar)),
        }
    }
    out
}
