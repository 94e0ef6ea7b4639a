//! Registry of config keys each client surface actually reads.
//!
//! Entries are JSON-pointer prefixes. A prefix consumes itself and every leaf
//! below it ("/api/token_env" consumes "/api/token_env/admin" but not
//! "/api/token_envx").
//!
//! Only list pointers that code reads today.

/// Which client surface is loading the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Back office: order status, contract/slip/license decisions.
    Admin,
    /// User portal and storefront: reads, bidding views.
    Portal,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Admin => "ADMIN",
            Surface::Portal => "PORTAL",
        }
    }
}

// Observed reads:
// - mkp-config::ApiSettings::from_config_json  /api/base_url, /api/timeout_secs
// - mkp-config::secrets::resolve_api_token     /api/token_env/<surface>
static ADMIN: &[&str] = &["/api/base_url", "/api/timeout_secs", "/api/token_env/admin"];

static PORTAL: &[&str] = &["/api/base_url", "/api/timeout_secs", "/api/token_env/portal"];

pub fn consumed_pointers(surface: Surface) -> &'static [&'static str] {
    match surface {
        Surface::Admin => ADMIN,
        Surface::Portal => PORTAL,
    }
}
