use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Network kind for grouping endpoints in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkKind {
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
}

/// A predefined wallet daemon endpoint with label, JSON-RPC URL, and network kind.
#[derive(Clone, Debug)]
pub struct DaemonEndpoint {
    pub label: &'static str,
    pub json_rpc_url: &'static str,
    pub kind: NetworkKind,
}

impl DaemonEndpoint {
    pub const fn new(label: &'static str, json_rpc_url: &'static str, kind: NetworkKind) -> Self {
        Self {
            label,
            json_rpc_url,
            kind,
        }
    }
}

use NetworkKind::*;

/// Built-in daemon endpoints. Local daemons first, public networks after.
pub const ENDPOINTS: &[DaemonEndpoint] = &[
    DaemonEndpoint::new("Local wallet daemon", "http://127.0.0.1:9000/json_rpc", Localnet),
    DaemonEndpoint::new("Local indexer", "http://127.0.0.1:18300/json_rpc", Localnet),
    DaemonEndpoint::new("Devnet", "http://devnet.dashboard.internal:9000/json_rpc", Devnet),
    DaemonEndpoint::new("Testnet", "https://testnet-daemon.example.net/json_rpc", Testnet),
];

/// Find an endpoint by its display label
pub fn find_endpoint_by_label(label: &str) -> Option<&'static DaemonEndpoint> {
    ENDPOINTS.iter().find(|e| e.label == label)
}

/// Find the index of an endpoint in ENDPOINTS by label
pub fn find_endpoint_index(label: &str) -> Option<usize> {
    ENDPOINTS.iter().position(|e| e.label == label)
}

/// Check if a label belongs to a built-in endpoint
pub fn is_builtin_endpoint(label: &str) -> bool {
    ENDPOINTS.iter().any(|e| e.label == label)
}

/// Validate a user-supplied daemon URL. Accepts http and https only.
pub fn validate_endpoint_url(input: &str) -> Result<Url, String> {
    let url = Url::parse(input.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{}', expected http or https", other)),
    }
}

/// Runtime configuration for the dashboard session.
#[derive(Clone, Debug)]
pub struct Config {
    pub json_rpc_url: String,
    pub label: String,
    pub kind: NetworkKind,
    /// Seconds between automatic refreshes of the active section.
    pub auto_refresh_secs: u64,
    /// Page size for transaction and account listings.
    pub page_size: u64,
}

impl Config {
    pub fn new(json_rpc_url: String, label: String, kind: NetworkKind) -> Self {
        let auto_refresh_secs = env::var("VAULTVIEW_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let page_size = env::var("VAULTVIEW_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(25);

        Self {
            json_rpc_url,
            label,
            kind,
            auto_refresh_secs,
            page_size,
        }
    }

    pub fn from_endpoint(endpoint: &DaemonEndpoint) -> Self {
        Self::new(
            endpoint.json_rpc_url.to_string(),
            endpoint.label.to_string(),
            endpoint.kind,
        )
    }

    /// Create config from a user-defined custom endpoint
    pub fn from_custom_endpoint(endpoint: &crate::user_settings::CustomEndpoint) -> Self {
        Self::new(
            endpoint.json_rpc_url.clone(),
            endpoint.label.clone(),
            NetworkKind::Localnet,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        // Default to the local wallet daemon - GUI will load user settings and update
        Self::from_endpoint(&ENDPOINTS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== find_endpoint_by_label tests ====================

    #[test]
    fn test_find_endpoint_by_label_local() {
        let endpoint = find_endpoint_by_label("Local wallet daemon");
        assert!(endpoint.is_some());
        let endpoint = endpoint.unwrap();
        assert_eq!(endpoint.json_rpc_url, "http://127.0.0.1:9000/json_rpc");
        assert_eq!(endpoint.kind, NetworkKind::Localnet);
    }

    #[test]
    fn test_find_endpoint_by_label_not_found() {
        assert!(find_endpoint_by_label("Nonexistent").is_none());
    }

    // ==================== find_endpoint_index tests ====================

    #[test]
    fn test_find_endpoint_index_first() {
        let index = find_endpoint_index("Local wallet daemon");
        assert_eq!(index, Some(0)); // Local daemon is first in the list
    }

    #[test]
    fn test_find_endpoint_index_not_found() {
        assert!(find_endpoint_index("Nonexistent").is_none());
    }

    // ==================== is_builtin_endpoint tests ====================

    #[test]
    fn test_is_builtin_endpoint_true() {
        assert!(is_builtin_endpoint("Local wallet daemon"));
        assert!(is_builtin_endpoint("Testnet"));
    }

    #[test]
    fn test_is_builtin_endpoint_false() {
        assert!(!is_builtin_endpoint("My homelab daemon"));
    }

    // ==================== validate_endpoint_url tests ====================

    #[test]
    fn test_validate_endpoint_url_http() {
        assert!(validate_endpoint_url("http://127.0.0.1:9000/json_rpc").is_ok());
    }

    #[test]
    fn test_validate_endpoint_url_https() {
        assert!(validate_endpoint_url("https://daemon.example.net/json_rpc").is_ok());
    }

    #[test]
    fn test_validate_endpoint_url_trims_whitespace() {
        assert!(validate_endpoint_url("  http://127.0.0.1:9000/json_rpc  ").is_ok());
    }

    #[test]
    fn test_validate_endpoint_url_rejects_other_schemes() {
        let err = validate_endpoint_url("ftp://daemon.example.net").unwrap_err();
        assert!(err.contains("unsupported scheme"));
    }

    #[test]
    fn test_validate_endpoint_url_rejects_garbage() {
        assert!(validate_endpoint_url("not a url").is_err());
    }

    // ==================== Config tests ====================

    #[test]
    fn test_config_default_points_at_local_daemon() {
        let config = Config::default();
        assert_eq!(config.label, "Local wallet daemon");
        assert_eq!(config.kind, NetworkKind::Localnet);
    }

    #[test]
    fn test_config_from_endpoint() {
        let config = Config::from_endpoint(&ENDPOINTS[3]);
        assert_eq!(config.label, "Testnet");
        assert_eq!(config.kind, NetworkKind::Testnet);
        assert!(config.json_rpc_url.starts_with("https://"));
    }
}
