use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "vaultview_settings.json";

/// A user-defined wallet daemon endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomEndpoint {
    /// Display name for the endpoint
    pub label: String,
    /// JSON-RPC URL (must be unique among custom endpoints)
    pub json_rpc_url: String,
}

impl CustomEndpoint {
    pub fn new(label: String, json_rpc_url: String) -> Self {
        Self {
            label,
            json_rpc_url,
        }
    }
}

fn default_custom_endpoints() -> Vec<CustomEndpoint> {
    Vec::new()
}

fn default_auto_refresh_secs() -> u64 {
    30
}

fn default_page_size() -> u64 {
    25
}

fn default_selected_endpoint() -> String {
    "Local wallet daemon".to_string()
}

/// User settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// Label of the selected endpoint (built-in or custom)
    #[serde(default = "default_selected_endpoint")]
    pub selected_endpoint: String,
    /// User-defined daemon endpoints
    #[serde(default = "default_custom_endpoints")]
    pub custom_endpoints: Vec<CustomEndpoint>,
    /// Seconds between automatic refreshes of the active section
    #[serde(default = "default_auto_refresh_secs")]
    pub auto_refresh_secs: u64,
    /// Page size for transaction and account listings
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Account selected in the vault on startup (None = first account)
    #[serde(default)]
    pub default_account: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_endpoint: default_selected_endpoint(),
            custom_endpoints: default_custom_endpoints(),
            auto_refresh_secs: default_auto_refresh_secs(),
            page_size: default_page_size(),
            default_account: None,
        }
    }
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("vaultview");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Add a custom endpoint (returns false if the label is already taken)
    pub fn add_custom_endpoint(&mut self, endpoint: CustomEndpoint) -> bool {
        if crate::config::is_builtin_endpoint(&endpoint.label)
            || self.custom_endpoints.iter().any(|e| e.label == endpoint.label)
        {
            return false;
        }
        self.custom_endpoints.push(endpoint);
        true
    }

    /// Remove a custom endpoint by label
    pub fn remove_custom_endpoint(&mut self, label: &str) -> bool {
        let initial_len = self.custom_endpoints.len();
        self.custom_endpoints.retain(|e| e.label != label);
        self.custom_endpoints.len() < initial_len
    }

    /// Get a custom endpoint by label
    pub fn get_custom_endpoint(&self, label: &str) -> Option<&CustomEndpoint> {
        self.custom_endpoints.iter().find(|e| e.label == label)
    }

    /// Update an existing custom endpoint
    pub fn update_custom_endpoint(&mut self, endpoint: CustomEndpoint) -> bool {
        if let Some(existing) = self
            .custom_endpoints
            .iter_mut()
            .find(|e| e.label == endpoint.label)
        {
            *existing = endpoint;
            true
        } else {
            false
        }
    }

    /// Resolve the selected endpoint's JSON-RPC URL, falling back to the
    /// first built-in endpoint if the selection no longer exists.
    pub fn resolve_selected_url(&self) -> String {
        if let Some(builtin) = crate::config::find_endpoint_by_label(&self.selected_endpoint) {
            builtin.json_rpc_url.to_string()
        } else if let Some(custom) = self.get_custom_endpoint(&self.selected_endpoint) {
            custom.json_rpc_url.clone()
        } else {
            crate::config::ENDPOINTS[0].json_rpc_url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== CustomEndpoint tests ====================

    #[test]
    fn test_custom_endpoint_new() {
        let endpoint = CustomEndpoint::new(
            "Homelab".to_string(),
            "http://10.0.0.5:9000/json_rpc".to_string(),
        );
        assert_eq!(endpoint.label, "Homelab");
        assert_eq!(endpoint.json_rpc_url, "http://10.0.0.5:9000/json_rpc");
    }

    // ==================== UserSettings::default tests ====================

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.selected_endpoint, "Local wallet daemon");
        assert_eq!(settings.auto_refresh_secs, 30);
        assert_eq!(settings.page_size, 25);
        assert!(settings.custom_endpoints.is_empty());
        assert!(settings.default_account.is_none());
    }

    #[test]
    fn test_user_settings_deserializes_with_missing_fields() {
        // Settings written by an older version must still load
        let settings: UserSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.selected_endpoint, "Local wallet daemon");
        assert_eq!(settings.page_size, 25);
    }

    // ==================== add_custom_endpoint tests ====================

    #[test]
    fn test_add_custom_endpoint_success() {
        let mut settings = UserSettings::default();
        let endpoint = CustomEndpoint::new(
            "Homelab".to_string(),
            "http://10.0.0.5:9000/json_rpc".to_string(),
        );

        let result = settings.add_custom_endpoint(endpoint.clone());

        assert!(result);
        assert_eq!(settings.custom_endpoints.len(), 1);
        assert_eq!(settings.custom_endpoints[0], endpoint);
    }

    #[test]
    fn test_add_custom_endpoint_duplicate_label_fails() {
        let mut settings = UserSettings::default();
        let first = CustomEndpoint::new("Homelab".to_string(), "http://a:9000".to_string());
        let second = CustomEndpoint::new("Homelab".to_string(), "http://b:9000".to_string());

        settings.add_custom_endpoint(first);
        let result = settings.add_custom_endpoint(second);

        assert!(!result);
        assert_eq!(settings.custom_endpoints.len(), 1);
        assert_eq!(settings.custom_endpoints[0].json_rpc_url, "http://a:9000"); // Original unchanged
    }

    #[test]
    fn test_add_custom_endpoint_builtin_label_fails() {
        let mut settings = UserSettings::default();
        let endpoint =
            CustomEndpoint::new("Local wallet daemon".to_string(), "http://a:9000".to_string());

        assert!(!settings.add_custom_endpoint(endpoint));
        assert!(settings.custom_endpoints.is_empty());
    }

    // ==================== remove_custom_endpoint tests ====================

    #[test]
    fn test_remove_custom_endpoint_existing() {
        let mut settings = UserSettings::default();
        settings.add_custom_endpoint(CustomEndpoint::new(
            "Homelab".to_string(),
            "http://a:9000".to_string(),
        ));

        let result = settings.remove_custom_endpoint("Homelab");

        assert!(result);
        assert!(settings.custom_endpoints.is_empty());
    }

    #[test]
    fn test_remove_custom_endpoint_non_existing() {
        let mut settings = UserSettings::default();

        assert!(!settings.remove_custom_endpoint("Homelab"));
    }

    // ==================== get_custom_endpoint tests ====================

    #[test]
    fn test_get_custom_endpoint_found() {
        let mut settings = UserSettings::default();
        let endpoint = CustomEndpoint::new("Homelab".to_string(), "http://a:9000".to_string());
        settings.add_custom_endpoint(endpoint.clone());

        let result = settings.get_custom_endpoint("Homelab");

        assert!(result.is_some());
        assert_eq!(result.unwrap(), &endpoint);
    }

    #[test]
    fn test_get_custom_endpoint_not_found() {
        let settings = UserSettings::default();

        assert!(settings.get_custom_endpoint("Homelab").is_none());
    }

    // ==================== update_custom_endpoint tests ====================

    #[test]
    fn test_update_custom_endpoint_existing() {
        let mut settings = UserSettings::default();
        settings.add_custom_endpoint(CustomEndpoint::new(
            "Homelab".to_string(),
            "http://a:9000".to_string(),
        ));

        let updated = CustomEndpoint::new("Homelab".to_string(), "http://b:9000".to_string());
        let result = settings.update_custom_endpoint(updated);

        assert!(result);
        assert_eq!(settings.custom_endpoints.len(), 1);
        assert_eq!(settings.custom_endpoints[0].json_rpc_url, "http://b:9000");
    }

    #[test]
    fn test_update_custom_endpoint_non_existing() {
        let mut settings = UserSettings::default();
        let endpoint = CustomEndpoint::new("Homelab".to_string(), "http://a:9000".to_string());

        assert!(!settings.update_custom_endpoint(endpoint));
        assert!(settings.custom_endpoints.is_empty());
    }

    // ==================== resolve_selected_url tests ====================

    #[test]
    fn test_resolve_selected_url_builtin() {
        let settings = UserSettings::default();

        assert_eq!(
            settings.resolve_selected_url(),
            "http://127.0.0.1:9000/json_rpc"
        );
    }

    #[test]
    fn test_resolve_selected_url_custom() {
        let mut settings = UserSettings::default();
        settings.add_custom_endpoint(CustomEndpoint::new(
            "Homelab".to_string(),
            "http://10.0.0.5:9000/json_rpc".to_string(),
        ));
        settings.selected_endpoint = "Homelab".to_string();

        assert_eq!(
            settings.resolve_selected_url(),
            "http://10.0.0.5:9000/json_rpc"
        );
    }

    #[test]
    fn test_resolve_selected_url_dangling_selection_falls_back() {
        let mut settings = UserSettings::default();
        settings.selected_endpoint = "Removed endpoint".to_string();

        assert_eq!(
            settings.resolve_selected_url(),
            crate::config::ENDPOINTS[0].json_rpc_url
        );
    }
}
