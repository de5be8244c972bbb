//! Runtime configuration shared by the browser adapters and the session runtime.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
/// Firebase web-app configuration, serialized exactly as the JS SDK expects it.
pub struct FirebaseConfig {
    /// Browser API key.
    pub api_key: String,
    /// Auth domain hosting the popup sign-in pages.
    pub auth_domain: String,
    /// Project id.
    pub project_id: String,
    /// Storage bucket.
    #[serde(default)]
    pub storage_bucket: String,
    /// Cloud messaging sender id.
    #[serde(default)]
    pub messaging_sender_id: String,
    /// Registered web app id.
    pub app_id: String,
    /// Analytics measurement id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Site-level configuration embedded at build time.
pub struct SiteConfig {
    /// Prefix for every backend route. Empty means same origin.
    #[serde(default)]
    pub api_base: String,
    /// Backend page size for `GET /files`.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Identity platform configuration.
    #[serde(default)]
    pub firebase: FirebaseConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            firebase: FirebaseConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parses the JSON form produced by the site build script.
    ///
    /// # Errors
    ///
    /// Returns the serde error message when `raw` is not a valid config document.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = SiteConfig::from_json("{}").expect("parse");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn firebase_config_serializes_in_sdk_casing() {
        let config = FirebaseConfig {
            api_key: "key".to_string(),
            auth_domain: "box.firebaseapp.com".to_string(),
            project_id: "box".to_string(),
            app_id: "1:2:web:3".to_string(),
            ..FirebaseConfig::default()
        };
        let value = serde_json::to_value(&config).expect("serialize");
        assert_eq!(value["apiKey"], json!("key"));
        assert_eq!(value["authDomain"], json!("box.firebaseapp.com"));
        assert!(value.get("measurementId").is_none());
    }

    #[test]
    fn invalid_json_reports_an_error() {
        assert!(SiteConfig::from_json("{\"page_size\": \"many\"}").is_err());
    }
}
