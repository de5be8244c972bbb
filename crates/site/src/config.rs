//! Build-time site configuration.

use leptos::logging;
use platform_host::SiteConfig;

include!(concat!(env!("OUT_DIR"), "/site_config_generated.rs"));

/// Parses the embedded configuration, falling back to defaults when it cannot be read.
pub fn site_config() -> SiteConfig {
    parse_or_default(SITE_CONFIG_JSON)
}

fn parse_or_default(raw: &str) -> SiteConfig {
    SiteConfig::from_json(raw).unwrap_or_else(|err| {
        logging::warn!("invalid embedded site config, using defaults: {err}");
        SiteConfig::default()
    })
}
