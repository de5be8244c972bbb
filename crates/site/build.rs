use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
struct FirebaseSection {
    api_key: String,
    auth_domain: String,
    project_id: String,
    #[serde(default)]
    storage_bucket: String,
    #[serde(default)]
    messaging_sender_id: String,
    app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measurement_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SiteSection {
    #[serde(default)]
    api_base: String,
    #[serde(default = "default_page_size")]
    page_size: usize,
    firebase: FirebaseSection,
}

fn default_page_size() -> usize {
    20
}

fn config_path(crate_root: PathBuf) -> PathBuf {
    match std::env::var_os("BIGBOX_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => crate_root.join("bigbox.toml"),
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=BIGBOX_CONFIG");
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = config_path(crate_root);
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: SiteSection = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if config.page_size == 0 {
        panic!("page_size in {} must be at least 1", path.display());
    }
    for (key, value) in [
        ("firebase.api_key", &config.firebase.api_key),
        ("firebase.auth_domain", &config.firebase.auth_domain),
        ("firebase.project_id", &config.firebase.project_id),
        ("firebase.app_id", &config.firebase.app_id),
    ] {
        if value.trim().is_empty() {
            panic!("{key} in {} must not be empty", path.display());
        }
    }

    let json = serde_json::to_string_pretty(&config).expect("serialize site config");
    let generated = format!(
        "/// Build-time generated site configuration JSON.\n\
pub const SITE_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("site_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
