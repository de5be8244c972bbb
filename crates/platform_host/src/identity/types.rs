//! Identity data types shared across host contracts and implementations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Signed-in user session as reported by the identity platform.
///
/// Field names follow the platform's JS user object so the value crosses the wasm boundary
/// without a translation layer.
pub struct Identity {
    /// Stable unique user id.
    pub uid: String,
    /// Bearer token attached to backend requests.
    pub access_token: String,
    /// Display name from a federated provider, when one is known.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Whether this is an anonymous session.
    pub is_anonymous: bool,
}

impl Identity {
    /// Builds an anonymous identity.
    pub fn anonymous(uid: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            access_token: access_token.into(),
            display_name: None,
            is_anonymous: true,
        }
    }

    /// Builds a federated (non-anonymous) identity.
    pub fn federated(
        uid: impl Into<String>,
        access_token: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            access_token: access_token.into(),
            display_name,
            is_anonymous: false,
        }
    }

    /// Returns the display name when it is present and non-empty.
    pub fn visible_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identity_decodes_js_user_shape() {
        let identity: Identity = serde_json::from_value(json!({
            "uid": "u1",
            "accessToken": "tok",
            "displayName": null,
            "isAnonymous": true,
        }))
        .expect("decode identity");
        assert_eq!(identity, Identity::anonymous("u1", "tok"));

        let without_name: Identity = serde_json::from_value(json!({
            "uid": "u2",
            "accessToken": "tok2",
            "isAnonymous": false,
        }))
        .expect("decode identity without display name");
        assert_eq!(without_name.display_name, None);
    }

    #[test]
    fn visible_name_treats_only_empty_names_as_absent() {
        let empty = Identity::federated("u", "t", Some(String::new()));
        assert_eq!(empty.visible_name(), None);
        let spaces = Identity::federated("u", "t", Some("  ".to_string()));
        assert_eq!(spaces.visible_name(), Some("  "));
        let named = Identity::federated("u", "t", Some("Ada".to_string()));
        assert_eq!(named.visible_name(), Some("Ada"));
    }
}
