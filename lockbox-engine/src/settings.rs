//! Engine settings.
//!
//! All fields are optional on the wire; missing fields fall back to the
//! documented production defaults. Settings are immutable once an engine
//! has been constructed from them.

use serde::{Deserialize, Serialize};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.lockbox.example.com";

/// Default identity (token) endpoint.
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.lockbox.example.com";

/// Default user agent reported by the engine.
pub const DEFAULT_USER_AGENT: &str = "lockbox-sdk";

/// The kind of device an engine instance reports itself as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceType {
    #[default]
    Sdk,
    Cli,
    Server,
}

/// Engine construction settings, as supplied over the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Settings {
    /// API endpoint with the default applied.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Identity endpoint with the default applied.
    #[must_use]
    pub fn identity_url(&self) -> &str {
        self.identity_url.as_deref().unwrap_or(DEFAULT_IDENTITY_URL)
    }

    /// Device type with the default applied.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type.unwrap_or_default()
    }

    /// User agent with the default applied.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
