//! Device configuration record
//!
//! The record itself is persisted elsewhere; this crate only needs the
//! server endpoint and a few defaults.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Port the LoveByte server serves images on
pub const DEFAULT_IMAGE_PORT: u16 = 6969;

/// Name shown until the user renames the device
pub const DEFAULT_DEVICE_NAME: &str = "LoveByte";

/// Device configuration as stored by the configuration pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceConfig {
    pub device_name: String,
    pub timezone: i32,
    pub server_address: String,
    pub image_port: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: String::from(DEFAULT_DEVICE_NAME),
            timezone: 0,
            server_address: String::new(),
            image_port: DEFAULT_IMAGE_PORT,
        }
    }
}

impl DeviceConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Remote endpoint for asset downloads, `None` until a server is set
    pub fn endpoint(&self) -> Option<Endpoint> {
        let host = self.server_address.trim();
        if host.is_empty() {
            return None;
        }
        Some(Endpoint::with_port(host, self.image_port))
    }
}

/// Remote image server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Endpoint on the default image port
    pub fn new(host: &str) -> Self {
        Self::with_port(host, DEFAULT_IMAGE_PORT)
    }

    pub fn with_port(host: &str, port: u16) -> Self {
        Self {
            host: String::from(host),
            port,
        }
    }

    /// Download URL of an image (`http://<host>:<port>/images/<name>`)
    pub fn image_url(&self, name: &str) -> String {
        alloc::format!("http://{}:{}/images/{}", self.host, self.port, name)
    }
}
