//! Panel configuration: the role-mapping table and channel sizing.
//!
//! Loaded from `config/panel.toml` (optional) layered with `PANEL__*` environment variables:
//!
//! ```toml
//! request_buffer = 32
//!
//! [[roles]]
//! profile = "System Administrator"
//! role = "administrator"
//!
//! [[roles]]
//! profile = "Commercial"
//! role = "sales_role"
//! ```
//!
//! Roles are a list of entries rather than a table keyed by profile name because profile
//! names contain spaces and must match case-sensitively.

use crate::roles::{ActorRole, RoleMap};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::warn;

const CONFIG_PATH: &str = "config/panel.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleEntry {
    pub profile: String,
    pub role: ActorRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Replaces the built-in role table when present.
    #[serde(default)]
    pub roles: Option<Vec<RoleEntry>>,
    #[serde(default = "default_request_buffer")]
    pub request_buffer: usize,
}

fn default_request_buffer() -> usize {
    32
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            roles: None,
            request_buffer: default_request_buffer(),
        }
    }
}

impl PanelConfig {
    /// Load from `config/panel.toml`, falling back to env vars only if the file is unreadable.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_PATH).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(
                    path = CONFIG_PATH,
                    error = %err,
                    "failed to load config file, falling back to env"
                );
                Config::builder().add_source(env_source()).build()?
            }
        };

        settings.try_deserialize()
    }

    /// Parses a TOML document; used by hosts that embed their configuration.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn role_map(&self) -> RoleMap {
        match &self.roles {
            Some(entries) => {
                RoleMap::from_pairs(entries.iter().map(|e| (e.profile.as_str(), e.role)))
            }
            None => RoleMap::default(),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("PANEL")
        .separator("__")
        .try_parsing(true)
}
