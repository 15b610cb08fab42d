use crate::error::ConfigError;
use crate::sync::messages::IdentityMode;
use crate::contacts::ContactOrder;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_PASSWORD: &str = "123456";

const ENV_BASE_URL: &str = "CHAT_SIMPLE_BASE_URL";
const ENV_PHONE_NUMBER: &str = "CHAT_SIMPLE_PHONE_NUMBER";
const ENV_API_TOKEN: &str = "CHAT_SIMPLE_API_TOKEN";
const ENV_DISPLAY_NAME: &str = "CHAT_SIMPLE_DISPLAY_NAME";

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

/// Who we are and which backend we talk to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub phone_number: String,
    pub api_token: String,
    pub display_name: String,
    /// Password given to contacts registered on their first chat.
    pub default_password: String,
    pub identity_mode: IdentityMode,
    pub contact_order: ContactOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            phone_number: String::new(),
            api_token: String::new(),
            display_name: String::new(),
            default_password: default_password(),
            identity_mode: IdentityMode::default(),
            contact_order: ContactOrder::default(),
            contacts_file: None,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("chat-simple.toml"))
    }

    /// Reads the config at `path`, or the default location when `None`.
    /// A missing file yields the defaults so first-run setup can fill them in.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigDir)?,
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, starting from defaults", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigDir)?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::vars());
    }

    /// Applies `CHAT_SIMPLE_*` overrides from the given variables.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let slot = match key.as_ref() {
                ENV_BASE_URL => &mut self.base_url,
                ENV_PHONE_NUMBER => &mut self.phone_number,
                ENV_API_TOKEN => &mut self.api_token,
                ENV_DISPLAY_NAME => &mut self.display_name,
                _ => continue,
            };
            *slot = value.into();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("base_url is empty"));
        }
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid(format!("base_url {:?}: {}", self.base_url, e)))?;
        if self.phone_number.trim().is_empty() {
            return Err(ConfigError::invalid("phone_number is empty"));
        }
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::invalid("api_token is empty"));
        }
        Ok(())
    }
}
