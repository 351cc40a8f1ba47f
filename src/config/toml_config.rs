use crate::utils::error::{ClientError, Result};
use crate::utils::resources;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub connection: ConnectionSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_token: Option<String>,
    pub client_cert_chain: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
    pub trusted_ca: Option<PathBuf>,
}

impl TomlConfig {
    /// Connection defaults shipped inside the binary.
    pub fn packaged_default() -> Result<Self> {
        let bytes = resources::read_binary_resource("minknow_client", "default-config.toml")?;
        let content = String::from_utf8(bytes).map_err(|e| ClientError::ConfigError {
            message: format!("Packaged default config is not UTF-8: {}", e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: TomlConfig) -> TomlConfig {
        let base = self.connection;
        let top = other.connection;
        TomlConfig {
            connection: ConnectionSection {
                host: top.host.or(base.host),
                port: top.port.or(base.port),
                api_token: top.api_token.or(base.api_token),
                client_cert_chain: top.client_cert_chain.or(base.client_cert_chain),
                client_key: top.client_key.or(base.client_key),
                trusted_ca: top.trusted_ca.or(base.trusted_ca),
            },
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let connection = &self.connection;
        if let Some(host) = &connection.host {
            validation::validate_host("connection.host", host)?;
        }
        if let Some(port) = connection.port {
            validation::validate_port("connection.port", port)?;
        }
        validation::validate_paired(
            "connection.client_cert_chain",
            &connection.client_cert_chain,
            "connection.client_key",
            &connection.client_key,
        )
    }
}
