pub mod cli;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::{Path, PathBuf};

/// Standard port of the MinKNOW manager's secure gRPC service.
pub const DEFAULT_MANAGER_PORT: u16 = 9502;
pub const DEFAULT_HOST: &str = "localhost";

pub const CLIENT_CERT_CHAIN_ENV: &str = "MINKNOW_API_CLIENT_CERTIFICATE_CHAIN";
pub const CLIENT_KEY_ENV: &str = "MINKNOW_API_CLIENT_KEY";
pub const TRUSTED_CA_ENV: &str = "MINKNOW_TRUSTED_CA";

/// Everything needed to open the manager connection.
///
/// Precedence, highest first: command line, environment, `--config` file,
/// packaged defaults.
#[derive(Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub api_token: Option<String>,
    pub client_cert_chain: Option<Vec<u8>>,
    pub client_key: Option<Vec<u8>>,
    pub trusted_ca: Option<PathBuf>,
}

impl ConnectionSettings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut file = TomlConfig::packaged_default()?;
        if let Some(path) = &cli.config {
            tracing::debug!("Loading connection settings from {}", path.display());
            let user = TomlConfig::from_file(path)?;
            user.validate()?;
            file = file.merge(user);
        }
        Self::resolve_with_env(cli, file, |key| std::env::var_os(key).map(PathBuf::from))
    }

    pub fn resolve_with_env<F>(cli: &CliConfig, file: TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let section = file.connection;

        let client_cert_chain_path = cli
            .client_cert_chain
            .clone()
            .or_else(|| env(CLIENT_CERT_CHAIN_ENV))
            .or(section.client_cert_chain);
        let client_key_path = cli
            .client_key
            .clone()
            .or_else(|| env(CLIENT_KEY_ENV))
            .or(section.client_key);
        validation::validate_paired(
            "--client-cert-chain",
            &client_cert_chain_path,
            "--client-key",
            &client_key_path,
        )?;

        let settings = ConnectionSettings {
            host: cli
                .host
                .clone()
                .or(section.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(section.port).unwrap_or(DEFAULT_MANAGER_PORT),
            api_token: cli.api_token.clone().or(section.api_token),
            client_cert_chain: client_cert_chain_path
                .as_deref()
                .map(load_pem_file)
                .transpose()?,
            client_key: client_key_path.as_deref().map(load_pem_file).transpose()?,
            trusted_ca: env(TRUSTED_CA_ENV).or(section.trusted_ca),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn has_client_certificate(&self) -> bool {
        self.client_cert_chain.is_some() && self.client_key.is_some()
    }
}

impl Validate for ConnectionSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_host("host", &self.host)?;
        validation::validate_port("port", self.port)
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("client_certificate", &self.has_client_certificate())
            .field("trusted_ca", &self.trusted_ca)
            .finish()
    }
}

fn load_pem_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ClientError::ConfigError {
        message: format!("Could not read {}: {}", path.display(), e),
    })
}
