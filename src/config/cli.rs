use crate::domain::model::PositionSelector;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{ArgGroup, Parser};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "start-flow-cell-check", version)]
#[command(about = "Start a flow cell check on a position of a running MinKNOW instance")]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["position", "flow_cell_id"])
))]
pub struct CliConfig {
    /// IP address of the machine running MinKNOW (defaults to localhost)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to connect to on host (defaults to the standard MinKNOW manager port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Developer API token issued by the sequencer
    #[arg(long)]
    pub api_token: Option<String>,

    /// Path to a PEM-encoded X.509 certificate chain for client authentication
    #[arg(long, value_name = "PATH")]
    pub client_cert_chain: Option<PathBuf>,

    /// Path to a PEM-encoded private key for client certificate authentication
    #[arg(long, value_name = "PATH")]
    pub client_key: Option<PathBuf>,

    /// TOML file with connection settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Position on the machine (or MinION serial number) to run the check on
    #[arg(long)]
    pub position: Option<String>,

    /// ID of the flow cell on which to run the check
    #[arg(long, value_name = "FLOW-CELL-ID")]
    pub flow_cell_id: Option<String>,
}

impl CliConfig {
    pub fn selector(&self) -> PositionSelector {
        match (&self.position, &self.flow_cell_id) {
            (Some(name), _) => PositionSelector::Name(name.clone()),
            (None, Some(id)) => PositionSelector::FlowCellId(id.clone()),
            // clap enforces the group, so this only happens for hand-built configs
            (None, None) => PositionSelector::Name(String::new()),
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("client_cert_chain", &self.client_cert_chain)
            .field("client_key", &self.client_key)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("position", &self.position)
            .field("flow_cell_id", &self.flow_cell_id)
            .finish()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(host) = &self.host {
            validation::validate_host("--host", host)?;
        }
        if let Some(port) = self.port {
            validation::validate_port("--port", port)?;
        }
        Ok(())
    }
}
