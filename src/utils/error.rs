use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    TransportError(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    RpcError(#[from] tonic::Status),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No matching position found for --position or --flow-cell-id")]
    NoMatchingPosition,

    #[error("No flow cell present in position {position}")]
    NoFlowCell { position: String },

    #[error("Position {position} is not running (state: {state})")]
    PositionNotRunning { position: String, state: String },

    #[error(
        "No protocol found for product code '{product_code}', kit '{kit}' and experiment type '{experiment_type}'"
    )]
    ProtocolNotFound {
        product_code: String,
        kit: String,
        experiment_type: String,
    },

    #[error("Resource '{file}' not found in package '{package}'")]
    ResourceNotFound { package: String, file: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Process exit code used by the command-line tools.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::ConfigError { .. } | ClientError::InvalidConfigValueError { .. } => 2,
            _ => 1,
        }
    }

    /// Errors that describe the state of the instrument rather than a fault in
    /// the client. These are printed to stdout as plain messages.
    pub fn is_instrument_state(&self) -> bool {
        matches!(
            self,
            ClientError::NoMatchingPosition | ClientError::NoFlowCell { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::TransportError(e) => {
                format!("Could not connect to MinKNOW: {}", e)
            }
            ClientError::RpcError(status) => format!(
                "MinKNOW rejected the request ({:?}): {}",
                status.code(),
                status.message()
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::TransportError(_) => {
                "Check that MinKNOW is running and that --host and --port are correct"
            }
            ClientError::RpcError(status) if status.code() == tonic::Code::Unauthenticated => {
                "Pass a developer API token with --api-token or a client certificate"
            }
            ClientError::RpcError(_) => "Check the MinKNOW logs for details",
            ClientError::ConfigError { .. } | ClientError::InvalidConfigValueError { .. } => {
                "Run with --help to see the accepted options"
            }
            ClientError::PositionNotRunning { .. } => {
                "Wait for the position to finish starting up, or reset it in MinKNOW"
            }
            ClientError::ProtocolNotFound { .. } => {
                "Check that the flow cell product code is supported by the installed MinKNOW"
            }
            ClientError::ResourceNotFound { .. } => {
                "Set MINKNOW_API_RESOURCE_DIR to the directory holding packaged resources"
            }
            _ => "",
        }
    }
}
