use crate::config::ConnectionSettings;
use crate::utils::error::{ClientError, Result};
use crate::utils::resources;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Identity};
use tonic::{Request, Status};

/// MinKNOW certificates are issued for `localhost` whatever host serves them.
pub const TLS_DOMAIN_NAME: &str = "localhost";

/// Metadata key carrying the developer API token.
pub const LOCAL_AUTH_HEADER: &str = "local-auth";

pub type RpcChannel = InterceptedService<Channel, AuthInterceptor>;

/// Attaches the developer API token to every outgoing call.
#[derive(Clone, Default)]
pub struct AuthInterceptor {
    token: Option<AsciiMetadataValue>,
}

impl AuthInterceptor {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let token = token
            .map(|t| {
                t.parse::<AsciiMetadataValue>()
                    .map_err(|_| ClientError::InvalidConfigValueError {
                        field: "--api-token".to_string(),
                        value: "<redacted>".to_string(),
                        reason: "Token must be printable ASCII".to_string(),
                    })
            })
            .transpose()?;
        Ok(Self { token })
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> std::result::Result<Request<()>, Status> {
        if let Some(token) = &self.token {
            request
                .metadata_mut()
                .insert(LOCAL_AUTH_HEADER, token.clone());
        }
        Ok(request)
    }
}

/// Builds the TLS settings shared by the manager and position connections.
pub fn tls_config(settings: &ConnectionSettings) -> Result<ClientTlsConfig> {
    let mut tls = ClientTlsConfig::new().domain_name(TLS_DOMAIN_NAME);

    match trusted_ca_bundle(settings)? {
        Some(pem) => tls = tls.ca_certificate(Certificate::from_pem(pem)),
        None => {
            tracing::debug!("No MinKNOW CA bundle found, using system trust roots");
            tls = tls.with_native_roots();
        }
    }

    if let (Some(chain), Some(key)) = (&settings.client_cert_chain, &settings.client_key) {
        tracing::debug!("Using client certificate authentication");
        tls = tls.identity(Identity::from_pem(chain, key));
    }

    Ok(tls)
}

fn trusted_ca_bundle(settings: &ConnectionSettings) -> Result<Option<Vec<u8>>> {
    if let Some(path) = &settings.trusted_ca {
        tracing::debug!("Trusting CA bundle at {}", path.display());
        return std::fs::read(path).map(Some).map_err(|e| ClientError::ConfigError {
            message: format!("Could not read trusted CA {}: {}", path.display(), e),
        });
    }

    match resources::read_binary_resource("minknow_api", "ca.crt") {
        Ok(pem) => Ok(Some(pem)),
        Err(ClientError::ResourceNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn endpoint_uri(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("https://[{}]:{}", host, port)
    } else {
        format!("https://{}:{}", host, port)
    }
}

/// Opens a TLS channel to `host:port` with the auth interceptor attached.
pub async fn connect(
    host: &str,
    port: u16,
    tls: ClientTlsConfig,
    auth: AuthInterceptor,
) -> Result<RpcChannel> {
    let uri = endpoint_uri(host, port);
    tracing::debug!("Connecting to {}", uri);

    let channel = Channel::from_shared(uri.clone())
        .map_err(|e| ClientError::ConfigError {
            message: format!("Invalid endpoint {}: {}", uri, e),
        })?
        .tls_config(tls)?
        .connect()
        .await?;

    Ok(InterceptedService::new(channel, auth))
}
