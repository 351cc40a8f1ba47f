use crate::utils::error::{ClientError, Result};
use std::net::Ipv6Addr;
use url::{Host, Url};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that `host` can be used as the authority of an `https` endpoint.
pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    validate_non_empty_string(field_name, host)?;

    // Bare IPv6 literals are bracketed when the endpoint URI is built.
    if host.parse::<Ipv6Addr>().is_ok() {
        return Ok(());
    }

    match Url::parse(&format!("https://{}", host)) {
        Ok(url) => match url.host() {
            Some(Host::Domain(_)) | Some(Host::Ipv4(_)) | Some(Host::Ipv6(_))
                if url.path() == "/"
                    && url.port().is_none()
                    && (!host.contains(':') || (host.starts_with('[') && host.ends_with(']'))) =>
            {
                Ok(())
            }
            _ => Err(ClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: host.to_string(),
                reason: "Expected a bare host name or IP address".to_string(),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: format!("Invalid host: {}", e),
        }),
    }
}

pub fn validate_port(field_name: &str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Both values must be present, or neither.
pub fn validate_paired<A, B>(
    first_name: &str,
    first: &Option<A>,
    second_name: &str,
    second: &Option<B>,
) -> Result<()> {
    match (first.is_some(), second.is_some()) {
        (true, false) => Err(ClientError::ConfigError {
            message: format!("{} requires {}", first_name, second_name),
        }),
        (false, true) => Err(ClientError::ConfigError {
            message: format!("{} requires {}", second_name, first_name),
        }),
        _ => Ok(()),
    }
}
