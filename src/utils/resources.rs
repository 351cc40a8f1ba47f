//! Packaged binary resources.
//!
//! Resources are looked up in two places. Files compiled into the binary are
//! returned first. Anything else is read from the resource directory on disk,
//! laid out as `<dir>/<package>/<file>`. The directory is taken from
//! `MINKNOW_API_RESOURCE_DIR`, falling back to `resources/` next to the
//! running executable. Deployments drop site-specific files such as the
//! MinKNOW CA bundle (`minknow_api/ca.crt`) there.

use crate::utils::error::{ClientError, Result};
use std::path::{Path, PathBuf};

pub const RESOURCE_DIR_ENV: &str = "MINKNOW_API_RESOURCE_DIR";

const EMBEDDED: &[(&str, &str, &[u8])] = &[(
    "minknow_client",
    "default-config.toml",
    include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/resources/minknow_client/default-config.toml"
    )),
)];

/// Reads a binary resource belonging to `package`.
pub fn read_binary_resource(package: &str, file: &str) -> Result<Vec<u8>> {
    read_binary_resource_from(resource_dir().as_deref(), package, file)
}

pub(crate) fn read_binary_resource_from(
    dir: Option<&Path>,
    package: &str,
    file: &str,
) -> Result<Vec<u8>> {
    if let Some(bytes) = embedded(package, file) {
        tracing::debug!("Using embedded resource {}/{}", package, file);
        return Ok(bytes.to_vec());
    }

    if let Some(dir) = dir {
        let path = dir.join(package).join(file);
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!("Loaded resource from {}", path.display());
                return Ok(bytes);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No resource at {}", path.display());
            }
            Err(e) => return Err(ClientError::IoError(e)),
        }
    }

    Err(ClientError::ResourceNotFound {
        package: package.to_string(),
        file: file.to_string(),
    })
}

fn embedded(package: &str, file: &str) -> Option<&'static [u8]> {
    EMBEDDED
        .iter()
        .find(|(p, f, _)| *p == package && *f == file)
        .map(|(_, _, bytes)| *bytes)
}

fn resource_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(RESOURCE_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("resources")))
}
