use crate::domain::model::ProtocolInfo;
use crate::domain::ports::PositionApi;
use crate::utils::error::{ClientError, Result};

pub const EXPERIMENT_TYPE_TAG: &str = "experiment type";
pub const FLOW_CELL_TAG: &str = "flow cell";
pub const KIT_TAG: &str = "kit";
pub const BASE_CONFIG_TAG: &str = "base config";

/// Tag values a protocol has to carry to be selected.
#[derive(Debug, Clone, Copy)]
pub struct ProtocolQuery<'a> {
    pub product_code: &'a str,
    pub kit: &'a str,
    pub config_name: Option<&'a str>,
    pub experiment_type: &'a str,
}

impl ProtocolQuery<'_> {
    pub fn matches(&self, protocol: &ProtocolInfo) -> bool {
        if !protocol.tags_valid {
            return false;
        }
        if protocol.tag_str(EXPERIMENT_TYPE_TAG) != Some(self.experiment_type) {
            return false;
        }
        if protocol.tag_str(FLOW_CELL_TAG) != Some(self.product_code) {
            return false;
        }
        if protocol.tag_str(KIT_TAG).unwrap_or("") != self.kit {
            return false;
        }
        match self.config_name {
            Some(config) => protocol.tag_str(BASE_CONFIG_TAG) == Some(config),
            None => true,
        }
    }
}

/// Lists the protocols installed on `connection` and returns the first one
/// matching the given tags.
pub async fn find_protocol<P>(
    connection: &P,
    product_code: &str,
    kit: &str,
    config_name: Option<&str>,
    experiment_type: &str,
) -> Result<ProtocolInfo>
where
    P: PositionApi + ?Sized,
{
    let query = ProtocolQuery {
        product_code,
        kit,
        config_name,
        experiment_type,
    };

    let protocols = connection.list_protocols().await?;
    tracing::debug!(
        "Searching {} protocols on {} for {:?}",
        protocols.len(),
        connection.name(),
        query
    );

    protocols
        .into_iter()
        .find(|protocol| query.matches(protocol))
        .ok_or_else(|| ClientError::ProtocolNotFound {
            product_code: product_code.to_string(),
            kit: kit.to_string(),
            experiment_type: experiment_type.to_string(),
        })
}
