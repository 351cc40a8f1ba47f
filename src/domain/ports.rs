use crate::domain::model::{FlowCellInfo, FlowCellPosition, ProtocolInfo, StartedRun};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Connection to the services of a single position.
#[async_trait]
pub trait PositionApi: Send + Sync {
    fn name(&self) -> &str;
    async fn get_flow_cell_info(&self) -> Result<FlowCellInfo>;
    async fn list_protocols(&self) -> Result<Vec<ProtocolInfo>>;
    async fn start_protocol(&self, identifier: &str, args: &[String]) -> Result<StartedRun>;
}

/// The MinKNOW manager: enumerates positions and hands out connections to them.
#[async_trait]
pub trait ManagerApi: Send + Sync {
    type Connection: PositionApi;

    async fn flow_cell_positions(&self) -> Result<Vec<FlowCellPosition>>;
    async fn connect(&self, position: &FlowCellPosition) -> Result<Self::Connection>;
    async fn version(&self) -> Result<String>;
}
