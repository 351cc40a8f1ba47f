use crate::core::protocols::find_protocol;
use crate::domain::model::{FlowCellCheckReport, FlowCellPosition, PositionSelector};
use crate::domain::ports::{ManagerApi, PositionApi};
use crate::utils::error::{ClientError, Result};

/// Experiment type tag carried by platform QC protocols.
pub const PLATFORM_QC_EXPERIMENT_TYPE: &str = "platform QC";

/// Finds the requested position and starts a platform QC run on it.
pub struct FlowCellCheck<M: ManagerApi> {
    manager: M,
    selector: PositionSelector,
}

impl<M: ManagerApi> FlowCellCheck<M> {
    pub fn new(manager: M, selector: PositionSelector) -> Self {
        Self { manager, selector }
    }

    pub async fn run(&self) -> Result<FlowCellCheckReport> {
        let (position, connection) = self.select_position().await?;

        let flow_cell_info = connection.get_flow_cell_info().await?;
        if !flow_cell_info.has_flow_cell {
            return Err(ClientError::NoFlowCell {
                position: connection.name().to_string(),
            });
        }

        let product_code = flow_cell_info.effective_product_code();
        tracing::debug!(
            "Flow cell {} in {} has product code {}",
            flow_cell_info.flow_cell_id,
            position.name,
            product_code
        );

        let protocol = find_protocol(
            &connection,
            product_code,
            "",
            None,
            PLATFORM_QC_EXPERIMENT_TYPE,
        )
        .await?;
        tracing::info!(
            "Starting protocol {} on {}",
            protocol.identifier,
            position.name
        );

        let run = connection.start_protocol(&protocol.identifier, &[]).await?;

        Ok(FlowCellCheckReport {
            run_id: run.run_id,
            position: position.name,
            flow_cell_id: flow_cell_info.flow_cell_id,
            user_specified_flow_cell_id: flow_cell_info.user_specified_flow_cell_id,
        })
    }

    /// Walks the manager's positions in order and connects to the first one
    /// matching the selector.
    async fn select_position(&self) -> Result<(FlowCellPosition, M::Connection)> {
        let positions = self.manager.flow_cell_positions().await?;
        tracing::debug!("Manager reported {} positions", positions.len());

        // An empty name or id selects nothing.
        let (PositionSelector::Name(wanted) | PositionSelector::FlowCellId(wanted)) =
            &self.selector;
        if wanted.is_empty() {
            return Err(ClientError::NoMatchingPosition);
        }

        for position in positions {
            match &self.selector {
                PositionSelector::Name(name) => {
                    if &position.name != name {
                        continue;
                    }
                    if !position.is_running() {
                        return Err(ClientError::PositionNotRunning {
                            state: position.state.to_string(),
                            position: position.name,
                        });
                    }
                    let connection = self.manager.connect(&position).await?;
                    return Ok((position, connection));
                }
                PositionSelector::FlowCellId(flow_cell_id) => {
                    if !position.is_running() {
                        tracing::warn!(
                            "Skipping position {} ({})",
                            position.name,
                            position.state
                        );
                        continue;
                    }
                    let connection = self.manager.connect(&position).await?;
                    let info = connection.get_flow_cell_info().await?;
                    tracing::debug!(
                        "Position {} holds flow cell '{}'",
                        position.name,
                        info.flow_cell_id
                    );
                    if &info.flow_cell_id == flow_cell_id {
                        return Ok((position, connection));
                    }
                }
            }
        }

        Err(ClientError::NoMatchingPosition)
    }
}
