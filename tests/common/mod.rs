#![allow(dead_code)]

use async_trait::async_trait;
use minknow_client::{
    ClientError, FlowCellInfo, FlowCellPosition, ManagerApi, PositionApi, PositionState,
    ProtocolInfo, Result, StartedRun, TagValue,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Calls made against the mock, in order.
pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone)]
pub struct MockPosition {
    pub position: FlowCellPosition,
    pub flow_cell: FlowCellInfo,
    pub protocols: Vec<ProtocolInfo>,
}

pub struct MockManager {
    positions: Vec<MockPosition>,
    calls: CallLog,
}

impl MockManager {
    pub fn new(positions: Vec<MockPosition>) -> Self {
        Self {
            positions,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl ManagerApi for MockManager {
    type Connection = MockConnection;

    async fn flow_cell_positions(&self) -> Result<Vec<FlowCellPosition>> {
        record(&self.calls, "flow_cell_positions");
        Ok(self.positions.iter().map(|p| p.position.clone()).collect())
    }

    async fn connect(&self, position: &FlowCellPosition) -> Result<MockConnection> {
        record(&self.calls, &format!("connect {}", position.name));
        let mock = self
            .positions
            .iter()
            .find(|p| p.position.name == position.name)
            .cloned()
            .ok_or_else(|| ClientError::ConfigError {
                message: format!("unknown position {}", position.name),
            })?;
        Ok(MockConnection {
            mock,
            calls: self.calls.clone(),
        })
    }

    async fn version(&self) -> Result<String> {
        Ok("6.0.0".to_string())
    }
}

pub struct MockConnection {
    mock: MockPosition,
    calls: CallLog,
}

#[async_trait]
impl PositionApi for MockConnection {
    fn name(&self) -> &str {
        &self.mock.position.name
    }

    async fn get_flow_cell_info(&self) -> Result<FlowCellInfo> {
        record(
            &self.calls,
            &format!("get_flow_cell_info {}", self.mock.position.name),
        );
        Ok(self.mock.flow_cell.clone())
    }

    async fn list_protocols(&self) -> Result<Vec<ProtocolInfo>> {
        record(
            &self.calls,
            &format!("list_protocols {}", self.mock.position.name),
        );
        Ok(self.mock.protocols.clone())
    }

    async fn start_protocol(&self, identifier: &str, args: &[String]) -> Result<StartedRun> {
        record(
            &self.calls,
            &format!(
                "start_protocol {} {} {:?}",
                self.mock.position.name, identifier, args
            ),
        );
        Ok(StartedRun {
            run_id: format!("run-{}", self.mock.position.name),
        })
    }
}

fn record(calls: &CallLog, call: &str) {
    calls.lock().unwrap().push(call.to_string());
}

pub fn running_position(name: &str, port: u32) -> FlowCellPosition {
    FlowCellPosition {
        name: name.to_string(),
        location: Some((0, 0)),
        state: PositionState::Running,
        secure_port: Some(port),
    }
}

pub fn flow_cell(id: &str, product_code: &str) -> FlowCellInfo {
    FlowCellInfo {
        has_flow_cell: true,
        flow_cell_id: id.to_string(),
        product_code: product_code.to_string(),
        user_specified_flow_cell_id: String::new(),
        user_specified_product_code: String::new(),
    }
}

pub fn qc_protocol(product_code: &str) -> ProtocolInfo {
    let mut tags = HashMap::new();
    tags.insert(
        "experiment type".to_string(),
        TagValue::String("platform QC".to_string()),
    );
    tags.insert(
        "flow cell".to_string(),
        TagValue::String(product_code.to_string()),
    );
    tags.insert("kit".to_string(), TagValue::String(String::new()));
    ProtocolInfo {
        identifier: format!("platform_qc:{}:", product_code),
        name: "platform_qc".to_string(),
        tags,
        tags_valid: true,
    }
}

pub fn sequencing_protocol(product_code: &str, kit: &str) -> ProtocolInfo {
    let mut tags = HashMap::new();
    tags.insert(
        "experiment type".to_string(),
        TagValue::String("sequencing".to_string()),
    );
    tags.insert(
        "flow cell".to_string(),
        TagValue::String(product_code.to_string()),
    );
    tags.insert("kit".to_string(), TagValue::String(kit.to_string()));
    ProtocolInfo {
        identifier: format!("sequencing:{}:{}", product_code, kit),
        name: "sequencing".to_string(),
        tags,
        tags_valid: true,
    }
}

/// A GridION-style layout: X1 holds FAQ00001, X2 holds FAQ00002.
pub fn two_position_manager() -> MockManager {
    let protocols = vec![
        sequencing_protocol("FLO-MIN114", "SQK-LSK114"),
        qc_protocol("FLO-MIN106"),
        qc_protocol("FLO-MIN114"),
    ];
    MockManager::new(vec![
        MockPosition {
            position: running_position("X1", 8000),
            flow_cell: flow_cell("FAQ00001", "FLO-MIN106"),
            protocols: protocols.clone(),
        },
        MockPosition {
            position: running_position("X2", 8004),
            flow_cell: flow_cell("FAQ00002", "FLO-MIN114"),
            protocols,
        },
    ])
}
