use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Initialising,
    Running,
    Resetting,
    HardwareRemoved,
    HardwareError,
    SoftwareError,
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PositionState::Initialising => "initialising",
            PositionState::Running => "running",
            PositionState::Resetting => "resetting",
            PositionState::HardwareRemoved => "hardware removed",
            PositionState::HardwareError => "hardware error",
            PositionState::SoftwareError => "software error",
        };
        f.write_str(label)
    }
}

/// A sequencing position as reported by the manager.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCellPosition {
    pub name: String,
    pub location: Option<(i32, i32)>,
    pub state: PositionState,
    /// Secure gRPC port of the position's own service. Only set while running.
    pub secure_port: Option<u32>,
}

impl FlowCellPosition {
    pub fn is_running(&self) -> bool {
        self.state == PositionState::Running && self.secure_port.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowCellInfo {
    pub has_flow_cell: bool,
    pub flow_cell_id: String,
    pub product_code: String,
    pub user_specified_flow_cell_id: String,
    pub user_specified_product_code: String,
}

impl FlowCellInfo {
    /// The product code entered by the user wins over the one read from the
    /// flow cell's EEPROM.
    pub fn effective_product_code(&self) -> &str {
        if self.user_specified_product_code.is_empty() {
            &self.product_code
        } else {
            &self.user_specified_product_code
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    String(String),
    Bool(bool),
    Int(i64),
    Double(f64),
    /// JSON-encoded array.
    Array(String),
    /// JSON-encoded object.
    Object(String),
}

impl TagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolInfo {
    pub identifier: String,
    pub name: String,
    pub tags: HashMap<String, TagValue>,
    /// False when MinKNOW could not read the protocol's tags.
    pub tags_valid: bool,
}

impl ProtocolInfo {
    pub fn tag_str(&self, key: &str) -> Option<&str> {
        self.tags.get(key).and_then(TagValue::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedRun {
    pub run_id: String,
}

/// How the user picked the position to run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSelector {
    Name(String),
    FlowCellId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowCellCheckReport {
    pub run_id: String,
    pub position: String,
    pub flow_cell_id: String,
    pub user_specified_flow_cell_id: String,
}

impl fmt::Display for FlowCellCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Started flow cell check:")?;
        writeln!(f, "    run_id={}", self.run_id)?;
        writeln!(f, "    position={}", self.position)?;
        writeln!(f, "    flow_cell_id={}", self.flow_cell_id)?;
        writeln!(
            f,
            "    user_specified_flow_cell_id={}",
            self.user_specified_flow_cell_id
        )
    }
}
