//! Wire messages for the parts of the MinKNOW API this client calls.
//!
//! These mirror the `minknow_api` protobuf schema field for field (same
//! names and tags) for the subset of messages used here. Fields the client
//! never reads are left out; prost skips unknown fields when decoding.

use crate::domain::model::{
    FlowCellInfo, FlowCellPosition, PositionState, ProtocolInfo, StartedRun, TagValue,
};
use std::collections::HashMap;

// minknow_api.manager

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlowCellPositionsRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlowCellPositionsResponse {
    #[prost(int32, tag = "1")]
    pub total_count: i32,
    #[prost(message, repeated, tag = "2")]
    pub positions: Vec<FlowCellPositionMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FlowCellPositionMessage {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub location: Option<Location>,
    #[prost(enumeration = "PositionStateMessage", tag = "3")]
    pub state: i32,
    #[prost(message, optional, tag = "4")]
    pub rpc_ports: Option<RpcPorts>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Location {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcPorts {
    #[prost(uint32, tag = "1")]
    pub secure: u32,
    #[prost(uint32, tag = "3")]
    pub secure_grpc_web: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PositionStateMessage {
    Initialising = 0,
    Running = 1,
    Resetting = 2,
    HardwareRemoved = 3,
    HardwareError = 4,
    SoftwareError = 5,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetVersionInfoRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetVersionInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub minknow: Option<MinknowVersion>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MinknowVersion {
    #[prost(int32, tag = "1")]
    pub major: i32,
    #[prost(int32, tag = "2")]
    pub minor: i32,
    #[prost(int32, tag = "3")]
    pub patch: i32,
    #[prost(string, tag = "4")]
    pub full: String,
}

// minknow_api.device

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFlowCellInfoRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFlowCellInfoResponse {
    #[prost(bool, tag = "1")]
    pub has_flow_cell: bool,
    #[prost(string, tag = "4")]
    pub flow_cell_id: String,
    #[prost(string, tag = "6")]
    pub product_code: String,
    #[prost(string, tag = "7")]
    pub user_specified_flow_cell_id: String,
    #[prost(string, tag = "8")]
    pub user_specified_product_code: String,
}

// minknow_api.protocol

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProtocolsRequest {
    #[prost(bool, tag = "1")]
    pub force_reload: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListProtocolsResponse {
    #[prost(message, repeated, tag = "1")]
    pub protocols: Vec<ProtocolInfoMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtocolInfoMessage {
    #[prost(string, tag = "1")]
    pub identifier: String,
    #[prost(map = "string, message", tag = "2")]
    pub tags: HashMap<String, TagValueMessage>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub tag_extraction_result: Option<TagExtractionResult>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TagExtractionResult {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub error_report: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TagValueMessage {
    #[prost(oneof = "tag_value::Value", tags = "1, 2, 3, 4, 5, 6")]
    pub value: Option<tag_value::Value>,
}

pub mod tag_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(string, tag = "1")]
        StringValue(String),
        #[prost(bool, tag = "2")]
        BoolValue(bool),
        #[prost(int64, tag = "3")]
        IntValue(i64),
        #[prost(double, tag = "4")]
        DoubleValue(f64),
        #[prost(string, tag = "5")]
        ArrayValue(String),
        #[prost(string, tag = "6")]
        ObjectValue(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StartProtocolRequest {
    #[prost(string, tag = "1")]
    pub identifier: String,
    #[prost(string, repeated, tag = "2")]
    pub args: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StartProtocolResponse {
    #[prost(string, tag = "1")]
    pub run_id: String,
}

impl From<PositionStateMessage> for PositionState {
    fn from(state: PositionStateMessage) -> Self {
        match state {
            PositionStateMessage::Initialising => PositionState::Initialising,
            PositionStateMessage::Running => PositionState::Running,
            PositionStateMessage::Resetting => PositionState::Resetting,
            PositionStateMessage::HardwareRemoved => PositionState::HardwareRemoved,
            PositionStateMessage::HardwareError => PositionState::HardwareError,
            PositionStateMessage::SoftwareError => PositionState::SoftwareError,
        }
    }
}

impl From<FlowCellPositionMessage> for FlowCellPosition {
    fn from(msg: FlowCellPositionMessage) -> Self {
        let state = PositionStateMessage::try_from(msg.state)
            .map(PositionState::from)
            .unwrap_or(PositionState::SoftwareError);
        FlowCellPosition {
            name: msg.name,
            location: msg.location.map(|l| (l.x, l.y)),
            state,
            secure_port: msg.rpc_ports.map(|p| p.secure).filter(|port| *port != 0),
        }
    }
}

impl From<GetFlowCellInfoResponse> for FlowCellInfo {
    fn from(msg: GetFlowCellInfoResponse) -> Self {
        FlowCellInfo {
            has_flow_cell: msg.has_flow_cell,
            flow_cell_id: msg.flow_cell_id,
            product_code: msg.product_code,
            user_specified_flow_cell_id: msg.user_specified_flow_cell_id,
            user_specified_product_code: msg.user_specified_product_code,
        }
    }
}

impl From<ProtocolInfoMessage> for ProtocolInfo {
    fn from(msg: ProtocolInfoMessage) -> Self {
        let tags_valid = msg
            .tag_extraction_result
            .as_ref()
            .map(|r| r.success)
            .unwrap_or(true);
        ProtocolInfo {
            identifier: msg.identifier,
            name: msg.name,
            tags: msg
                .tags
                .into_iter()
                .filter_map(|(key, value)| Some((key, TagValue::from(value.value?))))
                .collect(),
            tags_valid,
        }
    }
}

impl From<tag_value::Value> for TagValue {
    fn from(value: tag_value::Value) -> Self {
        match value {
            tag_value::Value::StringValue(s) => TagValue::String(s),
            tag_value::Value::BoolValue(b) => TagValue::Bool(b),
            tag_value::Value::IntValue(i) => TagValue::Int(i),
            tag_value::Value::DoubleValue(d) => TagValue::Double(d),
            tag_value::Value::ArrayValue(a) => TagValue::Array(a),
            tag_value::Value::ObjectValue(o) => TagValue::Object(o),
        }
    }
}

impl From<StartProtocolResponse> for StartedRun {
    fn from(msg: StartProtocolResponse) -> Self {
        StartedRun { run_id: msg.run_id }
    }
}
