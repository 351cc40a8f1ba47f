//! Client for the MinKNOW sequencing-instrument control API.
//!
//! The crate talks to a running MinKNOW instance over gRPC: it lists the
//! sequencing positions known to the manager, connects to individual
//! positions and drives their device and protocol services. The
//! `start-flow-cell-check` binary built from it starts a platform QC run on a
//! position chosen by name or by the flow cell it holds.
//!
//! The control flow in [`crate::core`] only sees the [`ManagerApi`] and
//! [`PositionApi`] traits, so it can be exercised without an instrument.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::grpc::{GrpcManager, GrpcPosition};
pub use config::{CliConfig, ConnectionSettings, TomlConfig};
pub use crate::core::{
    flow_cell_check::FlowCellCheck, outcome::write_outcome, protocols::find_protocol,
};
pub use domain::model::{
    FlowCellCheckReport, FlowCellInfo, FlowCellPosition, PositionSelector, PositionState,
    ProtocolInfo, StartedRun, TagValue,
};
pub use domain::ports::{ManagerApi, PositionApi};
pub use utils::error::{ClientError, Result};

/// Version of this client, as declared in the package metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
