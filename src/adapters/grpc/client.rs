use crate::adapters::grpc::channel::{self, AuthInterceptor, RpcChannel};
use crate::adapters::grpc::proto;
use crate::config::ConnectionSettings;
use crate::domain::model::{FlowCellInfo, FlowCellPosition, ProtocolInfo, StartedRun};
use crate::domain::ports::{ManagerApi, PositionApi};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::ClientTlsConfig;
use tonic::Status;

const FLOW_CELL_POSITIONS: &str = "/minknow_api.manager.ManagerService/flow_cell_positions";
const MANAGER_VERSION_INFO: &str = "/minknow_api.manager.ManagerService/get_version_info";
const GET_FLOW_CELL_INFO: &str = "/minknow_api.device.DeviceService/get_flow_cell_info";
const LIST_PROTOCOLS: &str = "/minknow_api.protocol.ProtocolService/list_protocols";
const START_PROTOCOL: &str = "/minknow_api.protocol.ProtocolService/start_protocol";

async fn unary<Req, Resp>(grpc: &Grpc<RpcChannel>, path: &'static str, request: Req) -> Result<Resp>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = grpc.clone();
    grpc.ready()
        .await
        .map_err(|e| Status::unknown(format!("Service was not ready: {}", e)))?;

    let codec = ProstCodec::<Req, Resp>::default();
    let response = grpc
        .unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(path),
            codec,
        )
        .await?;
    Ok(response.into_inner())
}

/// Client for the manager service of a MinKNOW instance.
pub struct GrpcManager {
    host: String,
    tls: ClientTlsConfig,
    auth: AuthInterceptor,
    grpc: Grpc<RpcChannel>,
}

impl GrpcManager {
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let tls = channel::tls_config(settings)?;
        let auth = AuthInterceptor::new(settings.api_token.as_deref())?;
        let rpc = channel::connect(&settings.host, settings.port, tls.clone(), auth.clone()).await?;
        tracing::debug!("Connected to manager at {}:{}", settings.host, settings.port);

        Ok(Self {
            host: settings.host.clone(),
            tls,
            auth,
            grpc: Grpc::new(rpc),
        })
    }
}

#[async_trait]
impl ManagerApi for GrpcManager {
    type Connection = GrpcPosition;

    async fn flow_cell_positions(&self) -> Result<Vec<FlowCellPosition>> {
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {}", e)))?;

        let codec: ProstCodec<proto::FlowCellPositionsRequest, proto::FlowCellPositionsResponse> =
            ProstCodec::default();
        let mut stream = grpc
            .server_streaming(
                tonic::Request::new(proto::FlowCellPositionsRequest {}),
                PathAndQuery::from_static(FLOW_CELL_POSITIONS),
                codec,
            )
            .await?
            .into_inner();

        let mut positions = Vec::new();
        while let Some(page) = stream.message().await? {
            tracing::debug!(
                "Received {} of {} positions",
                positions.len() + page.positions.len(),
                page.total_count
            );
            positions.extend(page.positions.into_iter().map(FlowCellPosition::from));
        }
        Ok(positions)
    }

    async fn connect(&self, position: &FlowCellPosition) -> Result<GrpcPosition> {
        let port = position
            .secure_port
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(|| ClientError::PositionNotRunning {
                position: position.name.clone(),
                state: position.state.to_string(),
            })?;

        let rpc = channel::connect(&self.host, port, self.tls.clone(), self.auth.clone()).await?;
        tracing::debug!("Connected to position {} on port {}", position.name, port);

        Ok(GrpcPosition {
            name: position.name.clone(),
            grpc: Grpc::new(rpc),
        })
    }

    async fn version(&self) -> Result<String> {
        let response: proto::GetVersionInfoResponse =
            unary(&self.grpc, MANAGER_VERSION_INFO, proto::GetVersionInfoRequest {}).await?;
        Ok(response
            .minknow
            .map(|v| {
                if v.full.is_empty() {
                    format!("{}.{}.{}", v.major, v.minor, v.patch)
                } else {
                    v.full
                }
            })
            .unwrap_or_default())
    }
}

/// Connection to the device and protocol services of one position.
pub struct GrpcPosition {
    name: String,
    grpc: Grpc<RpcChannel>,
}

#[async_trait]
impl PositionApi for GrpcPosition {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_flow_cell_info(&self) -> Result<FlowCellInfo> {
        let response: proto::GetFlowCellInfoResponse =
            unary(&self.grpc, GET_FLOW_CELL_INFO, proto::GetFlowCellInfoRequest {}).await?;
        Ok(response.into())
    }

    async fn list_protocols(&self) -> Result<Vec<ProtocolInfo>> {
        let response: proto::ListProtocolsResponse = unary(
            &self.grpc,
            LIST_PROTOCOLS,
            proto::ListProtocolsRequest {
                force_reload: false,
            },
        )
        .await?;
        Ok(response
            .protocols
            .into_iter()
            .map(ProtocolInfo::from)
            .collect())
    }

    async fn start_protocol(&self, identifier: &str, args: &[String]) -> Result<StartedRun> {
        let response: proto::StartProtocolResponse = unary(
            &self.grpc,
            START_PROTOCOL,
            proto::StartProtocolRequest {
                identifier: identifier.to_string(),
                args: args.to_vec(),
            },
        )
        .await?;
        Ok(response.into())
    }
}
