use clap::Parser;
use minknow_client::utils::{logger, validation::Validate};
use minknow_client::{
    write_outcome, CliConfig, ConnectionSettings, FlowCellCheck, FlowCellCheckReport,
    GrpcManager, ManagerApi, Result,
};
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let result = match config.validate() {
        Ok(()) => run(&config).await,
        Err(e) => Err(e),
    };

    let code = write_outcome(result, &mut io::stdout(), &mut io::stderr()).unwrap_or(1);
    std::process::exit(code);
}

async fn run(config: &CliConfig) -> Result<FlowCellCheckReport> {
    let settings = ConnectionSettings::resolve(config)?;
    tracing::debug!("Connection settings: {:?}", settings);

    let manager = GrpcManager::connect(&settings).await?;
    match manager.version().await {
        Ok(version) => tracing::debug!("MinKNOW version {}", version),
        Err(e) => tracing::warn!("Could not read MinKNOW version: {}", e),
    }

    FlowCellCheck::new(manager, config.selector()).run().await
}
