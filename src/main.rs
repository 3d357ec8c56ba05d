use anyhow::{Context, Result};
use chainlink_price_reader::client::NodeClient;
use chainlink_price_reader::config::load_config;
use chainlink_price_reader::oracle::{parse_contract_address, OracleReader};
use chainlink_price_reader::OracleError;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<OracleError>()
                .map(OracleError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;

    // Reject a bad address before any network traffic.
    let address = parse_contract_address(&config.contract_address)?;

    let client = NodeClient::connect(&config.node_url)
        .await
        .context("Failed to connect to node")?;
    let reader = OracleReader::new(client, address);

    let round = reader
        .latest_round_data()
        .await
        .with_context(|| format!("Failed to get latest round data from {}", reader.address()))?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", round).context("Failed to write round data")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
