use chrono::Local;
use tracing::{error, info, Level};

use token_mcap_etl::{
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    handler::{write_report, MarketCapReport},
    model::DateAxis,
    provider::HTTP,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match init() {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let tokens = config.get_tracked_tokens()?;
    let chain_ids = config.get_chain_ids()?;
    info!(
        "Loaded {} tracked tokens, {} chains (metadata policy: {}, supply: {})",
        tokens.len(),
        chain_ids.0.len(),
        config.metadata_failure_policy,
        config.supply_source
    );

    let axis = DateAxis::new(config.start_date, &Local::now())?;
    let http = HTTP::new(config.clone())?;

    let report = MarketCapReport::from_config(&http, &http, &config)
        .build(&tokens, &chain_ids, &axis)
        .await;

    write_report(&config.output_file, &report)?;

    Ok(())
}

fn init() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}
