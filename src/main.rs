use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use patient_records::config::Config;
use patient_records::{http, logging, PatientService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::parse();
    logging::init(&config.log)?;

    let store = config.store();
    if config.init {
        store.create_if_missing()?;
    }
    tracing::info!(data_file = %store.path().display(), "using patient store");

    let service = Arc::new(PatientService::new(store));
    http::serve(service, &config.addr).await?;
    Ok(())
}
