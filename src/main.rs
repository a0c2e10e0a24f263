//! employee-registry server entry point.
//!
//! Reads [`Config`] from the environment, installs logging, opens the
//! configured store and serves the JSON API until the listener fails.

use std::sync::Arc;

use employee_registry::{http, Config, EmployeeService, InMemoryEmployeeStore, JsonFileStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    match &config.data_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file-backed employee store");
            let service = EmployeeService::new(JsonFileStore::open(path)?);
            http::serve(Arc::new(service), config.bind_addr).await?;
        }
        None => {
            tracing::warn!("no data file configured, records will not survive a restart");
            let service = EmployeeService::new(InMemoryEmployeeStore::new());
            http::serve(Arc::new(service), config.bind_addr).await?;
        }
    }

    Ok(())
}
