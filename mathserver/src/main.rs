//! Math server process entry point

use clap::Parser;
use shared::logging;

use mathserver::{
    FileHistoryStore, InMemoryHistoryStore, SERVICE_NAME, ServerConfig, StoreKind, WebServer,
    WebServerResult,
};

#[tokio::main]
async fn main() -> WebServerResult<()> {
    // A missing .env file is fine; real environment variables take precedence
    let _ = dotenv::dotenv();

    let config = ServerConfig::parse().validate()?;
    logging::init_tracing(Some(&config.log_level));

    let address = config.bind_address();
    logging::log_startup(
        SERVICE_NAME,
        &format!("Math API on {address} with {:?} history store", config.store),
    );

    match config.store {
        StoreKind::Memory => WebServer::new(InMemoryHistoryStore::new()).run(address).await?,
        StoreKind::File => {
            let store = FileHistoryStore::open(&config.data_file).await?;
            WebServer::new(store).run(address).await?
        }
    }

    logging::log_success(SERVICE_NAME, "Math API stopped gracefully");
    Ok(())
}
