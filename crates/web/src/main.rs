use database::{DatabaseConnectionInfo, PgDatabase};
use directory::memory::MemoryDatabase;
use web::{start_web_server, WebConfig, WebState};

#[tokio::main]
async fn main() {
    // a missing .env file is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = WebConfig::from_env();

    let result = match DatabaseConnectionInfo::from_env() {
        Some(database_connection_info) => {
            let database = PgDatabase::connect(database_connection_info)
                .await
                .expect("could not connect to database.");
            start_web_server(config, WebState::new(database)).await
        }
        None => {
            log::warn!("No database configured, serving the in-memory sample campus.");
            start_web_server(config, WebState::new(MemoryDatabase::seeded())).await
        }
    };

    if let Err(why) = result {
        log::error!("Web server stopped: {}", why);
    }
}
