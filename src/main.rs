use carcat::config::ConfigLoader;
use carcat::logger::init_logger;
use carcat::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ConfigLoader::new()
        .load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logger(&settings.logger)?;

    Server::new(settings).run().await
}
