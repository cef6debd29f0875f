use media_relay::config::Config;
use media_relay::logging;
use media_relay::server::ProxyServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    ProxyServer::new(config).start().await
}
