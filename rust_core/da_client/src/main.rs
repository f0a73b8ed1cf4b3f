use anyhow::Context;
use connector_avail::AvailClient;
use connectors_common::OrderSnapshot;
use da_client::config::Config;
use da_client::server::{self, AppState};
use da_client::status::spawn_status_loop;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let conf = Config::from_env().context("failed to load configuration")?;
    info!("loaded {:?}", conf);

    let payload = OrderSnapshot::default()
        .to_payload()
        .context("failed to marshal JSON")?;
    let client = AvailClient::new(&conf.avail).context("failed to build Avail client")?;
    info!("submitting as {} to {}", client.address(), conf.avail.ws_url);

    spawn_status_loop(conf.status_interval());

    let listener = TcpListener::bind(("0.0.0.0", conf.port))
        .await
        .with_context(|| format!("failed to bind port {}", conf.port))?;
    info!("Starting server at port {}", conf.port);
    server::serve(listener, AppState::new(Arc::new(client), payload))
        .await
        .context("server stopped")?;
    Ok(())
}
