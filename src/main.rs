use std::net::SocketAddr;

use devconnect::{make_router, run_app};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "devconnect=info".into()),
        )
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 5000));
    let router = make_router();
    info!("Server started on {}", addr);
    if let Err(error) = run_app(router, addr).await {
        error!("Server error: {}", error);
    }
}
