use std::{net::SocketAddr, sync::Arc};

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use fridgechef_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LogArgs},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logger(log: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log.filter.as_str()));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = match state(args.clone()) {
        Ok(app_state) => app_state,
        Err(e) => {
            error!("Startup aborted: {}", e);
            return Err(e);
        }
    };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let root_path = args.server.root_path.clone();

    let app = router(app_state)?
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(prometheus_layer);

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("FridgeChef listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
