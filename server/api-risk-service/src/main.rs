//! Binary entrypoint for the API risk service.

use std::net::SocketAddr;
use std::sync::Arc;

use api_risk_service::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  api_risk_engine::init_tracing("info,tower_http=debug");

  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5005".into())
    .parse()?;

  let state = Arc::new(AppState::from_env()?);
  let app = api_risk_service::router(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!("api-risk-service listening on http://{}", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
