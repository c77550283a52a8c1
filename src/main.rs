use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anivocab::config::Settings;
use anivocab::state::AppState;
use anivocab::{db, handlers};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "anivocab=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = Settings::load();
  tracing::info!("Using database {}", settings.database_path.display());
  tracing::info!("Distractor fallback: {}", settings.distractor_fallback.as_str());
  if settings.admin_token.is_none() {
    tracing::warn!("ADMIN_TOKEN not set; admin endpoints are disabled");
  }

  let pool = match db::init_db(&settings.database_path) {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!("Failed to initialize database: {}", e);
      std::process::exit(1);
    }
  };

  {
    let conn = match db::try_lock(&pool) {
      Ok(conn) => conn,
      Err(e) => {
        tracing::error!("{} during startup", e);
        std::process::exit(1);
      }
    };
    if let Err(e) = db::seed_sample_catalog(&conn) {
      tracing::warn!("Failed to seed sample catalog: {}", e);
    }
  }

  let app = handlers::router(AppState::new(pool, &settings));

  let bind_addr = settings.bind_addr();
  let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
    Ok(listener) => listener,
    Err(e) => {
      tracing::error!("Failed to bind to {}: {}", bind_addr, e);
      std::process::exit(1);
    }
  };

  tracing::info!("Server running on http://localhost:{}", settings.port);

  if let Err(e) = axum::serve(listener, app).await {
    tracing::error!("Server error: {}", e);
    std::process::exit(1);
  }
}
