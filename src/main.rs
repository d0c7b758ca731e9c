use std::net::SocketAddr;

use mongodb::Client;

use bookmarket::{config, routes, services::db_init, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // Mongo connection
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&settings.mongodb_db);

    if let Err(e) = db_init::ensure_indexes(&db).await {
        tracing::warn!(error = %e, "could not ensure indexes");
    }

    let state = AppState {
        db,
        settings: settings.clone(),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>().unwrap(), settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
