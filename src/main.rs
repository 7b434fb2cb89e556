use axum::{
    Json, Router, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use pokedex::{Bitmap, Config, Pokedex, PresentationRecord, normalize_identifier};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct AppState {
    pokedex: Pokedex,
}

/// Size of a decoded image slot; `null` in JSON when nothing is shown.
#[derive(Serialize, Debug)]
struct ImageView {
    width: u32,
    height: u32,
}

#[derive(Serialize, Debug)]
struct PresentationView {
    dex_info: String,
    competitive_info: String,
    artwork: Option<ImageView>,
    front_sprite: Option<ImageView>,
    back_sprite: Option<ImageView>,
}

impl From<&Bitmap> for ImageView {
    fn from(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
        }
    }
}

impl From<&PresentationRecord> for PresentationView {
    fn from(record: &PresentationRecord) -> Self {
        Self {
            dex_info: record.dex_text(),
            competitive_info: record.competitive_text(),
            artwork: record.artwork.as_ref().map(ImageView::from),
            front_sprite: record.front_sprite.as_ref().map(ImageView::from),
            back_sprite: record.back_sprite.as_ref().map(ImageView::from),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,pokedex=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.server.bind_address.clone();
    let app_state = Arc::new(AppState {
        pokedex: Pokedex::new(config),
    });

    let app = Router::new()
        .route("/pokedex/{identifier}", get(lookup_handler))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("listening on {}", address),
        Err(_) => tracing::info!("listening on {}", bind_address),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[debug_handler]
async fn lookup_handler(
    State(app_state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> (StatusCode, Json<PresentationView>) {
    let identifier = normalize_identifier(&identifier);
    tracing::debug!("Lookup requested for {:?}", identifier);

    let record = app_state.pokedex.build_presentation(&identifier).await;
    let status = if record.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    (status, Json(PresentationView::from(&record)))
}
