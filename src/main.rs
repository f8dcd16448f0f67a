use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};

use http::{header, Method};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;

mod models {
    pub mod claims;
    pub mod recipe;
    pub mod user;
}

mod repositories {
    pub mod recipe;
    pub mod user;
}

mod services {
    pub mod auth;
    pub mod recipes;
    pub mod tokens;
}

mod handlers {
    pub mod auth;
    pub mod recipes;
}

mod middleware_layer {
    pub mod auth;
}

mod validation {
    pub mod auth;
    pub mod recipes;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/recipes", get(handlers::recipes::list_recipes))
        .route("/api/recipes/search", get(handlers::recipes::search_recipes))
        .route(
            "/api/recipes/savedRecipes/ids/{user_id}",
            get(handlers::recipes::saved_recipe_ids),
        )
        .route(
            "/api/recipes/savedRecipes/{user_id}",
            get(handlers::recipes::saved_recipes),
        )
        .route("/api/recipes/users/{user_id}", get(handlers::recipes::get_user))
        .route(
            "/api/recipes/adminStatus/{user_id}",
            get(handlers::recipes::admin_status),
        )
        .route("/api/recipes/{recipe_id}", get(handlers::recipes::get_recipe))
        .route(
            "/api/recipes/{user_id}/savedRecipes/{recipe_id}",
            delete(handlers::recipes::delete_saved_recipe),
        )
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/{user_id}", delete(handlers::auth::delete_user))
        .route("/api/recipes", post(handlers::recipes::create_recipe))
        .route("/api/recipes", put(handlers::recipes::add_saved_recipe))
        .route(
            "/api/recipes/{recipe_id}",
            delete(handlers::recipes::delete_recipe_as_admin),
        )
        .route(
            "/api/recipes/{recipe_id}",
            patch(handlers::recipes::edit_recipe_as_admin),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
