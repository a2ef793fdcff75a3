use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let router = match cors_layer(&state.config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::welcome))
        .route("/health", get(public::health))
        .route("/login", post(public::login))
        .route("/users", post(public::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{favorites, movies, users};

    Router::new()
        // Accounts
        .route("/users", get(users::list))
        .route(
            "/users/:name",
            get(users::show).put(users::update).delete(users::delete),
        )
        // Favorites
        .route(
            "/users/:name/movies/:movie_id",
            post(favorites::add).delete(favorites::remove),
        )
        // Movies
        .route("/movies", get(movies::list))
        .route("/movies/:title", get(movies::by_title))
        .route("/movies/genres/:genre_name", get(movies::genre))
        .route("/movies/director/:director_name", get(movies::director))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
