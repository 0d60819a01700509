/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::resolver::resolve_identity;
use taskboard_shared::store::{
    postgres::{PgTodoStore, PgUserStore},
    TodoStore, UserStore,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Todo storage
    pub todos: Arc<dyn TodoStore>,

    /// User account storage
    pub users: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state backed by PostgreSQL
    pub fn new(db: PgPool, config: Config) -> Self {
        Self::with_stores(
            Arc::new(PgTodoStore::new(db.clone())),
            Arc::new(PgUserStore::new(db)),
            config,
        )
    }

    /// Creates application state over arbitrary stores
    pub fn with_stores(
        todos: Arc<dyn TodoStore>,
        users: Arc<dyn UserStore>,
        config: Config,
    ) -> Self {
        Self {
            todos,
            users,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /health                          # Health check (public)
/// ├── POST   /auth                            # Register (public)
/// ├── POST   /auth/token                      # Login, form encoded (public)
/// ├── GET    /todos                           # Caller's todos
/// ├── POST   /todo                            # Create todo
/// ├── GET    /todo/:id                        # Read own todo
/// ├── PUT    /todo/:id                        # Replace own todo
/// ├── DELETE /todo/:id                        # Delete own todo
/// ├── GET    /admin/todo                      # Every todo (admin)
/// ├── DELETE /admin/todo/:id                  # Delete any todo (admin)
/// ├── GET    /user                            # Caller's profile
/// ├── PUT    /user/password                   # Change password
/// └── PUT    /user/phonenumber/:phone_number  # Set phone number
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Identity resolution (everything except health and auth)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration and login (public)
    let auth_routes = Router::new()
        .route("/auth", post(routes::auth::register))
        .route("/auth/token", post(routes::auth::login));

    // Everything below requires a resolved identity
    let todo_routes = Router::new()
        .route("/todos", get(routes::todos::list_todos))
        .route("/todo", post(routes::todos::create_todo))
        .route(
            "/todo/:id",
            get(routes::todos::get_todo)
                .put(routes::todos::update_todo)
                .delete(routes::todos::delete_todo),
        );

    let admin_routes = Router::new()
        .route("/todo", get(routes::admin::list_all_todos))
        .route("/todo/:id", delete(routes::admin::delete_any_todo));

    let user_routes = Router::new()
        .route("/user", get(routes::users::get_user))
        .route("/user/password", put(routes::users::change_password))
        .route(
            "/user/phonenumber/:phone_number",
            put(routes::users::update_phone_number),
        );

    let protected_routes = Router::new()
        .merge(todo_routes)
        .nest("/admin", admin_routes)
        .merge(user_routes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Identity resolution middleware layer
///
/// Validates the bearer token and injects the caller's `Identity` into
/// request extensions. Runs before any extractor of the wrapped handlers, so
/// an unauthenticated request is answered with 401 before its path or body
/// is looked at.
async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = resolve_identity(req.headers(), state.jwt_secret())?;

    tracing::debug!(user_id = identity.id(), role = %identity.role(), "Resolved caller");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
