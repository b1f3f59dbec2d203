pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::{AuthError, PasswordService, SessionIssuer};
use config::AppConfig;
use database::models::User;
use database::{Stores, UserStore};
use services::admin::SuperAdminInput;
use services::{AdminService, PartnershipService, ServiceError, SessionService};

/// Shared, read-only application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub stores: Stores,
    pub issuer: SessionIssuer,
    pub passwords: PasswordService,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AuthError> {
        let issuer = SessionIssuer::new(&config.security.jwt_secret)?;
        let passwords = PasswordService::new(&config.security)?;
        Ok(Self { config: Arc::new(config), stores, issuer, passwords })
    }

    pub fn partnerships(&self) -> PartnershipService {
        PartnershipService::new(self.stores.partnerships.clone(), self.config.pagination.clone())
    }

    pub fn admin(&self) -> AdminService {
        AdminService::new(self.stores.users.clone(), self.passwords.clone())
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.stores.users.clone(), self.passwords.clone(), self.issuer.clone())
    }

    /// Creates the configured bootstrap SuperAdmin unless that email already
    /// exists. Returns the account only when one was created.
    pub async fn bootstrap_super_admin(&self) -> Result<Option<User>, ServiceError> {
        let bootstrap = &self.config.bootstrap;
        let Some(email) = bootstrap.super_admin_email.clone() else {
            return Ok(None);
        };
        let Some(password) = bootstrap.super_admin_password.clone() else {
            return Err(ServiceError::validation(
                "BOOTSTRAP_SUPER_ADMIN_PASSWORD must be set together with BOOTSTRAP_SUPER_ADMIN_EMAIL",
            ));
        };

        if self.stores.users.find_by_email(&email).await?.is_some() {
            return Ok(None);
        }

        let input = SuperAdminInput {
            email,
            first_name: "Super".into(),
            last_name: "Admin".into(),
            password,
        };
        self.admin().create_super_admin(input).await.map(Some)
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .merge(public_routes())
        // Authenticated
        .merge(protected_routes(state.clone()))
        // SuperAdmin only
        .merge(elevated_routes(state.clone()))
        // Global middleware, outermost first
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login", post(public::auth::login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{partnerships, session};

    Router::new()
        .route("/logout", post(session::logout))
        .route("/reset-password", post(session::reset_password))
        .route(
            "/partnerships",
            get(partnerships::partnership_list).post(partnerships::partnership_create),
        )
        .route("/partnerships/export", get(partnerships::partnership_export))
        .route(
            "/partnerships/:id",
            get(partnerships::partnership_get)
                .put(partnerships::partnership_update)
                .delete(partnerships::partnership_delete),
        )
        .route("/partnerships/:id/approve", post(partnerships::partnership_approve))
        .route("/partnerships/:id/reject", post(partnerships::partnership_reject))
        .route("/partnerships/:id/archive", post(partnerships::partnership_archive))
        .route("/partnerships/:id/renew", post(partnerships::partnership_renew))
        .route_layer(from_fn_with_state(state.clone(), middleware::validate_user_middleware))
        .route_layer(from_fn_with_state(state, middleware::session_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    use handlers::elevated::admin;

    Router::new()
        .route("/admin/users", post(admin::user_create).get(admin::user_list))
        .route("/admin/users/:id", put(admin::user_update).delete(admin::user_delete))
        .route("/admin/partnerships", get(admin::partnership_list_all))
        .route_layer(from_fn(middleware::require_super_admin))
        .route_layer(from_fn_with_state(state.clone(), middleware::validate_user_middleware))
        .route_layer(from_fn_with_state(state, middleware::session_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
