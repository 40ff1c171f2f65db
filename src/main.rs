use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userhub::{
  adapters::http::{
    AdminGuard, AuthMiddleware, RequestIdMiddleware, configure_admin_routes,
    configure_auth_routes, configure_user_routes,
    handlers::system::{banner_handler, health_handler},
  },
  application::admin::{DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase},
  application::auth::{
    ChangePasswordUseCase, LoginUserUseCase, RegisterUserUseCase, UpdateProfileUseCase,
  },
  domain::auth::services::{AccessControl, AuthService},
  infrastructure::{
    config::Config,
    persistence::postgres::PostgresAccountRepository,
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userhub=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting UserHub application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repository
  let account_repo = Arc::new(PostgresAccountRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let token_service =
    Arc::new(JwtTokenService::new(&config.auth.jwt_secret).expect("Failed to create token service"));

  // Initialize domain services
  let auth_service = Arc::new(AuthService::new(
    account_repo.clone(),
    password_hasher,
    token_service.clone(),
    config.auth.token_ttl_minutes,
  ));
  let access_control = Arc::new(AccessControl::new(account_repo.clone(), token_service));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let update_profile_use_case = Arc::new(UpdateProfileUseCase::new(auth_service.clone()));
  let change_password_use_case = Arc::new(ChangePasswordUseCase::new(auth_service.clone()));

  // Initialize admin use cases
  let list_users_use_case = Arc::new(ListUsersUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetUserUseCase::new(auth_service.clone()));
  let update_user_use_case = Arc::new(UpdateUserUseCase::new(auth_service.clone()));
  let delete_user_use_case = Arc::new(DeleteUserUseCase::new(auth_service.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Allow cross-origin browser clients
      .wrap(
        Cors::default()
          .allow_any_origin()
          .allow_any_method()
          .allow_any_header(),
      )
      // Service banner and liveness probe
      .route("/", web::get().to(banner_handler))
      .route("/health", web::get().to(health_handler))
      // Configure public auth routes
      .service(web::scope("/api/auth").configure(|cfg| {
        configure_auth_routes(cfg, register_use_case.clone(), login_use_case.clone())
      }))
      // Configure self-service routes (protected with AuthMiddleware)
      .service(
        web::scope("/api/users")
          .wrap(AuthMiddleware::new(access_control.clone()))
          .configure(|cfg| {
            configure_user_routes(
              cfg,
              update_profile_use_case.clone(),
              change_password_use_case.clone(),
            )
          }),
      )
      // Configure admin routes (AuthMiddleware runs first, then AdminGuard)
      .service(
        web::scope("/api/admin/users")
          .wrap(AdminGuard::new(access_control.clone()))
          .wrap(AuthMiddleware::new(access_control.clone()))
          .configure(|cfg| {
            configure_admin_routes(
              cfg,
              list_users_use_case.clone(),
              get_user_use_case.clone(),
              update_user_use_case.clone(),
              delete_user_use_case.clone(),
            )
          }),
      )
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
