use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use actix_middleware::TrustedIdentityMiddleware;
use reaction_service::handlers;
use reaction_service::services::{AdminService, CountSyncClient, ReactionService};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "reaction-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "reaction-service"
        })),
    }
}

/// Reaction Service
///
/// Owns the reactions table and the cross-service consistency layer:
/// toggle semantics, best-effort count pushes to content-service, and the
/// orchestrated admin actions spanning content- and identity-service.
///
/// # Routes
///
/// - `/api/v1/reactions/*` - toggle, remove, list, count
/// - `/api/v1/admin/*` - orchestrated admin delete / block / unblock
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match reaction_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting reaction-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Database pool: {e}")))?;

    tracing::info!("Connected to database");

    // One client for all outbound calls; every cross-service call gets the
    // same timeout and a timeout counts as any other transport failure.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.peers.request_timeout_secs))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("HTTP client: {e}")))?;

    let counts = CountSyncClient::new(http.clone(), config.peers.content_service_url.clone());
    let reactions = ReactionService::new(db_pool.clone(), counts);
    let admin = AdminService::new(
        http,
        reactions.clone(),
        config.peers.content_service_url.clone(),
        config.peers.identity_service_url.clone(),
    );

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let reactions_data = web::Data::new(reactions);
    let admin_data = web::Data::new(admin);
    let pool_data = web::Data::new(db_pool);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(reactions_data.clone())
            .app_data(admin_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .service(
                web::scope("/api/v1")
                    .wrap(TrustedIdentityMiddleware)
                    .service(
                        web::scope("/reactions")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::reactions::apply_reaction))
                                    .route(web::delete().to(handlers::reactions::remove_reaction)),
                            )
                            .route(
                                "/target/{target_type}/{target_id}",
                                web::get().to(handlers::reactions::get_reactions_for_target),
                            )
                            .route(
                                "/target/{target_type}/{target_id}/count",
                                web::get().to(handlers::reactions::get_reaction_count_for_target),
                            ),
                    )
                    .service(
                        web::scope("/admin")
                            .route(
                                "/posts/{post_id}",
                                web::delete().to(handlers::admin::admin_delete_post),
                            )
                            .route(
                                "/comments/{comment_id}",
                                web::delete().to(handlers::admin::admin_delete_comment),
                            )
                            .route(
                                "/users/{user_id}/block",
                                web::post().to(handlers::admin::admin_block_user),
                            )
                            .route(
                                "/users/{user_id}/unblock",
                                web::post().to(handlers::admin::admin_unblock_user),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
