use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use actix_middleware::TrustedIdentityMiddleware;
use content_service::handlers;
use content_service::services::{CommentService, PostService, ReactionCountClient};
use crypto_core::jwt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "content-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "content-service"
        })),
    }
}

/// Content Service
///
/// Owns posts, comments and hashtags, and the cached aggregate reaction
/// counts. The internal endpoints receive count pushes from
/// reaction-service and admin deletes relayed through its orchestrator.
///
/// # Routes
///
/// - `/api/v1/posts/*`, `/api/v1/comments/*` - public content API
/// - `/internal/*` - reaction-count setters and admin deletes
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

    let config = match content_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting content-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if std::env::var(jwt::JWT_SECRET_ENV).is_err() {
        tracing::warn!(
            "{} not configured; forwarded-token verification will fail requests",
            jwt::JWT_SECRET_ENV
        );
    }

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Database pool: {e}")))?;

    tracing::info!("Connected to database");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.peers.request_timeout_secs))
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("HTTP client: {e}")))?;

    let reaction_counts =
        ReactionCountClient::new(http, config.peers.reaction_service_url.clone());
    let posts = PostService::new(db_pool.clone(), reaction_counts);
    let comments = CommentService::new(db_pool.clone(), posts.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let posts_data = web::Data::new(posts);
    let comments_data = web::Data::new(comments);
    let pool_data = web::Data::new(db_pool);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(posts_data.clone())
            .app_data(comments_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            // Internal endpoints: trusted peers only, no user bearer token
            .service(
                web::scope("/internal")
                    .route(
                        "/posts/{post_id}/reaction-count",
                        web::put().to(handlers::internal::set_post_reaction_count),
                    )
                    .route(
                        "/comments/{comment_id}/reaction-count",
                        web::put().to(handlers::internal::set_comment_reaction_count),
                    )
                    .route(
                        "/admin/posts/{post_id}",
                        web::delete().to(handlers::internal::admin_delete_post),
                    )
                    .route(
                        "/admin/comments/{comment_id}",
                        web::delete().to(handlers::internal::admin_delete_comment),
                    ),
            )
            .service(
                web::scope("/api/v1")
                    .wrap(TrustedIdentityMiddleware)
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::posts::list_posts))
                                    .route(web::post().to(handlers::posts::create_post)),
                            )
                            .route("/top", web::get().to(handlers::posts::list_top_posts))
                            .route("/search", web::get().to(handlers::posts::search_posts))
                            .route(
                                "/hashtag/{tag}",
                                web::get().to(handlers::posts::get_posts_by_hashtag),
                            )
                            .route(
                                "/user/{user_id}",
                                web::get().to(handlers::posts::get_user_posts),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::posts::get_post))
                                    .route(web::put().to(handlers::posts::update_post))
                                    .route(web::delete().to(handlers::posts::delete_post)),
                            )
                            .service(
                                web::resource("/{post_id}/comments")
                                    .route(web::get().to(handlers::comments::get_post_comments))
                                    .route(web::post().to(handlers::comments::create_comment)),
                            ),
                    )
                    .service(
                        web::scope("/comments").service(
                            web::resource("/{comment_id}")
                                .route(web::put().to(handlers::comments::update_comment))
                                .route(web::delete().to(handlers::comments::delete_comment)),
                        ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
