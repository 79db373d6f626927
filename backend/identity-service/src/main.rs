use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use crypto_core::jwt;
use identity_service::forward::{ContentForwarder, Forwarder, ReactionForwarder};
use identity_service::middleware::JwtAuthMiddleware;
use identity_service::services::{FriendRequestService, UserService};
use identity_service::{forward, handlers};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "identity-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "identity-service"
        })),
    }
}

/// Identity Service
///
/// The internet-facing edge of the deployment. Owns users and friend
/// requests, issues bearer tokens, and acts as the identity propagation
/// gateway: it decodes each token once and forwards requests to
/// content- and reaction-service with trusted internal headers.
///
/// # Routes
///
/// - `/api/v1/auth/*` - register, login
/// - `/api/v1/users/*`, `/api/v1/friend-requests/*` - identity API
/// - `/api/v1/gw/*` - forwards to the internal services
/// - `/internal/admin/users/*` - block/unblock, called by the orchestrator
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

    let config = match identity_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting identity-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Fail fast on a broken secret; the keys are immutable afterwards.
    match std::env::var(jwt::JWT_SECRET_ENV) {
        Ok(secret) => {
            if let Err(err) = jwt::initialize_keys(&secret) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize JWT keys: {err}"),
                ));
            }
        }
        Err(_) => {
            tracing::warn!(
                "{} not configured; token issuance will fail requests",
                jwt::JWT_SECRET_ENV
            );
        }
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

    let users = UserService::new(db_pool.clone());
    let friend_requests = FriendRequestService::new(db_pool.clone(), users.clone());
    let content_fwd =
        ContentForwarder(Forwarder::new(http.clone(), config.peers.content_service_url.clone()));
    let reaction_fwd =
        ReactionForwarder(Forwarder::new(http, config.peers.reaction_service_url.clone()));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let users_data = web::Data::new(users);
    let friend_requests_data = web::Data::new(friend_requests);
    let content_fwd_data = web::Data::new(content_fwd);
    let reaction_fwd_data = web::Data::new(reaction_fwd);
    let pool_data = web::Data::new(db_pool);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(users_data.clone())
            .app_data(friend_requests_data.clone())
            .app_data(content_fwd_data.clone())
            .app_data(reaction_fwd_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .service(
                web::scope("/api/v1/auth")
                    .route("/register", web::post().to(handlers::auth::register))
                    .route("/login", web::post().to(handlers::auth::login)),
            )
            // Called by the admin orchestrator with the relayed token
            .service(
                web::scope("/internal/admin/users")
                    .route("/{user_id}/block", web::post().to(handlers::admin::block_user))
                    .route(
                        "/{user_id}/unblock",
                        web::post().to(handlers::admin::unblock_user),
                    ),
            )
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware)
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(handlers::users::list_users))
                            .route("/me", web::get().to(handlers::users::get_me))
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(handlers::users::get_user))
                                    .route(web::put().to(handlers::users::update_profile)),
                            ),
                    )
                    .service(
                        web::scope("/friend-requests")
                            .route("", web::post().to(handlers::friend_requests::send))
                            .route(
                                "/pending",
                                web::get().to(handlers::friend_requests::pending),
                            )
                            .route("/sent", web::get().to(handlers::friend_requests::sent))
                            .route(
                                "/{request_id}/accept",
                                web::post().to(handlers::friend_requests::accept),
                            )
                            .route(
                                "/{request_id}/decline",
                                web::post().to(handlers::friend_requests::decline),
                            ),
                    )
                    .service(
                        web::scope("/gw")
                            .service(
                                web::scope("/posts")
                                    .service(
                                        web::resource("")
                                            .route(web::get().to(forward::posts::list_posts))
                                            .route(web::post().to(forward::posts::create_post)),
                                    )
                                    .route("/top", web::get().to(forward::posts::list_top_posts))
                                    .route("/search", web::get().to(forward::posts::search_posts))
                                    .route(
                                        "/hashtag/{tag}",
                                        web::get().to(forward::posts::get_posts_by_hashtag),
                                    )
                                    .route(
                                        "/user/{user_id}",
                                        web::get().to(forward::posts::get_user_posts),
                                    )
                                    .service(
                                        web::resource("/{post_id}")
                                            .route(web::get().to(forward::posts::get_post))
                                            .route(web::put().to(forward::posts::update_post))
                                            .route(web::delete().to(forward::posts::delete_post)),
                                    )
                                    .service(
                                        web::resource("/{post_id}/comments")
                                            .route(web::get().to(forward::posts::get_post_comments))
                                            .route(web::post().to(forward::posts::create_comment)),
                                    ),
                            )
                            .service(
                                web::scope("/comments").service(
                                    web::resource("/{comment_id}")
                                        .route(web::put().to(forward::comments::update_comment))
                                        .route(
                                            web::delete().to(forward::comments::delete_comment),
                                        ),
                                ),
                            )
                            .service(
                                web::scope("/reactions")
                                    .service(
                                        web::resource("")
                                            .route(web::post().to(forward::reactions::apply_reaction))
                                            .route(
                                                web::delete()
                                                    .to(forward::reactions::remove_reaction),
                                            ),
                                    )
                                    .route(
                                        "/target/{target_type}/{target_id}",
                                        web::get().to(forward::reactions::get_reactions_for_target),
                                    )
                                    .route(
                                        "/target/{target_type}/{target_id}/count",
                                        web::get()
                                            .to(forward::reactions::get_reaction_count_for_target),
                                    ),
                            )
                            .service(
                                web::scope("/admin")
                                    .route(
                                        "/posts/{post_id}",
                                        web::delete().to(forward::admin::delete_post),
                                    )
                                    .route(
                                        "/comments/{comment_id}",
                                        web::delete().to(forward::admin::delete_comment),
                                    )
                                    .route(
                                        "/users/{user_id}/block",
                                        web::post().to(forward::admin::block_user),
                                    )
                                    .route(
                                        "/users/{user_id}/unblock",
                                        web::post().to(forward::admin::unblock_user),
                                    ),
                            ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
