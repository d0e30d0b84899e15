use actix_cors::Cors;
use actix_middleware::CorrelationIdMiddleware;
use actix_web::{middleware::Logger, web, App, HttpServer};
use crypto_core::jwt;
use mun_service::{db, routes};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// MUN Service
///
/// Conference portal backend.
///
/// # Routes
///
/// - `/api/v1/auth/login`, `/api/v1/me` - session
/// - `/api/v1/updates/*` - live crisis bulletins
/// - `/api/v1/messages/*` - committee inbox
/// - `/api/v1/resos/*`, `/api/v1/delegates/*` - resolutions and permissions
/// - `/api/v1/speeches/*` - speech repository
/// - `/api/v1/glossary` - procedure glossary
/// - `/api/v1/admin/accounts`, `/api/v1/committees` - administration
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = match mun_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.app.json_logs);

    tracing::info!("Starting mun-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let (private_pem, public_pem) = jwt::load_key_pair_from_env().map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("JWT keys not configured: {e}"),
        )
    })?;
    jwt::initialize_jwt_keys(&private_pem, &public_pem).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize JWT keys: {e}"),
        )
    })?;

    let db_pool = match db::init_pool(&config.database.url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        db::run_migrations(&db_pool)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migrations failed: {e}")))?;
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let messaging = web::Data::new(config.messaging.clone());
    let pool_data = web::Data::new(db_pool.clone());
    let cors_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors
            .allow_any_method()
            .allow_any_header()
            .expose_headers(vec!["x-poll-interval", "x-correlation-id"])
            .max_age(3600);

        App::new()
            .app_data(pool_data.clone())
            .app_data(messaging.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(CorrelationIdMiddleware)
            .configure(routes::configure_routes)
    })
    .bind(&bind_address)?
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            match result {
                Ok(result) => result?,
                Err(e) => tracing::error!("HTTP server task failed: {}", e),
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            if let Err(e) = server_task.await {
                tracing::error!("HTTP server task failed: {}", e);
            }
        }
    }

    db_pool.close().await;
    tracing::info!("mun-service shutting down");
    Ok(())
}
