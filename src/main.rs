use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uni_predict::config::{LoggingSettings, Settings};
use uni_predict::core::Predictor;
use uni_predict::models::ScoringBands;
use uni_predict::routes::{self, AppState};
use uni_predict::services::{AdminAuth, InMemoryStore};

const DEFAULT_MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

/// Install the global subscriber; RUST_LOG overrides the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

/// `uni-predict hash-password`: read a password from stdin, print its Argon2 PHC string
fn print_password_hash() -> std::io::Result<()> {
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    let password = password.trim_end_matches(&['\r', '\n'][..]);
    if password.is_empty() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty password"));
    }

    let hash = AdminAuth::hash_password(password)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    println!("{}", hash);
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return print_password_hash();
    }

    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => {
            init_logging(&settings.logging);
            settings
        }
        Err(e) => {
            init_logging(&LoggingSettings::default());
            return Err(startup_error("Failed to load configuration", e));
        }
    };

    info!("Starting Uni Predict service...");

    let store = InMemoryStore::from_files(
        settings.data.students_path.as_deref(),
        settings.data.universities_path.as_deref(),
    )
    .map_err(|e| startup_error("Failed to load records", e))?;

    let auth = AdminAuth::new(&settings.admin)
        .map_err(|e| startup_error("Invalid admin credentials", e))?;

    info!("Admin authentication configured for {}", settings.admin.email);

    let bands = ScoringBands::from(&settings.scoring.bands);
    let predictor = Predictor::new(bands);

    info!("Predictor initialized with bands: {:?}", bands);

    let app_state = AppState {
        store: Arc::new(store),
        auth: Arc::new(auth),
        predictor,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let max_import_bytes = settings.server.max_import_bytes.unwrap_or(DEFAULT_MAX_IMPORT_BYTES);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .app_data(web::PayloadConfig::new(max_import_bytes))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
