use std::sync::Arc;

use tracing::info;

use rosterbridge::application::{BulkUploadUseCase, TemplateUseCase};
use rosterbridge::infrastructure::config::AppConfig;
use rosterbridge::infrastructure::db::{
    connection::init_db, CollegeRepository, StudentRepository, UserRepository,
};
use rosterbridge::infrastructure::security::PasswordHasher;
use rosterbridge::interfaces::http::{start_server, HttpState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load().expect("Failed to load configuration");

    let pool = init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    let students = Arc::new(StudentRepository::new(pool.clone()));
    let colleges = Arc::new(CollegeRepository::new(pool.clone()));
    let users = UserRepository::new(pool.clone());

    let bulk_upload = BulkUploadUseCase::new(
        students,
        colleges,
        PasswordHasher::new(config.bcrypt_cost),
    );

    let state = HttpState {
        bulk_upload,
        templates: TemplateUseCase::new(),
        users,
        pool,
        max_upload_bytes: config.max_upload_bytes,
    };

    info!(
        host = %config.host,
        port = config.port,
        "Starting rosterbridge HTTP server"
    );

    let server = start_server(state, &config.host, config.port)?;
    server.await
}
