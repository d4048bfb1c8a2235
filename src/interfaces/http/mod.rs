pub mod auth;
mod upload;

use actix_cors::Cors;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::application::{BulkUploadUseCase, TemplateUseCase};
use crate::domain::error::AppError;
use crate::infrastructure::db::UserRepository;

pub struct HttpState {
    pub bulk_upload: BulkUploadUseCase,
    pub templates: TemplateUseCase,
    pub users: UserRepository,
    pub pool: SqlitePool,
    pub max_upload_bytes: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Map a pipeline error to its HTTP response. Only batch-setup failures
/// reach this; per-row failures are reported inside the 200 body.
pub(crate) fn error_response(err: &AppError) -> HttpResponse {
    let (error, details) = match err {
        AppError::DecodeError(msg) => ("unable to decode spreadsheet", Some(msg.clone())),
        AppError::SchemaError(columns) => ("missing required columns", Some(columns.join(", "))),
        AppError::EmptyBatch => ("spreadsheet contains no data rows", None),
        AppError::ValidationError(msg) => ("invalid request", Some(msg.clone())),
        AppError::NotFound(msg) => ("not found", Some(msg.clone())),
        AppError::Unauthorized(msg) => ("unauthorized", Some(msg.clone())),
        AppError::Forbidden(msg) => ("forbidden", Some(msg.clone())),
        other => ("internal server error", Some(other.to_string())),
    };
    let body = ErrorBody {
        error: error.to_string(),
        details,
    };

    match err {
        AppError::DecodeError(_)
        | AppError::SchemaError(_)
        | AppError::EmptyBatch
        | AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
        AppError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/health")]
async fn health(data: web::Data<HttpState>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(&data.pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => error_response(&AppError::DatabaseError(e.to_string())),
    }
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(upload::upload_students)
                .service(upload::upload_colleges)
                .service(upload::student_template)
                .service(upload::college_template)
                .service(health),
        )
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
