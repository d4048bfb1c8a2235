use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::error;

use super::{error_response, HttpState};
use crate::domain::actor::Role;
use crate::domain::error::{AppError, Result};
use crate::domain::outcome::BatchReport;
use crate::domain::sheet::EntityKind;
use crate::interfaces::http::auth;

/// Multipart field carrying the spreadsheet.
const UPLOAD_FIELD: &str = "excelFile";

#[derive(Serialize)]
struct UploadResponse {
    message: String,
    #[serde(flatten)]
    report: BatchReport,
}

struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

#[post("/students/bulk-upload")]
pub async fn upload_students(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    run_upload(EntityKind::Student, &[Role::Faculty], data, req, payload).await
}

#[post("/colleges/bulk-upload")]
pub async fn upload_colleges(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: Multipart,
) -> impl Responder {
    run_upload(
        EntityKind::College,
        &[Role::Institute, Role::Admin],
        data,
        req,
        payload,
    )
    .await
}

#[get("/students/download-template")]
pub async fn student_template(data: web::Data<HttpState>) -> impl Responder {
    template_response(&data, EntityKind::Student)
}

#[get("/colleges/download-template")]
pub async fn college_template(data: web::Data<HttpState>) -> impl Responder {
    template_response(&data, EntityKind::College)
}

async fn run_upload(
    kind: EntityKind,
    allowed_roles: &[Role],
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: Multipart,
) -> HttpResponse {
    let actor = match auth::authenticate(&req, &data.users).await {
        Ok(actor) => actor,
        Err(e) => return error_response(&e),
    };
    if let Err(e) = auth::require_role(&actor, allowed_roles) {
        return error_response(&e);
    }

    let upload = match read_spreadsheet_field(payload, data.max_upload_bytes).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return error_response(&AppError::ValidationError(format!(
                "no spreadsheet uploaded (expected multipart field `{}`)",
                UPLOAD_FIELD
            )))
        }
        Err(e) => return error_response(&e),
    };

    match data
        .bulk_upload
        .run(kind, &actor, &upload.filename, &upload.bytes)
        .await
    {
        Ok(report) => HttpResponse::Ok().json(UploadResponse {
            message: format!(
                "Processed {} {} rows",
                report.summary.total,
                kind.label()
            ),
            report,
        }),
        Err(e) => {
            error!(kind = kind.label(), error = %e, "Bulk upload failed");
            error_response(&e)
        }
    }
}

/// Drain the multipart stream, keeping only the spreadsheet field. The
/// size cap is enforced while streaming so an oversized upload never lands
/// fully in memory.
async fn read_spreadsheet_field(mut payload: Multipart, limit: usize) -> Result<Option<UploadedFile>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("malformed multipart payload: {}", e)))?
    {
        if field.name() != UPLOAD_FIELD {
            while field
                .try_next()
                .await
                .map_err(|e| {
                    AppError::ValidationError(format!("malformed multipart payload: {}", e))
                })?
                .is_some()
            {}
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload.xlsx")
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| {
            AppError::ValidationError(format!("failed to read uploaded file: {}", e))
        })? {
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::ValidationError(format!(
                    "uploaded file exceeds the {} byte limit",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(UploadedFile { filename, bytes }));
    }

    Ok(None)
}

fn template_response(data: &web::Data<HttpState>, kind: EntityKind) -> HttpResponse {
    match data.templates.build(kind) {
        Ok(file) => HttpResponse::Ok()
            .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file.filename),
            ))
            .body(file.bytes),
        Err(e) => {
            error!(kind = kind.label(), error = %e, "Template build failed");
            error_response(&e)
        }
    }
}
