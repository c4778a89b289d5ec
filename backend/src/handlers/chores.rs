use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, CreateChoreTemplateRequest, LogChoreRequest};

use crate::handlers::households::authorize_member;
use crate::models::AppState;
use crate::services::chores as chore_service;
use crate::services::chores::ChoreError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/templates", web::get().to(list_templates))
        .route("/templates", web::post().to(create_template))
        .route("/entries", web::get().to(list_entries))
        .route("/entries", web::post().to(log_entry));
}

async fn list_templates(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, _user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match chore_service::list_templates(&state.db, &household_id).await {
        Ok(templates) => Ok(HttpResponse::Ok().json(ApiSuccess::new(templates))),
        Err(e) => {
            log::error!("Error listing chore templates: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list chore templates".to_string(),
            }))
        }
    }
}

async fn create_template(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
    body: web::Json<CreateChoreTemplateRequest>,
) -> Result<HttpResponse> {
    let (household_id, user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    let request = body.into_inner();

    match chore_service::create_template(&state.db, &household_id, &user_id, &request).await {
        Ok(template) => Ok(HttpResponse::Created().json(ApiSuccess::new(template))),
        Err(ChoreError::PointsError(e)) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: e.to_string(),
        })),
        Err(e) => {
            log::error!("Error creating chore template: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to create chore template".to_string(),
            }))
        }
    }
}

async fn list_entries(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, _user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match chore_service::list_entries(&state.db, &household_id).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiSuccess::new(entries))),
        Err(e) => {
            log::error!("Error listing chore entries: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list chore entries".to_string(),
            }))
        }
    }
}

async fn log_entry(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
    body: web::Json<LogChoreRequest>,
) -> Result<HttpResponse> {
    let (household_id, user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    let request = body.into_inner();

    match chore_service::log_entry(&state.db, &household_id, &user_id, &request).await {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiSuccess::new(entry))),
        Err(ChoreError::TemplateNotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Chore template not found".to_string(),
        })),
        Err(e @ ChoreError::NotAMember) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "invalid_participant".to_string(),
            message: e.to_string(),
        })),
        Err(ChoreError::PointsError(e)) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: e.to_string(),
        })),
        Err(e) => {
            log::error!("Error logging chore entry: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to log chore entry".to_string(),
            }))
        }
    }
}
