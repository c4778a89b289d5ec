use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess};
use uuid::Uuid;

use crate::models::AppState;
use crate::services::invites as invite_service;
use crate::services::invites::InviteError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invites")
            .route("", web::get().to(list_invites))
            .route("/{id}/accept", web::post().to(accept_invite))
            .route("/{id}/decline", web::post().to(decline_invite)),
    );
}

async fn list_invites(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
) -> Result<HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(&req, &state.config.jwt_secret) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    match invite_service::list_user_invites(&state.db, &user_id).await {
        Ok(invites) => Ok(HttpResponse::Ok().json(ApiSuccess::new(invites))),
        Err(e) => {
            log::error!("Error listing invites: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list invites".to_string(),
            }))
        }
    }
}

async fn accept_invite(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(&req, &state.config.jwt_secret) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    let invite_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_id".to_string(),
                message: "Invalid invite ID format".to_string(),
            }));
        }
    };

    match invite_service::accept_invite(&state.db, &invite_id, &user_id).await {
        Ok(membership) => Ok(HttpResponse::Ok().json(ApiSuccess::new(membership))),
        Err(InviteError::NotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Invite not found or already used".to_string(),
        })),
        Err(e @ InviteError::AlreadyMember) => Ok(HttpResponse::Conflict().json(ApiError {
            error: "already_member".to_string(),
            message: e.to_string(),
        })),
        Err(e) => {
            log::error!("Error accepting invite: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to accept invite".to_string(),
            }))
        }
    }
}

async fn decline_invite(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(&req, &state.config.jwt_secret) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    let invite_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_id".to_string(),
                message: "Invalid invite ID format".to_string(),
            }));
        }
    };

    match invite_service::decline_invite(&state.db, &invite_id, &user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiSuccess::new("declined"))),
        Err(e) => {
            log::error!("Error declining invite: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to decline invite".to_string(),
            }))
        }
    }
}
