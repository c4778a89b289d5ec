use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, SendFriendRequestRequest};
use uuid::Uuid;

use crate::models::AppState;
use crate::services::friends as friend_service;
use crate::services::friends::FriendError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/friends")
            .route("", web::get().to(list_friends))
            .route("/requests", web::get().to(list_incoming))
            .route("/requests/sent", web::get().to(list_outgoing))
            .route("/requests", web::post().to(send_request))
            .route("/requests/{id}/accept", web::post().to(accept_request))
            .route("/requests/{id}", web::delete().to(decline_request)),
    );
}

async fn list_friends(
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

    match friend_service::list_friends(&state.db, &user_id).await {
        Ok(friends) => Ok(HttpResponse::Ok().json(ApiSuccess::new(friends))),
        Err(e) => {
            log::error!("Error listing friends: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list friends".to_string(),
            }))
        }
    }
}

async fn list_incoming(
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

    match friend_service::list_incoming_requests(&state.db, &user_id).await {
        Ok(requests) => Ok(HttpResponse::Ok().json(ApiSuccess::new(requests))),
        Err(e) => {
            log::error!("Error listing incoming friend requests: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list friend requests".to_string(),
            }))
        }
    }
}

async fn list_outgoing(
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

    match friend_service::list_outgoing_requests(&state.db, &user_id).await {
        Ok(requests) => Ok(HttpResponse::Ok().json(ApiSuccess::new(requests))),
        Err(e) => {
            log::error!("Error listing outgoing friend requests: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list friend requests".to_string(),
            }))
        }
    }
}

async fn send_request(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<SendFriendRequestRequest>,
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

    let request = body.into_inner();
    let username = request.username.trim();
    if username.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Username is required".to_string(),
        }));
    }

    match friend_service::send_friend_request(&state.db, &user_id, username).await {
        Ok(request) => Ok(HttpResponse::Created().json(ApiSuccess::new(request))),
        Err(e @ (FriendError::UserNotFound | FriendError::SelfRequest)) => {
            Ok(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_target".to_string(),
                message: e.to_string(),
            }))
        }
        Err(e @ (FriendError::AlreadyRequested | FriendError::AlreadyFriends)) => {
            Ok(HttpResponse::Conflict().json(ApiError {
                error: "duplicate_request".to_string(),
                message: e.to_string(),
            }))
        }
        Err(e) => {
            log::error!("Error sending friend request: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to send friend request".to_string(),
            }))
        }
    }
}

async fn accept_request(
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

    let request_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_id".to_string(),
                message: "Invalid request ID format".to_string(),
            }));
        }
    };

    match friend_service::accept_friend_request(&state.db, &request_id, &user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiSuccess::new("accepted"))),
        Err(FriendError::NotFound) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Friend request not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error accepting friend request: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to accept friend request".to_string(),
            }))
        }
    }
}

async fn decline_request(
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

    let request_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_id".to_string(),
                message: "Invalid request ID format".to_string(),
            }));
        }
    };

    match friend_service::decline_friend_request(&state.db, &request_id, &user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiSuccess::new("declined"))),
        Err(e) => {
            log::error!("Error declining friend request: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to decline friend request".to_string(),
            }))
        }
    }
}
