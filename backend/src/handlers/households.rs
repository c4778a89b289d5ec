use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, CreateHouseholdRequest, CreateInviteRequest};
use uuid::Uuid;

use crate::handlers::chores;
use crate::models::AppState;
use crate::services::households as household_service;
use crate::services::invites as invite_service;
use crate::services::invites::InviteError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/households")
            .route("", web::get().to(list_households))
            .route("", web::post().to(create_household))
            .route("/{id}", web::get().to(get_household))
            .route("/{id}/members", web::get().to(list_members))
            .route("/{id}/leaderboard", web::get().to(get_leaderboard))
            .route("/{id}/inviteable-friends", web::get().to(inviteable_friends))
            .route("/{id}/invites", web::post().to(invite_member))
            .service(web::scope("/{household_id}").configure(chores::configure)),
    );
}

/// Shared preamble for household-scoped routes: authenticate, parse the id,
/// and require membership.
pub async fn authorize_member(
    state: &web::Data<AppState>,
    req: &actix_web::HttpRequest,
    raw_id: &str,
) -> std::result::Result<(Uuid, Uuid), HttpResponse> {
    let user_id = match crate::middleware::auth::extract_user_id(req, &state.config.jwt_secret) {
        Ok(id) => id,
        Err(_) => {
            return Err(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    let household_id = match Uuid::parse_str(raw_id) {
        Ok(id) => id,
        Err(_) => {
            return Err(HttpResponse::BadRequest().json(ApiError {
                error: "invalid_id".to_string(),
                message: "Invalid household ID format".to_string(),
            }));
        }
    };

    if !household_service::is_member(&state.db, &household_id, &user_id)
        .await
        .unwrap_or(false)
    {
        return Err(HttpResponse::Forbidden().json(ApiError {
            error: "forbidden".to_string(),
            message: "You are not a member of this household".to_string(),
        }));
    }

    Ok((household_id, user_id))
}

async fn list_households(
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

    match household_service::list_user_households(&state.db, &user_id).await {
        Ok(households) => Ok(HttpResponse::Ok().json(ApiSuccess::new(households))),
        Err(e) => {
            log::error!("Error listing households: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list households".to_string(),
            }))
        }
    }
}

async fn create_household(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<CreateHouseholdRequest>,
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

    let mut request = body.into_inner();
    request.name = request.name.trim().to_string();
    if request.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Household name is required".to_string(),
        }));
    }

    match household_service::create_household(&state.db, &user_id, &request).await {
        Ok(household) => Ok(HttpResponse::Created().json(ApiSuccess::new(household))),
        Err(e) => {
            log::error!("Error creating household: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to create household".to_string(),
            }))
        }
    }
}

async fn get_household(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, _user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match household_service::get_household(&state.db, &household_id).await {
        Ok(Some(household)) => Ok(HttpResponse::Ok().json(ApiSuccess::new(household))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "Household not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error fetching household: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch household".to_string(),
            }))
        }
    }
}

async fn list_members(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, _user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match household_service::list_members(&state.db, &household_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiSuccess::new(members))),
        Err(e) => {
            log::error!("Error listing members: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list members".to_string(),
            }))
        }
    }
}

async fn get_leaderboard(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, _user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match household_service::get_leaderboard(&state.db, &household_id).await {
        Ok(leaderboard) => Ok(HttpResponse::Ok().json(ApiSuccess::new(leaderboard))),
        Err(e) => {
            log::error!("Error computing leaderboard: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to compute leaderboard".to_string(),
            }))
        }
    }
}

async fn inviteable_friends(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let (household_id, user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    match household_service::inviteable_friends(&state.db, &household_id, &user_id).await {
        Ok(friends) => Ok(HttpResponse::Ok().json(ApiSuccess::new(friends))),
        Err(e) => {
            log::error!("Error listing inviteable friends: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to list inviteable friends".to_string(),
            }))
        }
    }
}

async fn invite_member(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    path: web::Path<String>,
    body: web::Json<CreateInviteRequest>,
) -> Result<HttpResponse> {
    let (household_id, user_id) = match authorize_member(&state, &req, &path.into_inner()).await {
        Ok(ids) => ids,
        Err(response) => return Ok(response),
    };

    let request = body.into_inner();

    match invite_service::create_invite(&state.db, &household_id, &user_id, &request.invitee_id)
        .await
    {
        Ok(invite) => Ok(HttpResponse::Created().json(ApiSuccess::new(invite))),
        Err(e @ InviteError::NotFriends) => Ok(HttpResponse::BadRequest().json(ApiError {
            error: "not_friends".to_string(),
            message: e.to_string(),
        })),
        Err(e @ (InviteError::AlreadyInvited | InviteError::AlreadyMember)) => {
            Ok(HttpResponse::Conflict().json(ApiError {
                error: "duplicate_invite".to_string(),
                message: e.to_string(),
            }))
        }
        Err(e) => {
            log::error!("Error creating invite: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to create invite".to_string(),
            }))
        }
    }
}
