use actix_web::{web, HttpResponse, Result};
use shared::{ApiError, ApiSuccess, AuthResponse, CreateUserRequest, LoginRequest, UpdateProfileRequest};

use crate::models::AppState;
use crate::services::auth as auth_service;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(get_current_user))
            .route("/me", web::put().to(update_profile)),
    );
}

async fn register(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.username.trim().is_empty() || request.email.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Username and email are required".to_string(),
        }));
    }

    if request.password.len() < 8 {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Password must be at least 8 characters".to_string(),
        }));
    }

    match auth_service::register_user(&state.db, &request).await {
        Ok(user) => {
            match auth_service::create_jwt(
                &user.id,
                &state.config.jwt_secret,
                state.config.jwt_expiration_hours,
            ) {
                Ok(token) => Ok(HttpResponse::Created()
                    .json(ApiSuccess::new(AuthResponse { token, user }))),
                Err(e) => {
                    log::error!("JWT creation error: {:?}", e);
                    Ok(HttpResponse::InternalServerError().json(ApiError {
                        error: "jwt_error".to_string(),
                        message: "Failed to create token".to_string(),
                    }))
                }
            }
        }
        Err(e) => {
            log::error!("Registration error: {:?}", e);
            Ok(HttpResponse::BadRequest().json(ApiError {
                error: "registration_error".to_string(),
                message: e.to_string(),
            }))
        }
    }
}

async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    if !state.login_rate_limiter.check(&request.username) {
        return Ok(HttpResponse::TooManyRequests().json(ApiError {
            error: "rate_limited".to_string(),
            message: "Too many login attempts, try again later".to_string(),
        }));
    }

    match auth_service::login_user(&state.db, &request).await {
        Ok(user) => {
            state.login_rate_limiter.clear(&request.username);
            match auth_service::create_jwt(
                &user.id,
                &state.config.jwt_secret,
                state.config.jwt_expiration_hours,
            ) {
                Ok(token) => {
                    Ok(HttpResponse::Ok().json(ApiSuccess::new(AuthResponse { token, user })))
                }
                Err(e) => {
                    log::error!("JWT creation error: {:?}", e);
                    Ok(HttpResponse::InternalServerError().json(ApiError {
                        error: "jwt_error".to_string(),
                        message: "Failed to create token".to_string(),
                    }))
                }
            }
        }
        Err(e) => {
            log::error!("Login error: {:?}", e);
            state.login_rate_limiter.record(&request.username);
            Ok(HttpResponse::Unauthorized().json(ApiError {
                error: "authentication_error".to_string(),
                message: "Invalid username or password".to_string(),
            }))
        }
    }
}

async fn get_current_user(
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

    match auth_service::get_user_by_id(&state.db, &user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiSuccess::new(user))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: "User not found".to_string(),
        })),
        Err(e) => {
            log::error!("Error fetching user: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to fetch user".to_string(),
            }))
        }
    }
}

async fn update_profile(
    state: web::Data<AppState>,
    req: actix_web::HttpRequest,
    body: web::Json<UpdateProfileRequest>,
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

    if let Some(ref username) = request.username {
        if username.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiError {
                error: "validation_error".to_string(),
                message: "Username must not be empty".to_string(),
            }));
        }
    }

    match auth_service::update_profile(&state.db, &user_id, &request).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiSuccess::new(user))),
        Err(auth_service::AuthError::UserAlreadyExists) => {
            Ok(HttpResponse::Conflict().json(ApiError {
                error: "username_taken".to_string(),
                message: "That username is already taken".to_string(),
            }))
        }
        Err(e) => {
            log::error!("Error updating profile: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Failed to update profile".to_string(),
            }))
        }
    }
}
