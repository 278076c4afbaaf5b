use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{
        dto::{ApiResponse, AuthData, LoginRequest, RegisterRequest, UserDetails, UserResponse},
        errors::AuthError,
        extractors::AuthUser,
        services::Authenticated,
        validation::{validate_login, validate_register},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me))
        .route("/users/:id", get(get_user))
}

fn auth_data(a: Authenticated) -> AuthData {
    AuthData {
        user: UserResponse::from(&a.user),
        token: a.token,
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), AuthError> {
    validate_register(&payload)?;

    let registered = state
        .auth
        .register(
            payload.email.trim(),
            &payload.password,
            &payload.first_name,
            &payload.last_name,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            "Registration Successful!",
            auth_data(registered),
        )),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AuthError> {
    validate_login(&payload)?;

    let signed_in = state
        .auth
        .sign_in(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "Logged In Successfully",
        auth_data(signed_in),
    )))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AuthError> {
    let user = state.auth.current_user(user_id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "User retrieved",
        UserResponse::from(&user),
    )))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserDetails>>, AuthError> {
    let details = state.auth.user_details(id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "User retrieved",
        details,
    )))
}
