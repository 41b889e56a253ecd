use sqlx::PgPool;

use crate::auth;
use crate::db::user_queries;
use crate::errors::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterUser};

pub async fn register(pool: &PgPool, data: RegisterUser) -> Result<AuthResponse, AppError> {
    let email = data.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Invalid email".to_string()));
    }
    if data.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if user_queries::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&data.password).map_err(AppError::Validation)?;
    let user = user_queries::insert(pool, &email, &password_hash).await?;

    let token = auth::create_jwt(user.id).map_err(AppError::Validation)?;
    Ok(AuthResponse {
        token,
        user_id: user.id,
        email: user.email,
    })
}

pub async fn login(pool: &PgPool, data: LoginRequest) -> Result<AuthResponse, AppError> {
    let email = data.email.trim().to_lowercase();

    let user = user_queries::find_by_email(pool, &email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid =
        auth::verify_password(&data.password, &user.password_hash).unwrap_or(false);
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = auth::create_jwt(user.id).map_err(AppError::Validation)?;
    Ok(AuthResponse {
        token,
        user_id: user.id,
        email: user.email,
    })
}
