//! Credential check and user management.
//!
//! Credentials are compared as stored; there are no sessions or tokens.

use validator::Validate;

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::user::{
    CreateUser, LoginRequest, LoginResponse, UserFilter, UserResponse, UserRole,
};
use crate::store::RecordStore;

/// Check credentials against the built-in account, then against stored users.
pub async fn login(
    store: &dyn RecordStore,
    config: &AppConfig,
    request: &LoginRequest,
) -> AppResult<LoginResponse> {
    if let Some(response) = builtin_login(config, request) {
        tracing::info!(email = %request.email, role = ?response.role, "Built-in account login");
        return Ok(response);
    }

    let user = store
        .find_one_user(
            &UserFilter::default()
                .email(&request.email)
                .password(&request.password),
        )
        .await?
        .ok_or_else(|| {
            tracing::warn!(email = %request.email, "Login rejected");
            AppError::Unauthorized
        })?;

    Ok(LoginResponse {
        role: user.role,
        email: user.email,
        name: user.name,
    })
}

/// The built-in account accepts either the admin or the shared user password.
fn builtin_login(config: &AppConfig, request: &LoginRequest) -> Option<LoginResponse> {
    if request.email != config.admin_email {
        return None;
    }
    let (role, name) = if config.admin_password.as_deref() == Some(request.password.as_str()) {
        (UserRole::Admin, "Administrador")
    } else if config.shared_user_password.as_deref() == Some(request.password.as_str()) {
        (UserRole::User, "Usuario")
    } else {
        return None;
    };
    Some(LoginResponse {
        role,
        email: request.email.clone(),
        name: name.to_string(),
    })
}

pub async fn create_user(store: &dyn RecordStore, input: CreateUser) -> AppResult<UserResponse> {
    input.validate()?;

    let existing = store
        .find_one_user(&UserFilter::default().email(&input.email))
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "User with email '{}' already exists",
            input.email
        )));
    }

    let user = input.into_user();
    store.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "Created user");
    Ok(user.into())
}

pub async fn list_users(store: &dyn RecordStore) -> AppResult<Vec<UserResponse>> {
    let users = store.find_users(&UserFilter::default()).await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn delete_user(store: &dyn RecordStore, id: &str) -> AppResult<()> {
    if !store.delete_user(id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    tracing::info!(user_id = %id, "Deleted user");
    Ok(())
}
