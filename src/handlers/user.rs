use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::admin::users::UsersView;
use crate::dtos::user::UserForm;
use crate::error::AppError;
use crate::middleware::auth::AdminContext;
use crate::models::user::User;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let view = UsersView::load(state.api.as_ref()).await?;
    Ok(Json(view.users().to_vec()))
}

#[instrument(skip(state))]
pub async fn get_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<UserForm>, AppError> {
    let user = state.api.get_user(id).await?;
    Ok(Json(UserForm::prefill(&user)))
}

#[instrument(skip(state, admin, form))]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    Json(form): Json<UserForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    form.validate_new()?;
    state.api.register_user(&form).await?;
    info!(admin = %admin.email, email = %form.correo, "User registered");
    Ok((StatusCode::CREATED, Json(json!({ "message": "Usuario registrado correctamente" }))))
}

#[instrument(skip(state, admin, form))]
pub async fn update_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    Json(form): Json<UserForm>,
) -> Result<Json<Value>, AppError> {
    form.validate_edit()?;
    state.api.update_user(id, &form).await?;
    info!(admin = %admin.email, "User updated");
    Ok(Json(json!({ "message": "Usuario actualizado correctamente" })))
}

// Returns the list with the row removed locally
#[instrument(skip(state, admin))]
pub async fn delete_user(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<Json<Vec<User>>, AppError> {
    let mut view = UsersView::load(state.api.as_ref()).await?;
    view.delete(state.api.as_ref(), id).await?;
    info!(admin = %admin.email, "User removed");
    Ok(Json(view.users().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::test_support::MockStore;

    fn admin() -> Extension<AdminContext> {
        Extension(AdminContext { email: "admin@minimarket.ec".into() })
    }

    fn rosa() -> User {
        User { id: 3, name: "Rosa".into(), email: "rosa@minimarket.ec".into() }
    }

    #[tokio::test]
    async fn create_user_relays_full_form() {
        let api = Arc::new(MockStore::default());
        let state = AppState::new(api.clone(), &Config::for_tests());
        let form = UserForm {
            nombre: "Luis".into(),
            correo: "luis@minimarket.ec".into(),
            password: "secreto".into(),
        };

        let (status, _) = create_user(State(state), admin(), Json(form.clone())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(api.saved_users(), vec![form]);
    }

    #[tokio::test]
    async fn create_user_without_password_is_rejected_locally() {
        let api = Arc::new(MockStore::default());
        let state = AppState::new(api.clone(), &Config::for_tests());
        let form = UserForm { nombre: "Luis".into(), correo: "luis@minimarket.ec".into(), password: String::new() };

        let err = create_user(State(state), admin(), Json(form)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(api.saved_users().is_empty());
    }

    #[tokio::test]
    async fn update_user_without_password_omits_it() {
        let api = Arc::new(MockStore::with_users(vec![rosa()]));
        let state = AppState::new(api.clone(), &Config::for_tests());
        let form = UserForm::prefill(&rosa());

        update_user(Path(3), State(state), admin(), Json(form)).await.unwrap();
        let saved = api.saved_users();
        assert_eq!(saved.len(), 1);
        let body = serde_json::to_value(&saved[0]).unwrap();
        assert_eq!(body["correo"], "rosa@minimarket.ec");
        assert!(body.get("contraseña").is_none());
    }

    #[tokio::test]
    async fn update_of_missing_user_is_not_found() {
        let api = Arc::new(MockStore::default());
        let state = AppState::new(api.clone(), &Config::for_tests());
        let err = update_user(Path(9), State(state), admin(), Json(UserForm::prefill(&rosa())))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
