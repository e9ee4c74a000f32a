use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::user::User;

/// Create/edit form for an administrative account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub nombre: String,
    pub correo: String,
    /// Left empty on edit to keep the current password.
    #[serde(rename = "contraseña", default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl UserForm {
    pub fn validate_new(&self) -> Result<(), AppError> {
        self.validate_common()?;
        if self.password.is_empty() {
            return Err(AppError::validation("Password required"));
        }
        Ok(())
    }

    pub fn validate_edit(&self) -> Result<(), AppError> {
        self.validate_common()
    }

    fn validate_common(&self) -> Result<(), AppError> {
        if self.nombre.trim().is_empty() {
            return Err(AppError::validation("Name required"));
        }
        let email = self.correo.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("Valid email required"));
        }
        Ok(())
    }

    /// Edit form pre-filled from the stored account; the password is never echoed back.
    pub fn prefill(user: &User) -> Self {
        Self {
            nombre: user.name.clone(),
            correo: user.email.clone(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub expires_in_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_may_omit_password() {
        let form = UserForm {
            nombre: "Rosa".into(),
            correo: "rosa@minimarket.ec".into(),
            password: String::new(),
        };
        assert!(form.validate_edit().is_ok());
        assert!(form.validate_new().is_err());
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("contraseña").is_none());
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let form = UserForm {
            nombre: "  ".into(),
            correo: "rosa@minimarket.ec".into(),
            password: "secreto".into(),
        };
        assert!(form.validate_new().is_err());
        let form = UserForm { nombre: "Rosa".into(), correo: "rosa".into(), password: "x".into() };
        assert!(form.validate_new().is_err());
    }
}
