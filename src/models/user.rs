use serde::{Deserialize, Serialize};

/// Administrative account as listed by the backend. The password is write-only and
/// never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
}
