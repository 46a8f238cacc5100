use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::Role;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after signup, login or refresh. The frontend switches
/// dashboards on `role` and keys off `status`.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub message: String,
    pub role: Role,
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_role_lowercase() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: Role::Learner,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"learner\""));
        assert!(json.contains("asha@example.com"));
    }

    #[test]
    fn signup_role_defaults_to_learner() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name":"A","email":"a@example.com","password":"secret123"}"#,
        )
        .unwrap();
        assert_eq!(req.role, Role::Learner);
    }
}
