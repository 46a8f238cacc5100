use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};

use crate::{
    auth::{AuthUser, Role},
    state::AppState,
};

/// Page routes. Bodies are bare shells; the interesting part is the
/// role gating, which mirrors the JSON API's auth but redirects to the
/// auth page instead of returning an error envelope.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/auth", get(auth_page))
        .route("/forgot-password", get(forgot_password))
        .route("/learner-dashboard", get(learner_dashboard))
        .route("/learner-dashboard/profile-builder", get(profile_builder))
        .route("/career-explorer", get(career_explorer))
        .route("/recommendation-viewer", get(recommendation_viewer))
        .route("/admin-dashboard", get(admin_dashboard))
}

fn page(title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>{title} · CareerNav</title></head>\
         <body><h1>{title}</h1></body></html>"
    ))
}

fn gate(session: Option<AuthUser>, required: Role, title: &str) -> Response {
    match session {
        Some(user) if user.role == required => page(title).into_response(),
        _ => Redirect::temporary("/auth").into_response(),
    }
}

async fn home() -> Html<String> {
    page("Career Navigator")
}

async fn auth_page() -> Html<String> {
    page("Login & Signup")
}

async fn forgot_password() -> Html<String> {
    page("Forgot Password")
}

async fn learner_dashboard(session: Option<AuthUser>) -> Response {
    gate(session, Role::Learner, "Learner Dashboard")
}

async fn profile_builder(session: Option<AuthUser>) -> Response {
    gate(session, Role::Learner, "Profile Builder")
}

async fn career_explorer(session: Option<AuthUser>) -> Response {
    gate(session, Role::Learner, "Career Explorer")
}

async fn recommendation_viewer(session: Option<AuthUser>) -> Response {
    gate(session, Role::Learner, "Recommendation Viewer")
}

async fn admin_dashboard(session: Option<AuthUser>) -> Response {
    gate(session, Role::Admin, "Admin Panel")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn session(role: Role) -> Option<AuthUser> {
        Some(AuthUser {
            id: Uuid::new_v4(),
            role,
        })
    }

    #[test]
    fn anonymous_is_redirected_to_auth() {
        let response = gate(None, Role::Learner, "Learner Dashboard");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[test]
    fn wrong_role_is_redirected_to_auth() {
        let response = gate(session(Role::Learner), Role::Admin, "Admin Panel");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[test]
    fn matching_role_gets_the_page() {
        let response = gate(session(Role::Admin), Role::Admin, "Admin Panel");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
