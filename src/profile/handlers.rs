use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{jwt::AuthUser, repo::{Role, User}},
    error::ApiError,
    faq,
    profile::{
        dto::{
            LoadProfileResponse, ProfileBody, SaveProfileRequest, SaveProfileResponse,
            SetLanguageRequest,
        },
        repo::LearnerProfile,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/save-profile", post(save_profile))
        .route("/load_profile", get(load_profile))
        .route("/set-language", post(set_language))
}

fn require_learner(user: &AuthUser) -> Result<(), ApiError> {
    if user.role != Role::Learner {
        warn!(user_id = %user.id, role = user.role.as_str(), "learner endpoint called by non-learner");
        return Err(ApiError::Forbidden("Learner account required".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveProfileRequest>,
) -> Result<Json<SaveProfileResponse>, ApiError> {
    require_learner(&user)?;

    let skills = payload.skills.into_list();
    let profile = match LearnerProfile::upsert(
        &state.db,
        user.id,
        payload.phone.trim(),
        payload.location.trim(),
        payload.education.trim(),
        &skills,
        payload.experience.trim(),
        payload.preferences.trim(),
    )
    .await
    {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "profile upsert failed");
            return Err(ApiError::Internal(e));
        }
    };

    info!(user_id = %user.id, profile_id = %profile.id, "profile saved");
    Ok(Json(SaveProfileResponse {
        status: "success",
        message: "Profile saved".into(),
    }))
}

#[instrument(skip(state))]
pub async fn load_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<LoadProfileResponse>, ApiError> {
    require_learner(&user)?;

    let language = User::find_by_id(&state.db, user.id)
        .await?
        .map(|u| u.preferred_language)
        .unwrap_or_else(|| state.config.default_language.clone());

    let profile = LearnerProfile::find_by_user(&state.db, user.id).await?;
    let (status, profile) = match profile {
        Some(p) => ("success", Some(ProfileBody::from(p))),
        None => ("empty", None),
    };

    Ok(Json(LoadProfileResponse {
        status,
        language,
        profile,
    }))
}

#[instrument(skip(state, payload))]
pub async fn set_language(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SetLanguageRequest>,
) -> Result<Json<SaveProfileResponse>, ApiError> {
    let language = payload.language.trim().to_lowercase();
    if !faq::is_supported_language(&language) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported language: {language}"
        )));
    }

    User::set_language(&state.db, user.id, &language).await?;
    info!(user_id = %user.id, %language, "language preference saved");
    Ok(Json(SaveProfileResponse {
        status: "success",
        message: "Language preference saved".into(),
    }))
}
