use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One-to-one extension of a learner's user record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearnerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: String,
    pub location: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub preferences: String,
    pub updated_at: OffsetDateTime,
}

impl LearnerProfile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<LearnerProfile>> {
        let profile = sqlx::query_as::<_, LearnerProfile>(
            r#"
            SELECT id, user_id, phone, location, education, skills, experience, preferences, updated_at
            FROM learner_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Insert or update the profile for `user_id`.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        phone: &str,
        location: &str,
        education: &str,
        skills: &[String],
        experience: &str,
        preferences: &str,
    ) -> anyhow::Result<LearnerProfile> {
        let profile = sqlx::query_as::<_, LearnerProfile>(
            r#"
            INSERT INTO learner_profiles (user_id, phone, location, education, skills, experience, preferences)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                education = EXCLUDED.education,
                skills = EXCLUDED.skills,
                experience = EXCLUDED.experience,
                preferences = EXCLUDED.preferences,
                updated_at = now()
            RETURNING id, user_id, phone, location, education, skills, experience, preferences, updated_at
            "#,
        )
        .bind(user_id)
        .bind(phone)
        .bind(location)
        .bind(education)
        .bind(skills)
        .bind(experience)
        .bind(preferences)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }
}
