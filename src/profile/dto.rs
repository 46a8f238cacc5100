use serde::{Deserialize, Serialize};

use crate::profile::repo::LearnerProfile;

/// `skills` as submitted by the profile builder: either a proper list or a
/// single comma-separated string (older clients).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

impl SkillsInput {
    /// Normalize to a trimmed list with empty entries removed.
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            SkillsInput::List(items) => items,
            SkillsInput::Csv(s) => s.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub skills: SkillsInput,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub preferences: String,
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub phone: String,
    pub location: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub preferences: String,
}

impl From<LearnerProfile> for ProfileBody {
    fn from(p: LearnerProfile) -> Self {
        Self {
            phone: p.phone,
            location: p.location,
            education: p.education,
            skills: p.skills,
            experience: p.experience,
            preferences: p.preferences,
        }
    }
}

/// `status` is "success" when a profile exists, "empty" when it does not; the
/// builder starts fresh on "empty" but still applies `language`.
#[derive(Debug, Serialize)]
pub struct LoadProfileResponse {
    pub status: &'static str,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileBody>,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}
