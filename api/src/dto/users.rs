use serde::{Deserialize, Serialize};
use validator::Validate;

use chrono::{DateTime, Utc};

/// Fields are optional so that a missing value reaches the service and is
/// reported as a required field rather than a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNameRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitiateEmailChangeRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub new_email: Option<String>,
    /// Must match the authenticated user
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailChangeRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub new_email: Option<String>,
    #[serde(default)]
    pub verification_code: Option<String>,
    /// Must match the authenticated user
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResendMaterialRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub material_name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub purchase_date: Option<String>,
}

/// Profile as shown to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Absolute URL of the profile image
    pub avatar_url: Option<String>,
    #[serde(rename = "authProvider")]
    pub auth_provider: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNameResponse {
    pub success: bool,
    pub user: NamedUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub success: bool,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailChangeInitiatedResponse {
    pub success: bool,
    pub message: String,
    /// Address the code was sent to
    pub email: String,
    pub current_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedEmailUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailChangedResponse {
    pub success: bool,
    pub message: String,
    pub user: ChangedEmailUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeResentResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}
