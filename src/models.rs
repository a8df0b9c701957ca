//! Wire types for the visitor/contractor management backends.
//!
//! Every entity here is a plain data record exchanged as JSON with the remote
//! APIs; the client holds no authoritative state. Field names follow the
//! backend's camelCase/`_id` conventions via serde renames. Request payloads
//! carry `validator` derives so client-side preconditions fail before any
//! network call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Auth / session
// ---------------------------------------------------------------------------

/// Login request payload.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    pub role: Role,
}

/// Application roles for authorization decisions.
///
/// Serialized to lowercase strings in JSON (`Admin` → `"admin"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Receptionist,
    Security,
    Employee,
}

impl From<&str> for Role {
    /// Defaults to the least privileged role for unrecognized strings.
    fn from(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "receptionist" => Self::Receptionist,
            "security" => Self::Security,
            _ => Self::Employee,
        }
    }
}

/// Successful login/registration response from the primary API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Bearer token for subsequent authenticated calls
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticated user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Client-held session: tokens plus the user they belong to.
///
/// Persisted by the caller under the fixed storage keys in
/// [`crate::session`]; the client layer itself never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Token refresh response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 64))]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, max = 64))]
    pub current_password: String,
    #[validate(length(min = 8, max = 64))]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Visitors
// ---------------------------------------------------------------------------

/// One-directional visitor lifecycle.
///
/// pending → approved → checked-in → checked-out, with cancellation reachable
/// from pending or approved only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VisitorStatus {
    Pending,
    Approved,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl VisitorStatus {
    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// The backend owns the transition; this check lets the client reject an
    /// impossible request (e.g. approving a checked-out visitor) locally.
    pub fn can_transition_to(self, next: VisitorStatus) -> bool {
        use VisitorStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Cancelled)
                | (Approved, CheckedIn)
                | (Approved, Cancelled)
                | (CheckedIn, CheckedOut)
        )
    }

    /// Lowercase wire name, for query parameters and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            VisitorStatus::Pending => "pending",
            VisitorStatus::Approved => "approved",
            VisitorStatus::CheckedIn => "checked-in",
            VisitorStatus::CheckedOut => "checked-out",
            VisitorStatus::Cancelled => "cancelled",
        }
    }
}

/// Discriminator between a plain visitor and a contractor, which carries
/// additional hazard/PPE data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VisitorCategory {
    Visitor,
    Contractor,
}

impl VisitorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VisitorCategory::Visitor => "visitor",
            VisitorCategory::Contractor => "contractor",
        }
    }
}

/// PPE requirements recorded for contractors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpeRequirements {
    #[serde(default)]
    pub hard_hat: bool,
    #[serde(default)]
    pub safety_glasses: bool,
    #[serde(default)]
    pub high_vis_vest: bool,
    #[serde(default)]
    pub safety_boots: bool,
    #[serde(default)]
    pub gloves: bool,
}

/// A scheduled visitor or contractor as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub purpose: String,
    pub host_employee: String,
    pub department: String,
    #[serde(default)]
    pub meeting_location: Option<String>,
    #[serde(default)]
    pub site_location: Option<String>,
    pub visit_start_date: DateTime<Utc>,
    pub visit_end_date: DateTime<Utc>,
    pub status: VisitorStatus,
    pub category: VisitorCategory,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub training_completed: Option<bool>,
    /// Contractor-only hazard list
    #[serde(default)]
    pub hazards: Option<Vec<String>>,
    /// Contractor-only PPE requirements
    #[serde(default)]
    pub ppe: Option<PpeRequirements>,
    #[serde(default)]
    pub documents: Option<Vec<Document>>,
}

/// Payload for scheduling a visit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitorForm {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    #[validate(length(min = 1, max = 256))]
    pub purpose: String,
    #[validate(length(min = 1, max = 128))]
    pub host_employee: String,
    #[validate(length(min = 1, max = 128))]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_location: Option<String>,
    pub visit_start_date: DateTime<Utc>,
    pub visit_end_date: DateTime<Utc>,
    pub category: VisitorCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazards: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppe: Option<PpeRequirements>,
}

/// Optional filters for visitor listings.
///
/// Absent fields are omitted from the query string entirely; the builder
/// never emits empty or placeholder values.
#[derive(Debug, Clone, Default)]
pub struct VisitorFilters {
    pub status: Option<VisitorStatus>,
    pub category: Option<VisitorCategory>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrainingType {
    Safety,
    Security,
    Procedure,
    Other,
}

/// One multiple-choice question with exactly four options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub correct_answer: usize,
}

/// Named external resource attached to a training (video or document).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    pub name: String,
    pub url: String,
}

/// A training course with quiz content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    /// HTML course content
    pub content: String,
    pub questions: Vec<TrainingQuestion>,
    #[serde(default)]
    pub videos: Vec<MediaRef>,
    #[serde(default)]
    pub books: Vec<MediaRef>,
    /// Minimum passing score, integer in [0, 100]
    pub required_score: u32,
    pub is_active: bool,
}

/// Payload for creating or updating a training.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainingForm {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TrainingType,
    pub content: String,
    pub questions: Vec<TrainingQuestion>,
    #[serde(default)]
    pub videos: Vec<MediaRef>,
    #[serde(default)]
    pub books: Vec<MediaRef>,
    #[validate(range(min = 0, max = 100))]
    pub required_score: u32,
    pub is_active: bool,
}

/// Quiz submission: selected option index per question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSubmission {
    pub answers: Vec<usize>,
}

/// Server-side scoring result. `passed` is derived by the backend and never
/// settable by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// Integer in [0, 100]
    pub score: u32,
    pub passed: bool,
    pub completion: TrainingCompletion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingCompletion {
    pub training_id: String,
    pub visitor_id: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStatus {
    pub enrolled: bool,
    pub completed: bool,
    #[serde(default)]
    pub score: Option<u32>,
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Id,
    Nda,
    Training,
    Other,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Id => "id",
            DocumentType::Nda => "nda",
            DocumentType::Training => "training",
            DocumentType::Other => "other",
        }
    }
}

/// An uploaded document. Always belongs to exactly one visitor; `visitor_id`
/// is immutable after upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub file_type: String,
    /// Size in bytes
    pub file_size: u64,
    pub visitor_id: String,
    pub document_type: DocumentType,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub site_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLocation {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub site_id: String,
}

/// Per-site configuration toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub visitor_enabled: bool,
    pub contractor_enabled: bool,
    pub require_approval: bool,
    pub auto_approve_visitors: bool,
    pub auto_approve_contractors: bool,
    pub email_notifications_enabled: bool,
    #[serde(default)]
    pub notification_emails: Vec<String>,
}

/// Process-wide admin-configurable flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub visitor_photo_required: bool,
    pub training_required: bool,
    pub qr_code_expiry_hours: u32,
    pub system_version: String,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    pub role: Role,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One audit trail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Optional filters for the audit-log query.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub user: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub key: String,
    pub product: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Closed set of lifecycle events that produce notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    VisitorScheduled,
    VisitorApproved,
    VisitorRejected,
    VisitorCheckedIn,
    VisitorCheckedOut,
    VisitorCancelled,
    TrainingCompleted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub recipient: String,
    pub status: NotificationStatus,
    pub timestamp: DateTime<Utc>,
}

/// Boolean toggles keyed by notification type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationSettings(pub BTreeMap<String, bool>);

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// QR code issued for a scheduled visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub visitor_id: String,
    /// Payload encoded into the printable code
    pub qr_code: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}
