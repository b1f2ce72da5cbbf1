use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Field names stay camelCase so the persisted layout matches the
// application's original localStorage layout.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            email,
            password,
            skills: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update applied over a stored [`User`]. Absent fields keep their
/// stored value; a present `skills` list replaces the stored list wholesale.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl UserUpdate {
    pub fn skills(skills: Vec<String>) -> Self {
        Self {
            skills: Some(skills),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Accepted => write!(f, "accepted"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnRequest {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub skill: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LearnRequest {
    pub fn new(from_user_id: String, to_user_id: String, skill: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            from_user_id,
            to_user_id,
            skill,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A pending request joined with its sender's record, for inbox views.
/// The sender reference can dangle, so the join side is optional.
#[derive(Clone, Debug)]
pub struct IncomingRequest {
    pub request: LearnRequest,
    pub from_user: Option<User>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub rater_user_id: String,
    pub rated_user_id: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(rater_user_id: String, rated_user_id: String, rating: u8) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            rater_user_id,
            rated_user_id,
            rating,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRole {
    /// The contact person teaches the skill to the record's owner.
    Teacher,
    /// The contact person learns the skill from the record's owner.
    Learner,
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContactRole::Teacher => write!(f, "teacher"),
            ContactRole::Learner => write!(f, "learner"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedContact {
    pub id: String,
    pub request_id: String,
    /// Who owns this contact record.
    pub user_id: String,
    /// The other party.
    pub contact_user_id: String,
    pub contact_name: String,
    pub contact_email: String,
    pub skill: String,
    pub role: ContactRole,
    pub created_at: DateTime<Utc>,
}

impl SharedContact {
    pub fn new(
        request_id: String,
        owner_user_id: String,
        contact: &User,
        skill: String,
        role: ContactRole,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            request_id,
            user_id: owner_user_id,
            contact_user_id: contact.id.clone(),
            contact_name: contact.name.clone(),
            contact_email: contact.email.clone(),
            skill,
            role,
            created_at: Utc::now(),
        }
    }
}

/// A learner-role contact joined with the learner's full record.
#[derive(Clone, Debug)]
pub struct LearnerContact {
    pub contact: SharedContact,
    pub learner_user: Option<User>,
}
