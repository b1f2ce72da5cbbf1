use crate::libs::storage::records::{
    IncomingRequest, LearnRequest, LearnerContact, Rating, RequestStatus, SharedContact, User,
    UserUpdate,
};
use thiserror::Error;

pub trait Storage {
    type Transaction<'s>: Transactional + SkillShareStore + 's
    where
        Self: 's;
}

pub trait Transactional {
    fn commit(self) -> Result<(), StoreError>;
    fn rollback(self) -> Result<(), StoreError>;
}

pub trait UserStore {
    fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User, StoreError>;
    fn login(&mut self, email: &str, password: &str) -> Result<User, StoreError>;
    fn logout(&mut self) -> Result<(), StoreError>;
    fn current_user(&self) -> Result<Option<User>, StoreError>;
    fn load_users(&self) -> Result<Vec<User>, StoreError>;
    fn load_user_by_id(&self, user_id: &str) -> Result<User, StoreError>;
    fn update_user(&mut self, user_id: &str, update: UserUpdate) -> Result<User, StoreError>;
    fn add_skill(&mut self, user_id: &str, skill: &str) -> Result<User, StoreError>;
    fn remove_skill(&mut self, user_id: &str, skill: &str) -> Result<User, StoreError>;
    fn search_users(&self, viewer_id: &str, term: &str) -> Result<Vec<User>, StoreError>;
}

pub trait RatingStore {
    fn add_rating(
        &mut self,
        rater_user_id: &str,
        rated_user_id: &str,
        value: u8,
    ) -> Result<Rating, StoreError>;
    fn average_rating(&self, user_id: &str) -> Result<f64, StoreError>;
}

pub trait RequestStore {
    fn add_learn_request(
        &mut self,
        from_user_id: &str,
        to_user_id: &str,
        skill: &str,
    ) -> Result<LearnRequest, StoreError>;
    fn update_learn_request(
        &mut self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<LearnRequest, StoreError>;
    fn load_learn_requests(&self) -> Result<Vec<LearnRequest>, StoreError>;
    fn pending_requests_for(&self, user_id: &str) -> Result<Vec<IncomingRequest>, StoreError>;
}

pub trait ContactStore {
    fn user_contacts(&self, owner_id: &str) -> Result<Vec<SharedContact>, StoreError>;
    fn previous_learners(
        &self,
        teacher_user_id: &str,
        skill: &str,
    ) -> Result<Vec<LearnerContact>, StoreError>;
}

pub trait SkillShareStore: UserStore + RatingStore + RequestStore + ContactStore {}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Request already sent")]
    DuplicateRequest,
    #[error("Skill already exists")]
    DuplicateSkill,
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("Request is already {from}, cannot mark it {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("Local storage is full")]
    StorageFull,
    #[error("Sqlite Error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("ConnectionPool Error: {0}")]
    ConnectionPool(#[from] r2d2::Error),
    #[error("Serialisation Error: {0}")]
    Serialisation(#[from] serde_json::Error),
}
