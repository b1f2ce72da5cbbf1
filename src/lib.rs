pub mod libs;

use crate::libs::storage::database;
use crate::libs::storage::storage_sqlite::{SqliteStore, SqliteTransaction};

pub use crate::libs::storage::records::{
    ContactRole, IncomingRequest, LearnRequest, LearnerContact, Rating, RequestStatus,
    SharedContact, User, UserUpdate,
};
pub use crate::libs::storage::storage_traits::{
    ContactStore, RatingStore, RequestStore, SkillShareStore, Storage, StoreError, Transactional,
    UserStore,
};

/// Application handle over the local store. Every operation runs inside a
/// single transaction: it either commits fully or rolls back on error, which
/// keeps multi-collection writes (the acceptance fan-out) consistent.
pub struct SkillShare {
    store: SqliteStore,
}

impl SkillShare {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let store = database::initialize_database(path)?;
        Ok(Self { store })
    }

    fn with_transaction<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: for<'c> FnOnce(&mut SqliteTransaction<'c>) -> Result<T, StoreError>,
    {
        let mut connection = self.store.new_connection()?;
        let mut tx = SqliteTransaction::new(&mut connection)?;
        // Dropping the transaction on the error path rolls it back.
        let result = op(&mut tx)?;
        tx.commit()?;
        Ok(result)
    }

    // --- user directory ---

    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.signup(name, email, password))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.login(email, password))
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.with_transaction(|tx| tx.logout())
    }

    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.with_transaction(|tx| tx.current_user())
    }

    pub fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.with_transaction(|tx| tx.load_users())
    }

    pub fn load_user_by_id(&self, user_id: &str) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.load_user_by_id(user_id))
    }

    pub fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.update_user(user_id, update))
    }

    pub fn add_skill(&self, user_id: &str, skill: &str) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.add_skill(user_id, skill))
    }

    pub fn remove_skill(&self, user_id: &str, skill: &str) -> Result<User, StoreError> {
        self.with_transaction(|tx| tx.remove_skill(user_id, skill))
    }

    pub fn search_users(&self, viewer_id: &str, term: &str) -> Result<Vec<User>, StoreError> {
        self.with_transaction(|tx| tx.search_users(viewer_id, term))
    }

    // --- rating ledger ---

    pub fn add_rating(
        &self,
        rater_user_id: &str,
        rated_user_id: &str,
        value: u8,
    ) -> Result<Rating, StoreError> {
        self.with_transaction(|tx| tx.add_rating(rater_user_id, rated_user_id, value))
    }

    pub fn average_rating(&self, user_id: &str) -> Result<f64, StoreError> {
        self.with_transaction(|tx| tx.average_rating(user_id))
    }

    // --- learn request workflow ---

    pub fn add_learn_request(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        skill: &str,
    ) -> Result<LearnRequest, StoreError> {
        self.with_transaction(|tx| tx.add_learn_request(from_user_id, to_user_id, skill))
    }

    pub fn update_learn_request(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<LearnRequest, StoreError> {
        self.with_transaction(|tx| tx.update_learn_request(request_id, status))
    }

    pub fn load_learn_requests(&self) -> Result<Vec<LearnRequest>, StoreError> {
        self.with_transaction(|tx| tx.load_learn_requests())
    }

    pub fn pending_requests_for(&self, user_id: &str) -> Result<Vec<IncomingRequest>, StoreError> {
        self.with_transaction(|tx| tx.pending_requests_for(user_id))
    }

    // --- contact ledger ---

    pub fn user_contacts(&self, owner_id: &str) -> Result<Vec<SharedContact>, StoreError> {
        self.with_transaction(|tx| tx.user_contacts(owner_id))
    }

    pub fn previous_learners(
        &self,
        teacher_user_id: &str,
        skill: &str,
    ) -> Result<Vec<LearnerContact>, StoreError> {
        self.with_transaction(|tx| tx.previous_learners(teacher_user_id, skill))
    }
}
