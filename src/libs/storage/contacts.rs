use crate::libs::storage::records::{ContactRole, LearnerContact, SharedContact, User};
use crate::libs::storage::storage_sqlite::{SqliteTransaction, SHARED_CONTACTS_KEY, USERS_KEY};
use crate::libs::storage::storage_traits::{ContactStore, StoreError};

impl<'conn> ContactStore for SqliteTransaction<'conn> {
    fn user_contacts(&self, owner_id: &str) -> Result<Vec<SharedContact>, StoreError> {
        let contacts: Vec<SharedContact> = self.read_collection(SHARED_CONTACTS_KEY)?;
        Ok(contacts
            .into_iter()
            .filter(|c| c.user_id == owner_id)
            .collect())
    }

    fn previous_learners(
        &self,
        teacher_user_id: &str,
        skill: &str,
    ) -> Result<Vec<LearnerContact>, StoreError> {
        let contacts: Vec<SharedContact> = self.read_collection(SHARED_CONTACTS_KEY)?;
        let users: Vec<User> = self.read_collection(USERS_KEY)?;

        let learners = contacts
            .into_iter()
            .filter(|c| {
                c.user_id == teacher_user_id
                    && c.role == ContactRole::Learner
                    && c.skill == skill
            })
            .map(|contact| {
                // The join tolerates a dangling user reference.
                let learner_user = users
                    .iter()
                    .find(|u| u.id == contact.contact_user_id)
                    .cloned();
                LearnerContact {
                    contact,
                    learner_user,
                }
            })
            .collect();
        Ok(learners)
    }
}
