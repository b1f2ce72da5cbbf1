use crate::libs::storage::records::{
    ContactRole, IncomingRequest, LearnRequest, RequestStatus, SharedContact, User,
};
use crate::libs::storage::storage_sqlite::{
    SqliteTransaction, LEARN_REQUESTS_KEY, SHARED_CONTACTS_KEY, USERS_KEY,
};
use crate::libs::storage::storage_traits::{RequestStore, StoreError};
use chrono::Utc;

impl<'conn> RequestStore for SqliteTransaction<'conn> {
    fn add_learn_request(
        &mut self,
        from_user_id: &str,
        to_user_id: &str,
        skill: &str,
    ) -> Result<LearnRequest, StoreError> {
        let mut requests: Vec<LearnRequest> = self.read_collection(LEARN_REQUESTS_KEY)?;

        // The duplicate check covers every status, not just pending: once a
        // triple has been requested it can never be requested again.
        let duplicate = requests.iter().any(|r| {
            r.from_user_id == from_user_id && r.to_user_id == to_user_id && r.skill == skill
        });
        if duplicate {
            return Err(StoreError::DuplicateRequest);
        }

        let request = LearnRequest::new(
            from_user_id.to_string(),
            to_user_id.to_string(),
            skill.to_string(),
        );
        requests.push(request.clone());
        self.write_collection(LEARN_REQUESTS_KEY, &requests)?;

        tracing::debug!(request_id = %request.id, skill, "learn request created");
        Ok(request)
    }

    fn update_learn_request(
        &mut self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<LearnRequest, StoreError> {
        let mut requests: Vec<LearnRequest> = self.read_collection(LEARN_REQUESTS_KEY)?;
        let index = requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "learn request",
                id: request_id.to_string(),
            })?;

        // pending -> accepted and pending -> rejected are the only legal
        // transitions; accepted and rejected are terminal.
        if requests[index].status != RequestStatus::Pending || status == RequestStatus::Pending {
            return Err(StoreError::InvalidTransition {
                from: requests[index].status,
                to: status,
            });
        }

        requests[index].status = status;
        requests[index].updated_at = Some(Utc::now());
        let updated = requests[index].clone();

        // The fan-out rides the same transaction as the status write, so both
        // collections commit together or not at all.
        if status == RequestStatus::Accepted {
            self.share_contacts(&updated)?;
        }

        self.write_collection(LEARN_REQUESTS_KEY, &requests)?;
        Ok(updated)
    }

    fn load_learn_requests(&self) -> Result<Vec<LearnRequest>, StoreError> {
        self.read_collection(LEARN_REQUESTS_KEY)
    }

    fn pending_requests_for(&self, user_id: &str) -> Result<Vec<IncomingRequest>, StoreError> {
        let requests: Vec<LearnRequest> = self.read_collection(LEARN_REQUESTS_KEY)?;
        let users: Vec<User> = self.read_collection(USERS_KEY)?;

        let incoming = requests
            .into_iter()
            .filter(|r| r.to_user_id == user_id && r.status == RequestStatus::Pending)
            .map(|request| {
                let from_user = users.iter().find(|u| u.id == request.from_user_id).cloned();
                IncomingRequest { request, from_user }
            })
            .collect();
        Ok(incoming)
    }
}

impl<'conn> SqliteTransaction<'conn> {
    /// Inserts the two inverse-role contact records for an accepted request:
    /// the learner gets the teacher's contact details and vice versa. When
    /// either party cannot be resolved the fan-out is skipped whole; no
    /// partial contacts are ever written.
    fn share_contacts(&mut self, request: &LearnRequest) -> Result<(), StoreError> {
        let users: Vec<User> = self.read_collection(USERS_KEY)?;
        let from_user = users.iter().find(|u| u.id == request.from_user_id);
        let to_user = users.iter().find(|u| u.id == request.to_user_id);

        let (learner, teacher) = match (from_user, to_user) {
            (Some(learner), Some(teacher)) => (learner, teacher),
            _ => {
                tracing::warn!(
                    request_id = %request.id,
                    "contact fan-out skipped, party missing from user collection"
                );
                return Ok(());
            }
        };

        let mut contacts: Vec<SharedContact> = self.read_collection(SHARED_CONTACTS_KEY)?;
        contacts.push(SharedContact::new(
            request.id.clone(),
            learner.id.clone(),
            teacher,
            request.skill.clone(),
            ContactRole::Teacher,
        ));
        contacts.push(SharedContact::new(
            request.id.clone(),
            teacher.id.clone(),
            learner,
            request.skill.clone(),
            ContactRole::Learner,
        ));
        self.write_collection(SHARED_CONTACTS_KEY, &contacts)
    }
}
