use crate::libs::storage::records::{User, UserUpdate};
use crate::libs::storage::storage_sqlite::{SqliteTransaction, USERS_KEY};
use crate::libs::storage::storage_traits::{StoreError, UserStore};

impl<'conn> UserStore for SqliteTransaction<'conn> {
    fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User, StoreError> {
        let mut users: Vec<User> = self.read_collection(USERS_KEY)?;

        // Email match is exact and case-sensitive.
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User::new(name.to_string(), email.to_string(), password.to_string());
        users.push(user.clone());
        self.write_collection(USERS_KEY, &users)?;

        tracing::debug!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    fn login(&mut self, email: &str, password: &str) -> Result<User, StoreError> {
        let users: Vec<User> = self.read_collection(USERS_KEY)?;

        // Unknown email and wrong password are deliberately indistinguishable.
        let user = users
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;

        self.write_session(&user)?;
        tracing::debug!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    fn logout(&mut self) -> Result<(), StoreError> {
        self.clear_session()
    }

    fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.read_session()
    }

    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.read_collection(USERS_KEY)
    }

    fn load_user_by_id(&self, user_id: &str) -> Result<User, StoreError> {
        let users: Vec<User> = self.read_collection(USERS_KEY)?;
        users
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "user",
                id: user_id.to_string(),
            })
    }

    fn update_user(&mut self, user_id: &str, update: UserUpdate) -> Result<User, StoreError> {
        let mut users: Vec<User> = self.read_collection(USERS_KEY)?;
        let index = users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "user",
                id: user_id.to_string(),
            })?;

        let user = &mut users[index];
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(skills) = update.skills {
            // Skills are replaced wholesale, not merged.
            user.skills = skills;
        }
        let updated = user.clone();
        self.write_collection(USERS_KEY, &users)?;

        // Keep the session record in step with the canonical copy.
        if let Some(session_user) = self.read_session()? {
            if session_user.id == user_id {
                self.write_session(&updated)?;
            }
        }

        Ok(updated)
    }

    fn add_skill(&mut self, user_id: &str, skill: &str) -> Result<User, StoreError> {
        let user = self.load_user_by_id(user_id)?;
        let skill = skill.trim();

        if user.skills.iter().any(|s| s == skill) {
            return Err(StoreError::DuplicateSkill);
        }

        let mut skills = user.skills;
        skills.push(skill.to_string());
        self.update_user(user_id, UserUpdate::skills(skills))
    }

    fn remove_skill(&mut self, user_id: &str, skill: &str) -> Result<User, StoreError> {
        let user = self.load_user_by_id(user_id)?;
        let skills = user
            .skills
            .into_iter()
            .filter(|s| s != skill)
            .collect::<Vec<_>>();
        self.update_user(user_id, UserUpdate::skills(skills))
    }

    fn search_users(&self, viewer_id: &str, term: &str) -> Result<Vec<User>, StoreError> {
        let users: Vec<User> = self.read_collection(USERS_KEY)?;
        let term = term.trim().to_lowercase();

        let matches = users
            .into_iter()
            .filter(|u| u.id != viewer_id)
            .filter(|u| {
                term.is_empty()
                    || u.name.to_lowercase().contains(&term)
                    || u.skills.iter().any(|s| s.to_lowercase().contains(&term))
            })
            .collect();
        Ok(matches)
    }
}
