use crate::libs::storage::records::Rating;
use crate::libs::storage::storage_sqlite::{SqliteTransaction, RATINGS_KEY};
use crate::libs::storage::storage_traits::{RatingStore, StoreError};

impl<'conn> RatingStore for SqliteTransaction<'conn> {
    fn add_rating(
        &mut self,
        rater_user_id: &str,
        rated_user_id: &str,
        value: u8,
    ) -> Result<Rating, StoreError> {
        if !(1..=5).contains(&value) {
            return Err(StoreError::RatingOutOfRange(value));
        }

        let mut ratings: Vec<Rating> = self.read_collection(RATINGS_KEY)?;
        let rating = Rating::new(rater_user_id.to_string(), rated_user_id.to_string(), value);

        // At most one rating per (rater, ratee) pair: a resubmission replaces
        // the old record at its position, id and timestamp included.
        let existing = ratings
            .iter()
            .position(|r| r.rater_user_id == rater_user_id && r.rated_user_id == rated_user_id);
        match existing {
            Some(index) => ratings[index] = rating.clone(),
            None => ratings.push(rating.clone()),
        }

        self.write_collection(RATINGS_KEY, &ratings)?;
        Ok(rating)
    }

    fn average_rating(&self, user_id: &str) -> Result<f64, StoreError> {
        let ratings: Vec<Rating> = self.read_collection(RATINGS_KEY)?;
        let received: Vec<&Rating> = ratings
            .iter()
            .filter(|r| r.rated_user_id == user_id)
            .collect();

        if received.is_empty() {
            return Ok(0.0);
        }

        let total: u32 = received.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(total) / received.len() as f64;
        Ok((mean * 10.0).round() / 10.0)
    }
}
