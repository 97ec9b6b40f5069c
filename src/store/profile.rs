//! Profile singleton.

use std::sync::RwLock;

use chrono::Utc;

use super::errors::{StoreError, StoreResult};
use super::models::{Profile, ProfileInput};

#[derive(Debug, Default)]
pub struct ProfileSlot {
    profile: RwLock<Option<Profile>>,
}

impl ProfileSlot {
    pub fn new(profile: Option<Profile>) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }

    pub fn get(&self) -> StoreResult<Option<Profile>> {
        Ok(self
            .profile
            .read()
            .map_err(|_| StoreError::poisoned())?
            .clone())
    }

    /// Create the profile or replace its fields
    pub fn upsert(&self, input: ProfileInput) -> StoreResult<Profile> {
        input.validate()?;
        let now = Utc::now();

        let mut slot = self.profile.write().map_err(|_| StoreError::poisoned())?;
        let created_at = slot.as_ref().map(|p| p.created_at).unwrap_or(now);
        let profile = Profile::from_input(input, created_at, now);
        *slot = Some(profile.clone());
        Ok(profile)
    }
}
