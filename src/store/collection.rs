//! Typed record collections.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::ordering::{sort_for_display, DisplayKey};

/// An ordered content entity
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Editable fields accepted on create and update
    type Input: DeserializeOwned + Send + 'static;

    /// Singular name used in messages ("project", "skill", ...)
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn display_key(&self) -> DisplayKey;

    fn validate(input: &Self::Input) -> StoreResult<()>;

    /// Build a new record with a fresh id
    fn create(input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replace editable fields, keeping `id` and `created_at`
    fn replace(&mut self, input: Self::Input, now: DateTime<Utc>);
}

/// In-memory collection of one record type.
///
/// Each operation takes the lock once, so single-record writes are atomic
/// and concurrent edits are last-write-wins.
#[derive(Debug)]
pub struct Collection<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// All records in display order
    pub fn list(&self) -> StoreResult<Vec<T>> {
        let mut records = self
            .records
            .read()
            .map_err(|_| StoreError::poisoned())?
            .clone();
        sort_for_display(&mut records, T::display_key);
        Ok(records)
    }

    pub fn get(&self, id: Uuid) -> StoreResult<T> {
        let records = self.records.read().map_err(|_| StoreError::poisoned())?;
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(StoreError::NotFound(T::KIND))
    }

    pub fn create(&self, input: T::Input) -> StoreResult<T> {
        T::validate(&input)?;
        let record = T::create(input, Utc::now());

        let mut records = self.records.write().map_err(|_| StoreError::poisoned())?;
        records.push(record.clone());
        Ok(record)
    }

    pub fn update(&self, id: Uuid, input: T::Input) -> StoreResult<T> {
        T::validate(&input)?;

        let mut records = self.records.write().map_err(|_| StoreError::poisoned())?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound(T::KIND))?;
        record.replace(input, Utc::now());
        Ok(record.clone())
    }

    pub fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::poisoned())?;
        let len_before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == len_before {
            Err(StoreError::NotFound(T::KIND))
        } else {
            Ok(())
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.records.read().map_err(|_| StoreError::poisoned())?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Raw contents in insertion order, for persistence
    pub(crate) fn snapshot(&self) -> StoreResult<Vec<T>> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::poisoned())?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{Skill, SkillInput};

    fn skill(name: &str, order: i32) -> SkillInput {
        SkillInput {
            name: name.to_string(),
            category: "Backend".to_string(),
            level: 7,
            order,
        }
    }

    #[test]
    fn test_create_list_in_display_order() {
        let skills = Collection::<Skill>::new();
        skills.create(skill("Postgres", 3)).unwrap();
        skills.create(skill("Rust", 1)).unwrap();
        skills.create(skill("Tokio", 1)).unwrap();
        skills.create(skill("Docker", 2)).unwrap();

        let listed = skills.list().unwrap();
        let orders: Vec<_> = listed.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 1, 2, 3]);
        assert!(listed[0].display_key() < listed[1].display_key());
        assert_eq!(listed[3].name, "Postgres");
    }

    #[test]
    fn test_update_and_delete() {
        let skills = Collection::<Skill>::new();
        let created = skills.create(skill("Rust", 1)).unwrap();

        let updated = skills.update(created.id, skill("Rust 2021", 5)).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.order, 5);
        assert_eq!(skills.get(created.id).unwrap().name, "Rust 2021");

        skills.delete(created.id).unwrap();
        assert!(skills.is_empty().unwrap());
        assert_eq!(skills.delete(created.id), Err(StoreError::NotFound("skill")));
    }

    #[test]
    fn test_missing_record() {
        let skills = Collection::<Skill>::new();
        let id = Uuid::new_v4();
        assert_eq!(skills.get(id), Err(StoreError::NotFound("skill")));
        assert_eq!(
            skills.update(id, skill("Rust", 1)),
            Err(StoreError::NotFound("skill"))
        );
    }

    #[test]
    fn test_invalid_input_not_stored() {
        let skills = Collection::<Skill>::new();
        let mut input = skill("Rust", 1);
        input.level = 42;
        assert!(skills.create(input).is_err());
        assert_eq!(skills.len().unwrap(), 0);
    }
}
