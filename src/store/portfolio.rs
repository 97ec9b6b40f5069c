//! The portfolio record store.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::collection::{Collection, Record};
use super::errors::StoreResult;
use super::inbox::Inbox;
use super::models::{
    ContactInput, ContactMessage, Education, Experience, Profile, ProfileInput, Project, Skill,
};
use super::persist::{JsonFile, StoreDocument};
use super::profile::ProfileSlot;

/// Record types held in a [`PortfolioStore`] collection
pub trait Stored: Record {
    fn collection(store: &PortfolioStore) -> &Collection<Self>;
}

impl Stored for Project {
    fn collection(store: &PortfolioStore) -> &Collection<Self> {
        &store.projects
    }
}

impl Stored for Experience {
    fn collection(store: &PortfolioStore) -> &Collection<Self> {
        &store.experience
    }
}

impl Stored for Education {
    fn collection(store: &PortfolioStore) -> &Collection<Self> {
        &store.education
    }
}

impl Stored for Skill {
    fn collection(store: &PortfolioStore) -> &Collection<Self> {
        &store.skills
    }
}

/// Record counts for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub projects: usize,
    pub experience: usize,
    pub education: usize,
    pub skills: usize,
    pub messages: usize,
    pub unread_messages: usize,
}

/// All portfolio content, optionally persisted to a JSON file
#[derive(Debug, Default)]
pub struct PortfolioStore {
    profile: ProfileSlot,
    projects: Collection<Project>,
    experience: Collection<Experience>,
    education: Collection<Education>,
    skills: Collection<Skill>,
    inbox: Inbox,
    file: Option<JsonFile>,
}

impl PortfolioStore {
    /// Empty, memory-only store
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`, loading it if it exists
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let file = JsonFile::new(path);
        let document = file.load()?.unwrap_or_default();
        info!(
            path = %file.path().display(),
            projects = document.projects.len(),
            skills = document.skills.len(),
            "record store loaded"
        );

        Ok(Self {
            profile: ProfileSlot::new(document.profile),
            projects: Collection::from_records(document.projects),
            experience: Collection::from_records(document.experience),
            education: Collection::from_records(document.education),
            skills: Collection::from_records(document.skills),
            inbox: Inbox::from_messages(document.messages),
            file: Some(file),
        })
    }

    // ==================
    // Ordered collections
    // ==================

    pub fn list<T: Stored>(&self) -> StoreResult<Vec<T>> {
        T::collection(self).list()
    }

    pub fn get<T: Stored>(&self, id: Uuid) -> StoreResult<T> {
        T::collection(self).get(id)
    }

    pub fn create<T: Stored>(&self, input: T::Input) -> StoreResult<T> {
        let record = T::collection(self).create(input)?;
        self.flush()?;
        Ok(record)
    }

    pub fn update<T: Stored>(&self, id: Uuid, input: T::Input) -> StoreResult<T> {
        let record = T::collection(self).update(id, input)?;
        self.flush()?;
        Ok(record)
    }

    pub fn delete<T: Stored>(&self, id: Uuid) -> StoreResult<()> {
        T::collection(self).delete(id)?;
        self.flush()
    }

    // ==================
    // Profile
    // ==================

    pub fn profile(&self) -> StoreResult<Option<Profile>> {
        self.profile.get()
    }

    pub fn upsert_profile(&self, input: ProfileInput) -> StoreResult<Profile> {
        let profile = self.profile.upsert(input)?;
        self.flush()?;
        Ok(profile)
    }

    // ==================
    // Inbox
    // ==================

    pub fn messages(&self) -> StoreResult<Vec<ContactMessage>> {
        self.inbox.list()
    }

    pub fn submit_message(&self, input: ContactInput) -> StoreResult<ContactMessage> {
        let message = self.inbox.submit(input)?;
        self.flush()?;
        Ok(message)
    }

    pub fn mark_message_read(&self, id: Uuid) -> StoreResult<ContactMessage> {
        let message = self.inbox.mark_read(id)?;
        self.flush()?;
        Ok(message)
    }

    pub fn delete_message(&self, id: Uuid) -> StoreResult<()> {
        self.inbox.delete(id)?;
        self.flush()
    }

    // ==================
    // Housekeeping
    // ==================

    pub fn counts(&self) -> StoreResult<StoreCounts> {
        Ok(StoreCounts {
            projects: self.projects.len()?,
            experience: self.experience.len()?,
            education: self.education.len()?,
            skills: self.skills.len()?,
            messages: self.inbox.len()?,
            unread_messages: self.inbox.unread()?,
        })
    }

    /// True when there is no profile and no content records
    pub fn is_empty(&self) -> StoreResult<bool> {
        let counts = self.counts()?;
        Ok(self.profile()?.is_none()
            && counts.projects == 0
            && counts.experience == 0
            && counts.education == 0
            && counts.skills == 0)
    }

    fn document(&self) -> StoreResult<StoreDocument> {
        Ok(StoreDocument {
            profile: self.profile.get()?,
            projects: self.projects.snapshot()?,
            experience: self.experience.snapshot()?,
            education: self.education.snapshot()?,
            skills: self.skills.snapshot()?,
            messages: self.inbox.snapshot()?,
        })
    }

    fn flush(&self) -> StoreResult<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        file.save_with(|| self.document()).map_err(|e| {
            error!(path = %file.path().display(), error = %e, "failed to persist store");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{ProjectInput, SkillInput};
    use tempfile::TempDir;

    fn project(title: &str, order: i32) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: "A project".to_string(),
            content: None,
            image: None,
            technologies: vec!["Rust".to_string()],
            github_url: None,
            live_url: None,
            featured: true,
            order,
        }
    }

    #[test]
    fn test_generic_crud() {
        let store = PortfolioStore::in_memory();
        assert!(store.is_empty().unwrap());

        let created: Project = store.create(project("Gate", 1)).unwrap();
        let fetched: Project = store.get(created.id).unwrap();
        assert_eq!(fetched, created);

        let updated: Project = store.update(created.id, project("Gate v2", 1)).unwrap();
        assert_eq!(updated.title, "Gate v2");

        store.delete::<Project>(created.id).unwrap();
        assert!(store.list::<Project>().unwrap().is_empty());
    }

    #[test]
    fn test_counts() {
        let store = PortfolioStore::in_memory();
        store.create::<Project>(project("One", 1)).unwrap();
        store
            .create::<Skill>(SkillInput {
                name: "Rust".to_string(),
                category: "Languages".to_string(),
                level: 8,
                order: 1,
            })
            .unwrap();
        store
            .submit_message(ContactInput {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                subject: None,
                message: "Hi".to_string(),
            })
            .unwrap();

        let counts = store.counts().unwrap();
        assert_eq!(counts.projects, 1);
        assert_eq!(counts.skills, 1);
        assert_eq!(counts.messages, 1);
        assert_eq!(counts.unread_messages, 1);
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.json");

        let id = {
            let store = PortfolioStore::open(&path).unwrap();
            let created: Project = store.create(project("Persisted", 2)).unwrap();
            store.create::<Project>(project("Deleted", 3)).unwrap();
            let deleted = store.list::<Project>().unwrap()[1].id;
            store.delete::<Project>(deleted).unwrap();
            created.id
        };

        let reopened = PortfolioStore::open(&path).unwrap();
        let projects = reopened.list::<Project>().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, id);
        assert_eq!(projects[0].title, "Persisted");
    }
}
