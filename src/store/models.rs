//! # Portfolio Records
//!
//! Content entities shown on the public site and edited in the admin panel.
//! Every entity has a `*Input` type carrying its editable fields; ids and
//! timestamps are assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::Record;
use super::errors::{StoreError, StoreResult};
use super::ordering::DisplayKey;

/// Fixed id of the profile singleton
pub const PROFILE_ID: &str = "default-profile";

fn require(field: &'static str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid {
            field,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

fn require_email(field: &'static str, value: &str) -> StoreResult<()> {
    require(field, value)?;
    if !value.contains('@') {
        return Err(StoreError::Invalid {
            field,
            reason: "must be an email address".to_string(),
        });
    }
    Ok(())
}

// ==================
// Profile
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub avatar: Option<String>,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
}

impl ProfileInput {
    pub fn validate(&self) -> StoreResult<()> {
        require("name", &self.name)?;
        require("title", &self.title)?;
        require_email("email", &self.email)
    }
}

impl Profile {
    pub(crate) fn from_input(input: ProfileInput, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: PROFILE_ID.to_string(),
            name: input.name,
            title: input.title,
            bio: input.bio,
            email: input.email,
            phone: input.phone,
            location: input.location,
            website: input.website,
            linkedin: input.linkedin,
            github: input.github,
            twitter: input.twitter,
            avatar: input.avatar,
            resume: input.resume,
            created_at,
            updated_at: now,
        }
    }
}

// ==================
// Project
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
}

impl Record for Project {
    type Input = ProjectInput;
    const KIND: &'static str = "project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_key(&self) -> DisplayKey {
        DisplayKey::new(self.order, self.created_at, self.id)
    }

    fn validate(input: &ProjectInput) -> StoreResult<()> {
        require("title", &input.title)?;
        require("description", &input.description)
    }

    fn create(input: ProjectInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            content: input.content,
            image: input.image,
            technologies: input.technologies,
            github_url: input.github_url,
            live_url: input.live_url,
            featured: input.featured,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, input: ProjectInput, now: DateTime<Utc>) {
        let (id, created_at) = (self.id, self.created_at);
        *self = Self::create(input, created_at);
        self.id = id;
        self.updated_at = now;
    }
}

// ==================
// Experience
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub location: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInput {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl Record for Experience {
    type Input = ExperienceInput;
    const KIND: &'static str = "experience";

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_key(&self) -> DisplayKey {
        DisplayKey::new(self.order, self.created_at, self.id)
    }

    fn validate(input: &ExperienceInput) -> StoreResult<()> {
        require("company", &input.company)?;
        require("position", &input.position)?;
        require("startDate", &input.start_date)
    }

    fn create(input: ExperienceInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: input.company,
            position: input.position,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            current: input.current,
            location: input.location,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, input: ExperienceInput, now: DateTime<Utc>) {
        let (id, created_at) = (self.id, self.created_at);
        *self = Self::create(input, created_at);
        self.id = id;
        self.updated_at = now;
    }
}

// ==================
// Education
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub location: Option<String>,
    pub gpa: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl Record for Education {
    type Input = EducationInput;
    const KIND: &'static str = "education";

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_key(&self) -> DisplayKey {
        DisplayKey::new(self.order, self.created_at, self.id)
    }

    fn validate(input: &EducationInput) -> StoreResult<()> {
        require("institution", &input.institution)?;
        require("degree", &input.degree)?;
        require("startDate", &input.start_date)
    }

    fn create(input: EducationInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            institution: input.institution,
            degree: input.degree,
            field: input.field,
            start_date: input.start_date,
            end_date: input.end_date,
            current: input.current,
            location: input.location,
            gpa: input.gpa,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, input: EducationInput, now: DateTime<Utc>) {
        let (id, created_at) = (self.id, self.created_at);
        *self = Self::create(input, created_at);
        self.id = id;
        self.updated_at = now;
    }
}

// ==================
// Skill
// ==================

/// Skill levels run from 1 (novice) to 10 (expert)
pub const SKILL_LEVELS: std::ops::RangeInclusive<u8> = 1..=10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub level: u8,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: String,
    pub category: String,
    pub level: u8,
    #[serde(default)]
    pub order: i32,
}

impl Record for Skill {
    type Input = SkillInput;
    const KIND: &'static str = "skill";

    fn id(&self) -> Uuid {
        self.id
    }

    fn display_key(&self) -> DisplayKey {
        DisplayKey::new(self.order, self.created_at, self.id)
    }

    fn validate(input: &SkillInput) -> StoreResult<()> {
        require("name", &input.name)?;
        require("category", &input.category)?;
        if !SKILL_LEVELS.contains(&input.level) {
            return Err(StoreError::Invalid {
                field: "level",
                reason: format!(
                    "must be between {} and {}",
                    SKILL_LEVELS.start(),
                    SKILL_LEVELS.end()
                ),
            });
        }
        Ok(())
    }

    fn create(input: SkillInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            level: input.level,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }

    fn replace(&mut self, input: SkillInput, now: DateTime<Utc>) {
        let (id, created_at) = (self.id, self.created_at);
        *self = Self::create(input, created_at);
        self.id = id;
        self.updated_at = now;
    }
}

// ==================
// Contact messages
// ==================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactInput {
    pub fn validate(&self) -> StoreResult<()> {
        require("name", &self.name)?;
        require_email("email", &self.email)?;
        require("message", &self.message)
    }
}

impl ContactMessage {
    pub(crate) fn from_input(input: ContactInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
            read: false,
            created_at: now,
        }
    }
}
