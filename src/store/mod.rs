//! # Record Store
//!
//! Portfolio content: the profile singleton, four ordered collections
//! (projects, experience, education, skills) and the contact inbox.
//!
//! Each operation touches one record under one lock. There are no
//! multi-record transactions; concurrent edits are last-write-wins.

pub mod collection;
pub mod errors;
pub mod inbox;
pub mod models;
pub mod ordering;
pub mod persist;
pub mod portfolio;
pub mod profile;
pub mod seed;

pub use collection::{Collection, Record};
pub use errors::{StoreError, StoreResult};
pub use models::{
    ContactInput, ContactMessage, Education, EducationInput, Experience, ExperienceInput, Profile,
    ProfileInput, Project, ProjectInput, Skill, SkillInput, PROFILE_ID,
};
pub use portfolio::{PortfolioStore, StoreCounts, Stored};
pub use seed::seed_demo;
