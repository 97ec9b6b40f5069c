//! Contact message inbox.
//!
//! Append-only from the public side; the admin can mark messages read or
//! delete them.

use std::cmp::Reverse;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::models::{ContactInput, ContactMessage};

const KIND: &str = "message";

#[derive(Debug, Default)]
pub struct Inbox {
    messages: RwLock<Vec<ContactMessage>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<ContactMessage>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Newest first
    pub fn list(&self) -> StoreResult<Vec<ContactMessage>> {
        let mut messages = self
            .messages
            .read()
            .map_err(|_| StoreError::poisoned())?
            .clone();
        messages.sort_by_key(|m| Reverse((m.created_at, m.id)));
        Ok(messages)
    }

    pub fn submit(&self, input: ContactInput) -> StoreResult<ContactMessage> {
        input.validate()?;
        let message = ContactMessage::from_input(input, Utc::now());

        let mut messages = self.messages.write().map_err(|_| StoreError::poisoned())?;
        messages.push(message.clone());
        Ok(message)
    }

    pub fn mark_read(&self, id: Uuid) -> StoreResult<ContactMessage> {
        let mut messages = self.messages.write().map_err(|_| StoreError::poisoned())?;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(KIND))?;
        message.read = true;
        Ok(message.clone())
    }

    pub fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut messages = self.messages.write().map_err(|_| StoreError::poisoned())?;
        let len_before = messages.len();
        messages.retain(|m| m.id != id);

        if messages.len() == len_before {
            Err(StoreError::NotFound(KIND))
        } else {
            Ok(())
        }
    }

    pub fn unread(&self) -> StoreResult<usize> {
        let messages = self.messages.read().map_err(|_| StoreError::poisoned())?;
        Ok(messages.iter().filter(|m| !m.read).count())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.messages.read().map_err(|_| StoreError::poisoned())?.len())
    }

    pub(crate) fn snapshot(&self) -> StoreResult<Vec<ContactMessage>> {
        Ok(self
            .messages
            .read()
            .map_err(|_| StoreError::poisoned())?
            .clone())
    }
}
