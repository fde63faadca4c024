//! Fixture state shared between ordered steps.
//!
//! Values written by one step and read by a later one live here. A fresh
//! [`FixtureState`] is created for every workflow run and passed by
//! reference, so nothing leaks between runs. Reading a slot that no earlier
//! step populated fails with [`FoodyError::MissingFixture`].

use crate::result::{FoodyError, FoodyResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters used for generated names
pub const RANDOM_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate `length` random characters from `[A-Z0-9]`
#[must_use]
pub fn generate_random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())]))
        .collect()
}

/// Values carried from one step to the next
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureState {
    last_created_title: Option<String>,
    last_created_description: Option<String>,
    last_edited_title: Option<String>,
    displayed_card_count: Option<usize>,
    username: Option<String>,
}

fn require<T: Clone>(slot: &Option<T>, name: &'static str) -> FoodyResult<T> {
    slot.clone().ok_or(FoodyError::MissingFixture { slot: name })
}

impl FixtureState {
    /// Empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Title of the item created most recently
    pub fn last_created_title(&self) -> FoodyResult<String> {
        require(&self.last_created_title, "last_created_title")
    }

    /// Record the title of a newly created item
    pub fn set_last_created_title(&mut self, title: impl Into<String>) {
        self.last_created_title = Some(title.into());
    }

    /// Description of the item created most recently
    pub fn last_created_description(&self) -> FoodyResult<String> {
        require(&self.last_created_description, "last_created_description")
    }

    /// Record the description of a newly created item
    pub fn set_last_created_description(&mut self, description: impl Into<String>) {
        self.last_created_description = Some(description.into());
    }

    /// Title submitted by the most recent edit
    pub fn last_edited_title(&self) -> FoodyResult<String> {
        require(&self.last_edited_title, "last_edited_title")
    }

    /// Record the title submitted by an edit
    pub fn set_last_edited_title(&mut self, title: impl Into<String>) {
        self.last_edited_title = Some(title.into());
    }

    /// Card count observed by the most recent count
    pub fn displayed_card_count(&self) -> FoodyResult<usize> {
        require(&self.displayed_card_count, "displayed_card_count")
    }

    /// Record an observed card count
    pub fn set_displayed_card_count(&mut self, count: usize) {
        self.displayed_card_count = Some(count);
    }

    /// Username generated at registration
    pub fn username(&self) -> FoodyResult<String> {
        require(&self.username, "username")
    }

    /// Record the registered username
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }
}
