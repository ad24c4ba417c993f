//! Session-scoped buffer store.
//!
//! A [`Session`] holds the identity of the logged-in user and every buffer
//! written during the session, in insertion order. The FAQ pipeline reads it
//! through the [`BufferStore`] trait so tests can substitute their own store.

use super::area::{FeatureArea, is_reserved};
use super::buffer::{ContentBuffer, current_timestamp};
use serde::{Deserialize, Serialize};

/// Read access to named session buffers.
pub trait BufferStore {
    /// Returns the current text stored under `name`.
    fn get(&self, name: &str) -> Option<&str>;

    /// Enumerates every `(name, text)` entry currently held.
    ///
    /// May include the reserved identity keys; consumers decide whether to
    /// skip them.
    fn entries(&self) -> Vec<(&str, &str)>;
}

/// Who is using the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Whether a user is logged in.
    pub logged_in: bool,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// The state of one user session.
///
/// # Examples
///
/// ```
/// use healthfaq::core::{BufferStore, FeatureArea, Session};
///
/// let mut session = Session::new();
/// session.set_buffer("report_summary", Some(FeatureArea::Report), "Cholesterol is high.");
/// assert_eq!(session.get("report_summary"), Some("Cholesterol is high."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity of the session owner.
    pub identity: Identity,

    /// Buffers in insertion order.
    buffers: Vec<ContentBuffer>,

    /// Unix timestamp of the latest change.
    pub updated_at: i64,
}

impl Session {
    /// Creates an empty, logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: Identity::default(),
            buffers: Vec::new(),
            updated_at: current_timestamp(),
        }
    }

    /// Builds a session from stored parts, preserving buffer order.
    #[must_use]
    pub fn from_parts(identity: Identity, buffers: Vec<ContentBuffer>) -> Self {
        Self {
            identity,
            buffers,
            updated_at: current_timestamp(),
        }
    }

    /// Marks the session as logged in.
    pub fn login(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.identity = Identity {
            logged_in: true,
            name: Some(name.into()),
            email: Some(email.into()),
        };
        self.touch();
    }

    /// Clears identity and every buffer.
    pub fn logout(&mut self) {
        self.identity = Identity::default();
        self.buffers.clear();
        self.touch();
    }

    /// Returns `true` if a user is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.identity.logged_in
    }

    /// Writes a buffer, overwriting any earlier text under the same name.
    ///
    /// Overwrites keep the buffer's original position. Returns `false` and
    /// stores nothing when `name` is a reserved identity key.
    pub fn set_buffer(
        &mut self,
        name: &str,
        area: Option<FeatureArea>,
        text: impl Into<String>,
    ) -> bool {
        if is_reserved(name) {
            return false;
        }
        let text = text.into();
        if let Some(existing) = self.buffers.iter_mut().find(|b| b.name == name) {
            existing.overwrite(area, text);
        } else {
            self.buffers.push(ContentBuffer::new(name, area, text));
        }
        self.touch();
        true
    }

    /// Looks up a buffer by name.
    #[must_use]
    pub fn buffer(&self, name: &str) -> Option<&ContentBuffer> {
        self.buffers.iter().find(|b| b.name == name)
    }

    /// Returns all buffers in insertion order.
    #[must_use]
    pub fn buffers(&self) -> &[ContentBuffer] {
        &self.buffers
    }

    /// Returns the number of buffers.
    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl BufferStore for Session {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.identity.name.as_deref(),
            "email" => self.identity.email.as_deref(),
            "logged_in" => None,
            _ => self.buffer(name).map(|b| b.text.as_str()),
        }
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        let identity = [
            ("name", self.identity.name.as_deref()),
            ("email", self.identity.email.as_deref()),
        ];
        identity
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .chain(self.buffers.iter().map(|b| (b.name.as_str(), b.text.as_str())))
            .collect()
    }
}
