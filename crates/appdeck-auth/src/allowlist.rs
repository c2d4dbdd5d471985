//! Admin email allowlist.
//!
//! The allowlist is a JSON document of the form:
//!
//! ```json
//! { "admins": ["alice@example.com", "Bob@Example.com "] }
//! ```
//!
//! Entries are trimmed and lower-cased on load. A missing or malformed
//! document degrades to an empty allowlist (nobody is admin) and is logged as
//! a warning; it never fails a request.
//!
//! The loaded set sits behind an `Arc` that [`AdminAllowlist::reload`]
//! replaces wholesale, so readers see either the old set or the new one and
//! never a half-built one.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct AllowlistDocument {
    #[serde(default)]
    admins: Vec<String>,
}

/// Lower-cases and trims an email for allowlist comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug)]
pub struct AdminAllowlist {
    source: Option<PathBuf>,
    admins: RwLock<Arc<HashSet<String>>>,
}

impl AdminAllowlist {
    /// An allowlist with no admins and no backing file.
    pub fn empty() -> Self {
        Self::from_emails(std::iter::empty::<&str>())
    }

    /// An in-memory allowlist. [`reload`](Self::reload) keeps it as is.
    pub fn from_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let admins = normalize_all(emails);
        Self {
            source: None,
            admins: RwLock::new(Arc::new(admins)),
        }
    }

    /// Loads the allowlist from `path`, degrading to empty on any problem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let admins = load_admins(&path);
        info!(path = %path.display(), admins = admins.len(), "Admin allowlist loaded");

        Self {
            source: Some(path),
            admins: RwLock::new(Arc::new(admins)),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Current set of normalized admin emails.
    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.admins.read())
    }

    /// Case- and whitespace-insensitive membership test.
    pub fn contains(&self, email: &str) -> bool {
        let normalized = normalize_email(email);
        !normalized.is_empty() && self.snapshot().contains(&normalized)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-reads the backing file and swaps in the new set.
    ///
    /// Returns the number of admins now in effect. In-memory allowlists are
    /// left untouched.
    pub fn reload(&self) -> usize {
        let Some(path) = self.source.as_deref() else {
            return self.len();
        };

        let fresh = Arc::new(load_admins(path));
        let count = fresh.len();
        *self.admins.write() = fresh;

        info!(path = %path.display(), admins = count, "Admin allowlist reloaded");
        count
    }
}

impl Default for AdminAllowlist {
    fn default() -> Self {
        Self::empty()
    }
}

fn normalize_all<I, S>(emails: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    emails
        .into_iter()
        .map(|email| normalize_email(email.as_ref()))
        .filter(|email| !email.is_empty())
        .collect()
}

fn load_admins(path: &Path) -> HashSet<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Admin allowlist not found, no users will be admins");
            return HashSet::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read admin allowlist");
            return HashSet::new();
        }
    };

    match serde_json::from_str::<AllowlistDocument>(&raw) {
        Ok(document) => normalize_all(document.admins),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Malformed admin allowlist");
            HashSet::new()
        }
    }
}
