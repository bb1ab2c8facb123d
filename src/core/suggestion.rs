use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SESSION_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Groups the queries of one search episode for provider billing.
///
/// Tokens are unique per process; a provider adapter maps each one onto its
/// own session object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn mint() -> Self {
        Self(NEXT_SESSION_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Provider-defined reference to an unresolved place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceHandle(String);

impl PlaceHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for PlaceHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PlaceHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub display_text: String,
    pub handle: PlaceHandle,
}

impl Suggestion {
    pub fn new(display_text: impl Into<String>, handle: impl Into<PlaceHandle>) -> Self {
        Self {
            display_text: display_text.into(),
            handle: handle.into(),
        }
    }
}
