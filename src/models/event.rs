use serde::{Deserialize, Serialize};
use std::fmt;

/// One record of the search's output stream. Serialized as NDJSON with a
/// `status` tag; `finished`, `not_found` and `error` are terminal, and every
/// run ends with exactly one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchEvent {
    Info {
        message: String,
    },
    Exploring {
        direction: Direction,
        nodes: Vec<String>,
        stats: SearchStats,
    },
    Finished {
        path: Vec<String>,
    },
    NotFound {
        message: String,
    },
    Error {
        message: String,
    },
}

impl SearchEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished { .. } | Self::NotFound { .. } | Self::Error { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub visited: usize,
    pub elapsed_seconds: f64,
}

/// Lead extract and outgoing mainspace links of one article. The link list
/// reflects pagination truncation and is not guaranteed exhaustive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub extract: String,
    pub links: Vec<String>,
}

/// Category membership of one requested title, with redirects already
/// resolved back to the requested form.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCategories {
    pub title: String,
    pub missing: bool,
    pub categories: Vec<String>,
}
