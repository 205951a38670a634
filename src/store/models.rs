use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of stored submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Url,
    Text,
    File,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url => write!(f, "url"),
            Self::Text => write!(f, "text"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(Self::Url),
            "text" => Ok(Self::Text),
            "file" => Ok(Self::File),
            other => Err(format!(
                "Invalid item type: '{}'. Valid: url, text, file",
                other
            )),
        }
    }
}

/// One stored submission. Immutable after creation.
///
/// `content` is the target URL, the text body, or the sanitized original
/// filename depending on `kind`. Uploaded bytes live in file storage under
/// `id`, never under the client filename.
#[derive(Debug, Clone)]
pub struct Item {
    pub created_at: DateTime<Utc>,
    pub kind: ItemKind,
    pub content: String,
    pub id: Uuid,
}

impl Item {
    pub fn new(kind: ItemKind, content: impl Into<String>) -> Self {
        Self {
            created_at: Utc::now(),
            kind,
            content: content.into(),
            id: Uuid::new_v4(),
        }
    }
}
