use serde::{Deserialize, Serialize};

/// Denormalized category data carried on each rule instead of a relational
/// join, mirroring what the backend embeds in its rule payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySnapshot {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl CategorySnapshot {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Bucket used for rules that carry no category reference.
    pub fn fallback() -> Self {
        Self::new("unspecified", "help-circle", "#9ca3af")
    }
}
