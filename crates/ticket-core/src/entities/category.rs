//! Category entity - a ticket topic bucket

/// A ticket category shown in the creation panel
///
/// Categories are seeded at startup and read-only afterwards; listing order
/// is id order and matters only for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub description: Option<String>,
}

impl Category {
    #[must_use]
    pub fn new(id: i64, name: String, emoji: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            emoji,
            description,
        }
    }

    /// Display label used in select menus, e.g. `⚽ Transfer`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}
