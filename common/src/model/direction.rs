use serde::{Deserialize, Serialize};

/// A medical specialty. The console only reads directions; they are managed
/// on their own screen through the generic relay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionRecord {
    pub id: i64,
    /// Display label. Embedded directions (inside a doctor) call it `name`.
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl DirectionRecord {
    pub fn label(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.title
        } else {
            &self.full_name
        }
    }
}
