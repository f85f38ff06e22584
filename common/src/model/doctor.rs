use serde::{Deserialize, Serialize};

use crate::model::de;
use crate::model::direction::DirectionRecord;

/// A doctor as returned by the clinic backend (`GET /doctor`, `GET /doctor/{id}`).
///
/// The `id` is assigned by the backend and stays `None` for a record that was
/// never created. `photo` and `video` hold the filenames the backend stored
/// for previously uploaded files; new uploads travel separately as
/// `client::Attachment`s on the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    #[serde(default, deserialize_with = "de::optional_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "de::age")]
    pub age: u32,
    /// Work experience, Uzbek.
    #[serde(default)]
    pub staji: String,
    /// Work experience, Russian.
    #[serde(default)]
    pub staji_ru: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub education_ru: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub specialization_ru: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub video: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub rating: Option<String>,
    /// Current direction assignments, embedded by the backend.
    #[serde(default, rename = "directionDoctors")]
    pub direction_doctors: Vec<DoctorDirection>,
}

/// One embedded direction assignment of a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorDirection {
    #[serde(default, deserialize_with = "de::optional_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub direction: DirectionRecord,
}

impl DoctorRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn direction_ids(&self) -> Vec<i64> {
        self.direction_doctors
            .iter()
            .map(|dd| dd.direction.id)
            .collect()
    }

    pub fn has_directions(&self) -> bool {
        !self.direction_doctors.is_empty()
    }

    /// Whether the backend already stores a photo for this doctor.
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Location of the stored photo, either absolute already or relative to
    /// the backend's upload directory.
    pub fn photo_url(&self, backend_url: &str) -> Option<String> {
        self.photo
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                if p.starts_with("http") {
                    p.to_string()
                } else {
                    format!("{}/uploads/doctor/{}", backend_url.trim_end_matches('/'), p)
                }
            })
    }

    /// Two-letter placeholder shown when there is no photo.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}
