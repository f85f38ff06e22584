use serde::{Deserialize, Serialize};

use crate::client::Payload;

/// Join record between one doctor and one direction (`POST /direction-doctors`).
///
/// `photo` and `video` are required by the link endpoint's form contract and
/// are always sent empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionLink {
    pub doctors_id: i64,
    pub direction_id: i64,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub video: String,
}

impl DirectionLink {
    pub fn new(doctor_id: i64, direction_id: i64) -> Self {
        Self {
            doctors_id: doctor_id,
            direction_id,
            photo: String::new(),
            video: String::new(),
        }
    }

    /// Multipart form expected by the link endpoint.
    pub fn to_payload(&self) -> Payload {
        Payload::form()
            .text("doctors_id", self.doctors_id.to_string())
            .text("direction_id", self.direction_id.to_string())
            .text("photo", self.photo.clone())
            .text("video", self.video.clone())
    }
}
