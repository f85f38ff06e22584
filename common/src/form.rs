//! Staging area for one doctor under edit.
//!
//! A `DoctorForm` owns the working copy of the text fields, the selected
//! direction and any newly chosen files for the duration of one edit session.
//! The presentation layer mutates it field by field and hands it to the
//! submission workflow by reference; nothing here touches the network.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::client::{Attachment, Payload};
use crate::model::doctor::DoctorRecord;

/// Text inputs of the doctor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DoctorField {
    FirstName,
    LastName,
    Age,
    Staji,
    StajiRu,
    Education,
    EducationRu,
    Specialization,
    SpecializationRu,
    PhoneNumber,
}

impl DoctorField {
    pub const ALL: [DoctorField; 10] = [
        DoctorField::FirstName,
        DoctorField::LastName,
        DoctorField::Age,
        DoctorField::Staji,
        DoctorField::StajiRu,
        DoctorField::Education,
        DoctorField::EducationRu,
        DoctorField::Specialization,
        DoctorField::SpecializationRu,
        DoctorField::PhoneNumber,
    ];

    /// Form field name on the wire.
    pub fn name(self) -> &'static str {
        match self {
            DoctorField::FirstName => "first_name",
            DoctorField::LastName => "last_name",
            DoctorField::Age => "age",
            DoctorField::Staji => "staji",
            DoctorField::StajiRu => "staji_ru",
            DoctorField::Education => "education",
            DoctorField::EducationRu => "education_ru",
            DoctorField::Specialization => "specialization",
            DoctorField::SpecializationRu => "specialization_ru",
            DoctorField::PhoneNumber => "phone_number",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DoctorField::FirstName => "First Name",
            DoctorField::LastName => "Last Name",
            DoctorField::Age => "Age",
            DoctorField::Staji => "Experience (Staji)",
            DoctorField::StajiRu => "Experience (Staji Russian)",
            DoctorField::Education => "Education",
            DoctorField::EducationRu => "Education (Russian)",
            DoctorField::Specialization => "Specialization",
            DoctorField::SpecializationRu => "Specialization (Russian)",
            DoctorField::PhoneNumber => "Phone Number",
        }
    }

    pub fn from_name(name: &str) -> Option<DoctorField> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn is_required(self) -> bool {
        !matches!(self, DoctorField::PhoneNumber)
    }

    fn initial_value(self, record: &DoctorRecord) -> String {
        match self {
            DoctorField::FirstName => record.first_name.clone(),
            DoctorField::LastName => record.last_name.clone(),
            DoctorField::Age if record.age > 0 => record.age.to_string(),
            DoctorField::Age => String::new(),
            DoctorField::Staji => record.staji.clone(),
            DoctorField::StajiRu => record.staji_ru.clone(),
            DoctorField::Education => record.education.clone(),
            DoctorField::EducationRu => record.education_ru.clone(),
            DoctorField::Specialization => record.specialization.clone(),
            DoctorField::SpecializationRu => record.specialization_ru.clone(),
            DoctorField::PhoneNumber => record.phone_number.clone().unwrap_or_default(),
        }
    }
}

/// File inputs of the doctor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    Photo,
    Video,
}

impl AttachmentSlot {
    pub fn name(self) -> &'static str {
        match self {
            AttachmentSlot::Photo => "photo",
            AttachmentSlot::Video => "video",
        }
    }

    pub fn from_name(name: &str) -> Option<AttachmentSlot> {
        match name {
            "photo" => Some(AttachmentSlot::Photo),
            "video" => Some(AttachmentSlot::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown doctor field `{0}`")]
    UnknownField(String),
}

/// One failed validation rule, keyed by the wire name of the offending input
/// (`direction` for the direction selector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("form is valid"),
            [only] => f.write_str(&only.message),
            [first, rest @ ..] => write!(f, "{} (and {} more)", first.message, rest.len()),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Output of a successful validation: everything the workflow needs, already
/// encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDoctor {
    /// `Some` when updating an existing doctor.
    pub doctor_id: Option<i64>,
    pub payload: Payload,
    pub direction_id: i64,
    /// Whether the edited doctor already had direction links that must be
    /// superseded.
    pub replaces_links: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorForm {
    original: Option<DoctorRecord>,
    values: BTreeMap<DoctorField, String>,
    direction_id: Option<i64>,
    photo: Option<Attachment>,
    video: Option<Attachment>,
}

impl DoctorForm {
    /// A blank form for creating a doctor.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing doctor.
    pub fn edit(record: DoctorRecord) -> Self {
        let mut form = Self {
            original: Some(record),
            ..Self::default()
        };
        form.reset();
        form
    }

    pub fn set_field(&mut self, field: DoctorField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field =
            DoctorField::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn set_direction(&mut self, direction_id: Option<i64>) {
        self.direction_id = direction_id;
    }

    /// Stages a newly chosen file, or clears the staged one with `None`.
    /// A file already stored on the backend is not affected.
    pub fn set_attachment(&mut self, slot: AttachmentSlot, file: Option<Attachment>) {
        let file = file.filter(|f| !f.is_empty());
        match slot {
            AttachmentSlot::Photo => self.photo = file,
            AttachmentSlot::Video => self.video = file,
        }
    }

    /// Back to the initial state: blank, or the edited record's values.
    pub fn reset(&mut self) {
        self.values.clear();
        self.photo = None;
        self.video = None;
        self.direction_id = None;
        if let Some(record) = &self.original {
            for field in DoctorField::ALL {
                self.values.insert(field, field.initial_value(record));
            }
            self.direction_id = record.direction_ids().first().copied();
        }
    }

    pub fn value(&self, field: DoctorField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn direction_id(&self) -> Option<i64> {
        self.direction_id
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        match slot {
            AttachmentSlot::Photo => self.photo.as_ref(),
            AttachmentSlot::Video => self.video.as_ref(),
        }
    }

    pub fn original(&self) -> Option<&DoctorRecord> {
        self.original.as_ref()
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.original.as_ref().and_then(|r| r.id)
    }

    pub fn is_editing(&self) -> bool {
        self.doctor_id().is_some()
    }

    pub fn validate(&self) -> Result<ValidatedDoctor, ValidationErrors> {
        let mut errors = Vec::new();

        for field in DoctorField::ALL.into_iter().filter(|f| f.is_required()) {
            if self.value(field).trim().is_empty() {
                errors.push(FieldError {
                    field: field.name(),
                    message: format!("{} is required", field.label()),
                });
            }
        }

        let raw_age = self.value(DoctorField::Age).trim();
        let age = match raw_age.parse::<u32>() {
            Ok(age) if age > 0 => Some(age),
            _ => {
                if !raw_age.is_empty() {
                    errors.push(FieldError {
                        field: DoctorField::Age.name(),
                        message: "Age must be a positive whole number".to_string(),
                    });
                }
                None
            }
        };

        if self.direction_id.is_none() {
            errors.push(FieldError {
                field: "direction",
                message: "Select a direction".to_string(),
            });
        }

        let has_stored_photo = self.original.as_ref().is_some_and(DoctorRecord::has_photo);
        if self.photo.is_none() && !has_stored_photo {
            errors.push(FieldError {
                field: AttachmentSlot::Photo.name(),
                message: "A photo is required".to_string(),
            });
        }

        let (Some(age), Some(direction_id), true) = (age, self.direction_id, errors.is_empty())
        else {
            return Err(ValidationErrors { errors });
        };

        Ok(ValidatedDoctor {
            doctor_id: self.doctor_id(),
            payload: self.payload(age),
            direction_id,
            replaces_links: self
                .original
                .as_ref()
                .is_some_and(DoctorRecord::has_directions),
        })
    }

    /// All text fields, plus only the files chosen during this session.
    fn payload(&self, age: u32) -> Payload {
        let mut payload = Payload::form();
        for field in DoctorField::ALL {
            let value = self.value(field).trim();
            match field {
                DoctorField::Age => payload.push_text(field.name(), age.to_string()),
                DoctorField::PhoneNumber if value.is_empty() => {}
                _ => payload.push_text(field.name(), value),
            }
        }
        if let Some(photo) = &self.photo {
            payload.push_file(AttachmentSlot::Photo.name(), photo.clone());
        }
        if let Some(video) = &self.video {
            payload.push_file(AttachmentSlot::Video.name(), video.clone());
        }
        payload
    }
}
