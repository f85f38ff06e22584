//! Runtime state of the doctor management screen.

use common::filter::DoctorFilter;
use common::form::{DoctorForm, ValidationErrors};
use common::model::direction::DirectionRecord;
use common::model::doctor::DoctorRecord;
use yew::prelude::*;

pub struct DoctorManagement {
    pub doctors: Vec<DoctorRecord>,
    pub directions: Vec<DirectionRecord>,

    /// A list request is in flight.
    pub loading: bool,
    /// Why the last list request failed; the table shows it instead of rows.
    pub load_error: Option<String>,

    pub filter: DoctorFilter,
    /// 1-based; clamped when rendering.
    pub page: usize,

    /// Working copy of the doctor being created or edited.
    pub form: DoctorForm,
    pub form_errors: Option<ValidationErrors>,
    /// A submission workflow is running. The submit button stays disabled.
    pub submitting: bool,
    pub form_sheet_ref: NodeRef,

    /// Ids with a delete request in flight.
    pub deleting: Vec<i64>,

    pub loaded: bool,
}

impl DoctorManagement {
    pub fn new() -> Self {
        Self {
            doctors: Vec::new(),
            directions: Vec::new(),
            loading: false,
            load_error: None,
            filter: DoctorFilter::default(),
            page: 1,
            form: DoctorForm::new(),
            form_errors: None,
            submitting: false,
            form_sheet_ref: NodeRef::default(),
            deleting: Vec::new(),
            loaded: false,
        }
    }

    pub fn doctor(&self, id: i64) -> Option<&DoctorRecord> {
        self.doctors.iter().find(|d| d.id == Some(id))
    }
}
