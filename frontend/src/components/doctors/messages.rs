use common::client::{Attachment, ClientError};
use common::form::{AttachmentSlot, DoctorField};
use common::model::direction::DirectionRecord;
use common::model::doctor::DoctorRecord;
use common::workflow::SubmissionReport;

pub enum Msg {
    Reload,
    DoctorsLoaded(Result<Vec<DoctorRecord>, ClientError>),
    /// Fails open: an unreachable directions endpoint only empties the selectors.
    DirectionsLoaded(Vec<DirectionRecord>),
    SetQuery(String),
    SetDirectionFilter(Option<i64>),
    SetPage(usize),
    OpenCreate,
    OpenEdit(i64),
    FormClosed,
    SetField(DoctorField, String),
    SetDirection(Option<i64>),
    FileChosen(AttachmentSlot, web_sys::File),
    AttachmentRead(AttachmentSlot, Option<Attachment>),
    ResetForm,
    Submit,
    Submitted(SubmissionReport),
    Delete(i64),
    Deleted(i64, Result<(), ClientError>),
}
