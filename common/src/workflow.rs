//! Doctor ↔ direction submission workflow.
//!
//! Saving a doctor takes two independent backend calls: the doctor itself
//! (`POST /doctor` or `PUT /doctor/{id}`) and then its direction link
//! (`POST /direction-doctors`). The calls run strictly one after another and
//! the workflow always runs to a terminal state before returning.
//!
//! ```text
//! Idle -> Validating -> SubmittingPrimary -> Failed
//!                                         -> SubmittingLink -> Succeeded
//!                                                           -> [Compensating ->] Failed
//! ```
//!
//! When the link cannot be created for a doctor that this run has just
//! created, the doctor is deleted again so no direction-less doctor is left
//! behind. This is a best-effort compensation, not a transaction: between the
//! create and the compensating delete the doctor is visible to other readers,
//! and if the delete fails the doctor stays orphaned. An updated doctor is never
//! rolled back; it predates the run and losing its link is recoverable.

use log::{debug, info, warn};
use serde::de::IgnoredAny;
use thiserror::Error;

use crate::client::{ClientError, RecordId, ResourceClient};
use crate::form::{DoctorForm, ValidatedDoctor, ValidationErrors};
use crate::model::direction_link::DirectionLink;
use crate::model::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Validating,
    SubmittingPrimary,
    SubmittingLink,
    Compensating,
    Succeeded,
    Failed,
}

impl WorkflowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Succeeded | WorkflowState::Failed)
    }
}

/// What happened to a freshly created doctor after its link failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Update path: the doctor predates the run and is kept.
    NotAttempted,
    DoctorRemoved,
    /// The doctor could not be removed and remains without a direction.
    RemovalFailed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    TransportFailure,
    BackendRejected,
    /// The doctor was saved but the dependent link was not.
    PartialFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    ValidationFailed(#[from] ValidationErrors),
    #[error("Failed to create doctor: {}", .0.message())]
    DoctorCreateFailed(ClientError),
    #[error("Failed to update doctor: {}", .0.message())]
    DoctorUpdateFailed(ClientError),
    #[error("{}", link_failure_message(.source, .compensation))]
    DirectionLinkFailed {
        doctor_id: i64,
        source: ClientError,
        compensation: Compensation,
    },
}

fn link_failure_message(source: &ClientError, compensation: &Compensation) -> String {
    let cause = source.message();
    match compensation {
        Compensation::NotAttempted => format!(
            "Doctor was updated but the direction could not be assigned: {}",
            cause
        ),
        Compensation::DoctorRemoved => format!(
            "Failed to assign direction, the new doctor was not kept: {}",
            cause
        ),
        Compensation::RemovalFailed(_) => format!(
            "Failed to assign direction and the new doctor could not be removed: {}",
            cause
        ),
    }
}

impl SubmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmissionError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            SubmissionError::DoctorCreateFailed(err) | SubmissionError::DoctorUpdateFailed(err)
                if err.is_transport() =>
            {
                ErrorKind::TransportFailure
            }
            SubmissionError::DoctorCreateFailed(_) | SubmissionError::DoctorUpdateFailed(_) => {
                ErrorKind::BackendRejected
            }
            SubmissionError::DirectionLinkFailed { .. } => ErrorKind::PartialFailure,
        }
    }
}

/// Outcome of one submission as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub success: bool,
    pub message: String,
}

impl SubmissionReport {
    pub fn from_outcome(outcome: &Result<i64, SubmissionError>, editing: bool) -> Self {
        match outcome {
            Ok(_) => SubmissionReport {
                success: true,
                message: if editing { "Doctor updated" } else { "Doctor created" }.to_string(),
            },
            Err(err) => SubmissionReport {
                success: false,
                message: err.to_string(),
            },
        }
    }
}

/// Runs the doctor submission against a `ResourceClient`.
///
/// `submit` borrows the workflow mutably, so one instance cannot run two
/// submissions at once. Calling `submit` again after a terminal state starts
/// over from `Idle`.
pub struct SubmissionWorkflow<'a, C> {
    client: &'a C,
    state: WorkflowState,
}

impl<'a, C: ResourceClient> SubmissionWorkflow<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Validates `form` and saves the doctor and its direction link.
    /// Returns the doctor id on success.
    pub async fn submit(&mut self, form: &DoctorForm) -> Result<i64, SubmissionError> {
        if self.state.is_terminal() {
            self.transition(WorkflowState::Idle);
        }
        self.transition(WorkflowState::Validating);

        let doctor = match form.validate() {
            Ok(doctor) => doctor,
            Err(errors) => {
                self.transition(WorkflowState::Failed);
                return Err(errors.into());
            }
        };

        let outcome = match doctor.doctor_id {
            None => self.create(doctor).await,
            Some(id) => self.update(id, doctor).await,
        };

        match &outcome {
            Ok(id) => {
                info!("Doctor {} saved with direction", id);
                self.transition(WorkflowState::Succeeded);
            }
            Err(err) => {
                warn!("Doctor submission failed: {}", err);
                self.transition(WorkflowState::Failed);
            }
        }
        outcome
    }

    async fn create(&mut self, doctor: ValidatedDoctor) -> Result<i64, SubmissionError> {
        self.transition(WorkflowState::SubmittingPrimary);
        let created: RecordId = self
            .client
            .create(Resource::Doctor, &doctor.payload)
            .await
            .map_err(SubmissionError::DoctorCreateFailed)?;
        let doctor_id = created.id.ok_or_else(|| {
            SubmissionError::DoctorCreateFailed(ClientError::Malformed(
                "no id returned".to_string(),
            ))
        })?;

        self.transition(WorkflowState::SubmittingLink);
        if let Err(source) = self.link(doctor_id, doctor.direction_id).await {
            self.transition(WorkflowState::Compensating);
            let compensation = self.remove_created(doctor_id).await;
            return Err(SubmissionError::DirectionLinkFailed {
                doctor_id,
                source,
                compensation,
            });
        }
        Ok(doctor_id)
    }

    async fn update(
        &mut self,
        doctor_id: i64,
        doctor: ValidatedDoctor,
    ) -> Result<i64, SubmissionError> {
        self.transition(WorkflowState::SubmittingPrimary);
        self.client
            .update::<IgnoredAny>(Resource::Doctor, doctor_id, &doctor.payload)
            .await
            .map_err(SubmissionError::DoctorUpdateFailed)?;

        self.transition(WorkflowState::SubmittingLink);
        if doctor.replaces_links {
            // A stale link left behind here is tolerated; the doctor still exists.
            if let Err(err) = self
                .client
                .remove(Resource::DoctorDirectionLinks, doctor_id)
                .await
            {
                warn!(
                    "Could not remove previous direction links of doctor {}: {}",
                    doctor_id, err
                );
            }
        }

        self.link(doctor_id, doctor.direction_id)
            .await
            .map_err(|source| SubmissionError::DirectionLinkFailed {
                doctor_id,
                source,
                compensation: Compensation::NotAttempted,
            })?;
        Ok(doctor_id)
    }

    async fn link(&self, doctor_id: i64, direction_id: i64) -> Result<(), ClientError> {
        let link = DirectionLink::new(doctor_id, direction_id);
        self.client
            .create::<IgnoredAny>(Resource::DirectionDoctors, &link.to_payload())
            .await
            .map(|_| ())
    }

    async fn remove_created(&self, doctor_id: i64) -> Compensation {
        match self.client.remove(Resource::Doctor, doctor_id).await {
            Ok(()) => {
                info!("Removed doctor {} after its direction link failed", doctor_id);
                Compensation::DoctorRemoved
            }
            Err(err) => {
                warn!(
                    "Doctor {} is left without a direction, removal failed: {}",
                    doctor_id, err
                );
                Compensation::RemovalFailed(err)
            }
        }
    }

    fn transition(&mut self, next: WorkflowState) {
        debug!("Doctor submission: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Attachment, FieldValue, Payload};
    use crate::form::{AttachmentSlot, DoctorField};
    use crate::model::direction::DirectionRecord;
    use crate::model::doctor::{DoctorDirection, DoctorRecord};
    use futures::executor::block_on;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Map, Value};
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashSet};

    const CARDIOLOGY: i64 = 1;
    const NEUROLOGY: i64 = 2;

    /// In-memory clinic backend that records every call it receives.
    #[derive(Default)]
    struct FakeBackend {
        doctors: RefCell<BTreeMap<i64, Map<String, Value>>>,
        links: RefCell<Vec<DirectionLink>>,
        next_id: Cell<i64>,
        calls: RefCell<Vec<String>>,
        payloads: RefCell<Vec<Payload>>,
        failing: RefCell<HashSet<&'static str>>,
        omit_created_id: Cell<bool>,
        unreachable: Cell<bool>,
    }

    impl FakeBackend {
        fn new() -> Self {
            let backend = Self::default();
            backend.next_id.set(100);
            backend
        }

        fn fail(&self, call: &'static str) {
            self.failing.borrow_mut().insert(call);
        }

        fn check(&self, call: &'static str, detail: String) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(detail);
            if self.unreachable.get() {
                return Err(ClientError::Transport("connection refused".to_string()));
            }
            if self.failing.borrow().contains(call) {
                return Err(ClientError::Rejected {
                    status: 400,
                    message: format!("{} rejected", call),
                });
            }
            Ok(())
        }

        fn seed_doctor(&self, id: i64, first_name: &str, direction_id: i64) {
            let mut fields = Map::new();
            fields.insert("id".into(), json!(id));
            fields.insert("first_name".into(), json!(first_name));
            self.doctors.borrow_mut().insert(id, fields);
            self.links
                .borrow_mut()
                .push(DirectionLink::new(id, direction_id));
        }

        fn store(payload: &Payload, fields: &mut Map<String, Value>) {
            for (name, value) in payload.fields() {
                let value = match value {
                    FieldValue::Text(text) => json!(text),
                    FieldValue::File(file) => json!(file.file_name),
                };
                fields.insert(name.to_string(), value);
            }
        }

        fn links_of(&self, doctor_id: i64) -> Vec<i64> {
            self.links
                .borrow()
                .iter()
                .filter(|l| l.doctors_id == doctor_id)
                .map(|l| l.direction_id)
                .collect()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    impl ResourceClient for FakeBackend {
        async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ClientError> {
            self.check("list", format!("GET /{}", resource))?;
            let items: Vec<Value> = self
                .doctors
                .borrow()
                .values()
                .cloned()
                .map(Value::Object)
                .collect();
            from_value(Value::Array(items))
        }

        async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> Result<T, ClientError> {
            self.check("fetch", format!("GET /{}/{}", resource, id))?;
            match self.doctors.borrow().get(&id) {
                Some(fields) => from_value(Value::Object(fields.clone())),
                None => Err(ClientError::rejected(404, r#"{"error":"Doctor not found"}"#)),
            }
        }

        async fn create<T: DeserializeOwned>(
            &self,
            resource: Resource,
            payload: &Payload,
        ) -> Result<T, ClientError> {
            self.payloads.borrow_mut().push(payload.clone());
            match resource {
                Resource::Doctor => {
                    self.check("create_doctor", "POST /doctor".to_string())?;
                    let id = self.next_id.get();
                    self.next_id.set(id + 1);
                    let mut fields = Map::new();
                    Self::store(payload, &mut fields);
                    if !self.omit_created_id.get() {
                        fields.insert("id".into(), json!(id));
                    }
                    self.doctors.borrow_mut().insert(id, fields.clone());
                    from_value(Value::Object(fields))
                }
                Resource::DirectionDoctors => {
                    self.check("create_link", "POST /direction-doctors".to_string())?;
                    let parse = |name: &str| {
                        payload
                            .text_value(name)
                            .and_then(|v| v.parse::<i64>().ok())
                            .unwrap_or_default()
                    };
                    self.links
                        .borrow_mut()
                        .push(DirectionLink::new(parse("doctors_id"), parse("direction_id")));
                    from_value(json!({ "success": true }))
                }
                other => panic!("unexpected create of {}", other),
            }
        }

        async fn update<T: DeserializeOwned>(
            &self,
            resource: Resource,
            id: i64,
            payload: &Payload,
        ) -> Result<T, ClientError> {
            assert_eq!(resource, Resource::Doctor);
            self.payloads.borrow_mut().push(payload.clone());
            self.check("update_doctor", format!("PUT /doctor/{}", id))?;
            let mut doctors = self.doctors.borrow_mut();
            let fields = doctors
                .get_mut(&id)
                .ok_or_else(|| ClientError::rejected(404, "Doctor not found"))?;
            Self::store(payload, fields);
            from_value(Value::Object(fields.clone()))
        }

        async fn remove(&self, resource: Resource, id: i64) -> Result<(), ClientError> {
            match resource {
                Resource::Doctor => {
                    self.check("remove_doctor", format!("DELETE /doctor/{}", id))?;
                    self.doctors.borrow_mut().remove(&id);
                    self.links.borrow_mut().retain(|l| l.doctors_id != id);
                }
                Resource::DoctorDirectionLinks => {
                    self.check(
                        "remove_links",
                        format!("DELETE /direction-doctors/doctor/{}", id),
                    )?;
                    self.links.borrow_mut().retain(|l| l.doctors_id != id);
                }
                other => panic!("unexpected removal of {}", other),
            }
            Ok(())
        }
    }

    fn aziz_form(direction_id: Option<i64>) -> DoctorForm {
        let mut form = DoctorForm::new();
        for (field, value) in [
            (DoctorField::FirstName, "Aziz"),
            (DoctorField::LastName, "Karimov"),
            (DoctorField::Age, "34"),
            (DoctorField::Staji, "10 yil"),
            (DoctorField::StajiRu, "10 лет"),
            (DoctorField::Education, "TTA"),
            (DoctorField::EducationRu, "ТМА"),
            (DoctorField::Specialization, "Kardiolog"),
            (DoctorField::SpecializationRu, "Кардиолог"),
        ] {
            form.set_field(field, value);
        }
        form.set_direction(direction_id);
        form.set_attachment(
            AttachmentSlot::Photo,
            Some(Attachment::new("aziz.jpg", vec![1, 2, 3])),
        );
        form
    }

    fn doctor_seven() -> DoctorRecord {
        DoctorRecord {
            id: Some(7),
            first_name: "Aziz".to_string(),
            last_name: "Karimov".to_string(),
            age: 34,
            staji: "10 yil".to_string(),
            staji_ru: "10 лет".to_string(),
            education: "TTA".to_string(),
            education_ru: "ТМА".to_string(),
            specialization: "Kardiolog".to_string(),
            specialization_ru: "Кардиолог".to_string(),
            photo: Some("aziz.jpg".to_string()),
            direction_doctors: vec![DoctorDirection {
                id: Some(1),
                direction: DirectionRecord {
                    id: CARDIOLOGY,
                    full_name: "Cardiology".to_string(),
                    ..Default::default()
                },
            }],
            ..Default::default()
        }
    }

    #[test]
    fn create_yields_one_doctor_and_one_link() {
        let backend = FakeBackend::new();
        let mut workflow = SubmissionWorkflow::new(&backend);

        let id = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap();

        assert_eq!(workflow.state(), WorkflowState::Succeeded);
        assert_eq!(backend.doctors.borrow().len(), 1);
        assert_eq!(backend.links.borrow().as_slice(), &[DirectionLink::new(id, CARDIOLOGY)]);
        assert_eq!(
            backend.calls(),
            vec!["POST /doctor".to_string(), "POST /direction-doctors".to_string()]
        );
    }

    #[test]
    fn failed_link_on_create_removes_the_new_doctor() {
        let backend = FakeBackend::new();
        backend.fail("create_link");
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap_err();

        assert_eq!(workflow.state(), WorkflowState::Failed);
        assert_eq!(err.kind(), ErrorKind::PartialFailure);
        let SubmissionError::DirectionLinkFailed {
            doctor_id,
            compensation,
            ..
        } = &err
        else {
            panic!("unexpected error {:?}", err);
        };
        assert_eq!(compensation, &Compensation::DoctorRemoved);

        let lookup = block_on(backend.fetch::<DoctorRecord>(Resource::Doctor, *doctor_id));
        assert!(lookup.unwrap_err().is_not_found());

        let remaining: Vec<DoctorRecord> = block_on(backend.list(Resource::Doctor)).unwrap();
        assert!(!remaining.iter().any(|d| d.full_name() == "Aziz Karimov"));
        assert!(backend.links.borrow().is_empty());
        assert_eq!(
            err.to_string(),
            "Failed to assign direction, the new doctor was not kept: create_link rejected"
        );
    }

    #[test]
    fn failed_compensation_is_reported_not_escalated() {
        let backend = FakeBackend::new();
        backend.fail("create_link");
        backend.fail("remove_doctor");
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap_err();

        match &err {
            SubmissionError::DirectionLinkFailed {
                source,
                compensation: Compensation::RemovalFailed(_),
                ..
            } => assert_eq!(source.message(), "create_link rejected"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(backend.doctors.borrow().len(), 1);
    }

    #[test]
    fn missing_id_in_create_response_stops_before_linking() {
        let backend = FakeBackend::new();
        backend.omit_created_id.set(true);
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap_err();

        assert_eq!(
            err,
            SubmissionError::DoctorCreateFailed(ClientError::Malformed("no id returned".to_string()))
        );
        assert_eq!(err.kind(), ErrorKind::BackendRejected);
        assert_eq!(backend.calls(), vec!["POST /doctor".to_string()]);
        assert!(backend.links.borrow().is_empty());
    }

    #[test]
    fn rejected_create_makes_no_further_calls() {
        let backend = FakeBackend::new();
        backend.fail("create_doctor");
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BackendRejected);
        assert_eq!(err.to_string(), "Failed to create doctor: create_doctor rejected");
        assert_eq!(backend.calls(), vec!["POST /doctor".to_string()]);
        assert!(backend.doctors.borrow().is_empty());
    }

    #[test]
    fn unreachable_backend_is_a_transport_failure() {
        let backend = FakeBackend::new();
        backend.unreachable.set(true);
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(backend.doctors.borrow().is_empty());
        assert_eq!(backend.calls(), vec!["POST /doctor".to_string()]);
    }

    #[test]
    fn no_direction_means_no_network_call() {
        let backend = FakeBackend::new();
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&aziz_form(None))).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.to_string(), "Select a direction");
        assert_eq!(workflow.state(), WorkflowState::Failed);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn update_moves_doctor_to_new_direction() {
        let backend = FakeBackend::new();
        backend.seed_doctor(7, "Aziz", CARDIOLOGY);
        let mut form = DoctorForm::edit(doctor_seven());
        form.set_field(DoctorField::Specialization, "Nevrolog");
        form.set_direction(Some(NEUROLOGY));
        let mut workflow = SubmissionWorkflow::new(&backend);

        let id = block_on(workflow.submit(&form)).unwrap();

        assert_eq!(id, 7);
        assert_eq!(backend.links_of(7), vec![NEUROLOGY]);
        assert_eq!(
            backend.doctors.borrow()[&7]["specialization"],
            json!("Nevrolog")
        );
        assert_eq!(
            backend.calls(),
            vec![
                "PUT /doctor/7".to_string(),
                "DELETE /direction-doctors/doctor/7".to_string(),
                "POST /direction-doctors".to_string(),
            ]
        );
    }

    #[test]
    fn update_without_new_files_sends_text_only() {
        let backend = FakeBackend::new();
        backend.seed_doctor(7, "Aziz", CARDIOLOGY);
        let mut workflow = SubmissionWorkflow::new(&backend);

        block_on(workflow.submit(&DoctorForm::edit(doctor_seven()))).unwrap();

        let payloads = backend.payloads.borrow();
        let update = &payloads[0];
        assert!(!update.has_attachments());
        for field in DoctorField::ALL.into_iter().filter(|f| f.is_required()) {
            assert!(update.text_value(field.name()).is_some(), "{}", field.name());
        }
    }

    #[test]
    fn failed_link_on_update_keeps_the_updated_doctor() {
        let backend = FakeBackend::new();
        backend.seed_doctor(7, "Aziz", CARDIOLOGY);
        backend.fail("create_link");
        let mut form = DoctorForm::edit(doctor_seven());
        form.set_field(DoctorField::FirstName, "Azizbek");
        form.set_direction(Some(NEUROLOGY));
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&form)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PartialFailure);
        assert!(matches!(
            err,
            SubmissionError::DirectionLinkFailed {
                compensation: Compensation::NotAttempted,
                ..
            }
        ));
        let doctor: DoctorRecord = block_on(backend.fetch(Resource::Doctor, 7)).unwrap();
        assert_eq!(doctor.first_name, "Azizbek");
        assert!(!backend.calls().iter().any(|c| c == "DELETE /doctor/7"));
    }

    #[test]
    fn stale_link_removal_failure_is_tolerated() {
        let backend = FakeBackend::new();
        backend.seed_doctor(7, "Aziz", CARDIOLOGY);
        backend.fail("remove_links");
        let mut form = DoctorForm::edit(doctor_seven());
        form.set_direction(Some(NEUROLOGY));
        let mut workflow = SubmissionWorkflow::new(&backend);

        assert_eq!(block_on(workflow.submit(&form)), Ok(7));
        assert_eq!(backend.links_of(7), vec![CARDIOLOGY, NEUROLOGY]);
    }

    #[test]
    fn rejected_update_leaves_links_alone() {
        let backend = FakeBackend::new();
        backend.seed_doctor(7, "Aziz", CARDIOLOGY);
        backend.fail("update_doctor");
        let mut form = DoctorForm::edit(doctor_seven());
        form.set_direction(Some(NEUROLOGY));
        let mut workflow = SubmissionWorkflow::new(&backend);

        let err = block_on(workflow.submit(&form)).unwrap_err();

        assert!(matches!(err, SubmissionError::DoctorUpdateFailed(_)));
        assert_eq!(backend.links_of(7), vec![CARDIOLOGY]);
        assert_eq!(backend.calls(), vec!["PUT /doctor/7".to_string()]);
    }

    #[test]
    fn workflow_can_be_rerun_after_failure() {
        let backend = FakeBackend::new();
        let mut workflow = SubmissionWorkflow::new(&backend);
        let form = aziz_form(None);
        assert!(block_on(workflow.submit(&form)).is_err());

        let mut form = form;
        form.set_direction(Some(CARDIOLOGY));
        assert!(block_on(workflow.submit(&form)).is_ok());
        assert_eq!(workflow.state(), WorkflowState::Succeeded);
    }

    #[test]
    fn report_carries_a_single_message() {
        let ok = SubmissionReport::from_outcome(&Ok(3), true);
        assert_eq!(
            ok,
            SubmissionReport {
                success: true,
                message: "Doctor updated".to_string()
            }
        );

        let failed = SubmissionReport::from_outcome(
            &Err(SubmissionError::DoctorUpdateFailed(ClientError::Transport(
                "timed out".to_string(),
            ))),
            true,
        );
        assert!(!failed.success);
        assert_eq!(failed.message, "Failed to update doctor: timed out");
    }

    #[test]
    fn failed_listing_reads_as_empty_when_failing_open() {
        let backend = FakeBackend::new();
        let mut workflow = SubmissionWorkflow::new(&backend);
        block_on(workflow.submit(&aziz_form(Some(CARDIOLOGY)))).unwrap();

        let listed: Vec<DoctorRecord> = block_on(backend.list_or_empty(Resource::Doctor));
        assert_eq!(listed.len(), 1);

        backend.fail("list");
        let listed: Vec<DoctorRecord> = block_on(backend.list_or_empty(Resource::Doctor));
        assert!(listed.is_empty());
        assert!(block_on(backend.list::<DoctorRecord>(Resource::Doctor)).is_err());
    }

    #[test]
    fn only_outcomes_are_terminal() {
        assert!(!WorkflowState::Idle.is_terminal());
        assert!(!WorkflowState::Compensating.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(WorkflowState::Succeeded.is_terminal());
    }
}
