//! Update function of the doctor management screen.
//!
//! Network work is spawned with `spawn_local` and reports back through
//! `link.send_message`. A submission runs the whole doctor ↔ direction
//! workflow in one task; the screen only learns its terminal report.

use common::client::ResourceClient;
use common::form::DoctorForm;
use common::model::direction::DirectionRecord;
use common::model::doctor::DoctorRecord;
use common::model::resource::Resource;
use common::workflow::{SubmissionReport, SubmissionWorkflow};
use log::info;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::BrowserClient;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{confirm, read_attachment, show_toast};
use super::messages::Msg;
use super::state::DoctorManagement;

pub fn update(component: &mut DoctorManagement, ctx: &Context<DoctorManagement>, msg: Msg) -> bool {
    match msg {
        Msg::Reload => {
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let client = BrowserClient;
                let doctors = client.list::<DoctorRecord>(Resource::Doctor).await;
                link.send_message(Msg::DoctorsLoaded(doctors));
                let directions = client.list_or_empty::<DirectionRecord>(Resource::Direction).await;
                link.send_message(Msg::DirectionsLoaded(directions));
            });
            true
        }
        Msg::DoctorsLoaded(result) => {
            component.loading = false;
            match result {
                Ok(doctors) => {
                    component.doctors = doctors;
                    component.load_error = None;
                }
                Err(err) => {
                    component.load_error = Some(format!("Could not load doctors: {}", err.message()));
                }
            }
            true
        }
        Msg::DirectionsLoaded(directions) => {
            if directions.is_empty() {
                show_toast("No directions available; doctors cannot be assigned yet", false);
            }
            component.directions = directions;
            true
        }
        Msg::SetQuery(query) => {
            component.filter.query = query;
            component.page = 1;
            true
        }
        Msg::SetDirectionFilter(direction_id) => {
            component.filter.direction_id = direction_id;
            component.page = 1;
            true
        }
        Msg::SetPage(page) => {
            component.page = page;
            true
        }
        Msg::OpenCreate => {
            component.form = DoctorForm::new();
            component.form_errors = None;
            open_top_sheet(component.form_sheet_ref.clone());
            true
        }
        Msg::OpenEdit(id) => {
            let Some(doctor) = component.doctor(id).cloned() else {
                return false;
            };
            component.form = DoctorForm::edit(doctor);
            component.form_errors = None;
            open_top_sheet(component.form_sheet_ref.clone());
            true
        }
        Msg::FormClosed => {
            component.form_errors = None;
            true
        }
        Msg::SetField(field, value) => {
            component.form.set_field(field, value);
            false
        }
        Msg::SetDirection(direction_id) => {
            component.form.set_direction(direction_id);
            true
        }
        Msg::FileChosen(slot, file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let attachment = read_attachment(file).await;
                link.send_message(Msg::AttachmentRead(slot, attachment));
            });
            false
        }
        Msg::AttachmentRead(slot, attachment) => {
            component.form.set_attachment(slot, attachment);
            true
        }
        Msg::ResetForm => {
            component.form.reset();
            component.form_errors = None;
            true
        }
        Msg::Submit => {
            if component.submitting {
                return false;
            }
            if let Err(errors) = component.form.validate() {
                show_toast(&errors.to_string(), false);
                component.form_errors = Some(errors);
                return true;
            }
            component.form_errors = None;
            component.submitting = true;

            let form = component.form.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let client = BrowserClient;
                let mut workflow = SubmissionWorkflow::new(&client);
                let outcome = workflow.submit(&form).await;
                let report = SubmissionReport::from_outcome(&outcome, form.is_editing());
                link.send_message(Msg::Submitted(report));
            });
            true
        }
        Msg::Submitted(report) => {
            component.submitting = false;
            show_toast(&report.message, report.success);
            if report.success {
                close_top_sheet(component.form_sheet_ref.clone());
                component.form = DoctorForm::new();
            }
            // A failed create may have left and then removed a doctor; refresh either way.
            ctx.link().send_message(Msg::Reload);
            true
        }
        Msg::Delete(id) => {
            let name = component
                .doctor(id)
                .map(DoctorRecord::full_name)
                .unwrap_or_default();
            if component.deleting.contains(&id) || !confirm(&format!("Delete doctor {}?", name)) {
                return false;
            }
            component.deleting.push(id);
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = BrowserClient.remove(Resource::Doctor, id).await;
                link.send_message(Msg::Deleted(id, result));
            });
            true
        }
        Msg::Deleted(id, result) => {
            component.deleting.retain(|pending| *pending != id);
            match result {
                Ok(()) => {
                    info!("Deleted doctor {}", id);
                    component.doctors.retain(|d| d.id != Some(id));
                    show_toast("Doctor deleted", true);
                }
                Err(err) => show_toast(&format!("Failed to delete doctor: {}", err.message()), false),
            }
            true
        }
    }
}
