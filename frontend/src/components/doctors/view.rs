//! View rendering for the doctor management screen.
//!
//! Layout: header with the "Add doctor" action, filter bar, doctor table,
//! pagination, and the form top sheet (rendered once and toggled open).

use common::filter::{paginate, showing_label};
use common::form::{AttachmentSlot, DoctorField};
use common::model::doctor::DoctorRecord;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::DoctorManagement;

pub fn view(component: &DoctorManagement, ctx: &Context<DoctorManagement>) -> Html {
    let link = ctx.link();
    html! {
        <div class="doctors-root">
            { build_header(component, link) }
            { build_filters(component, link) }
            { build_table(component, ctx) }
            { build_form_sheet(component, link) }
        </div>
    }
}

fn build_header(component: &DoctorManagement, link: &Scope<DoctorManagement>) -> Html {
    html! {
        <div class="doctors-header">
            <h1>{ "Doctors" }</h1>
            <div style="display:flex;gap:8px;">
                <button class="secondary" disabled={component.loading} onclick={link.callback(|_| Msg::Reload)}>
                    { if component.loading { "Loading…" } else { "Refresh" } }
                </button>
                <button onclick={link.callback(|_| Msg::OpenCreate)}>{ "Add doctor" }</button>
            </div>
        </div>
    }
}

/// Parses a `<select>` value; the empty option means "none".
fn selected_id(e: &Event) -> Option<i64> {
    e.target_unchecked_into::<HtmlSelectElement>().value().parse().ok()
}

fn direction_options(component: &DoctorManagement, selected: Option<i64>, empty_label: &str) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_none()}>{ empty_label.to_string() }</option>
            { for component.directions.iter().map(|direction| html! {
                <option value={direction.id.to_string()} selected={selected == Some(direction.id)}>
                    { direction.label().to_string() }
                </option>
            }) }
        </>
    }
}

fn build_filters(component: &DoctorManagement, link: &Scope<DoctorManagement>) -> Html {
    let shown = component
        .doctors
        .iter()
        .filter(|d| component.filter.matches(d))
        .count();
    html! {
        <div class="filters">
            <input
                type="search"
                placeholder="Search by name or phone"
                value={component.filter.query.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::SetQuery(e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
            <select onchange={link.callback(|e: Event| Msg::SetDirectionFilter(selected_id(&e)))}>
                { direction_options(component, component.filter.direction_id, "All directions") }
            </select>
            <span class="muted">{ showing_label(shown, component.doctors.len(), "doctors") }</span>
        </div>
    }
}

fn build_table(component: &DoctorManagement, ctx: &Context<DoctorManagement>) -> Html {
    if let Some(error) = &component.load_error {
        return html! { <p class="field-error">{ error.clone() }</p> };
    }

    let link = ctx.link();
    let filtered: Vec<&DoctorRecord> = component.filter.apply(&component.doctors);
    if filtered.is_empty() && !component.loading {
        let message = if component.filter.is_active() {
            "No doctors match the filters"
        } else {
            "No doctors yet"
        };
        return html! { <p class="muted">{ message }</p> };
    }

    let page = paginate(&filtered, component.page, ctx.props().per_page);
    let backend_url = ctx.props().backend_url.clone();
    let current = page.page;
    html! {
        <>
            <table class="doctors">
                <thead>
                    <tr>
                        <th></th>
                        <th>{ "Name" }</th>
                        <th>{ "Age" }</th>
                        <th>{ "Specialization" }</th>
                        <th>{ "Phone" }</th>
                        <th>{ "Directions" }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for page.items.iter().map(|doctor| build_row(component, doctor, &backend_url, link)) }
                </tbody>
            </table>
            <div class="pagination">
                <span class="muted">{ format!("{} of {}", page.range_label(), page.total) }</span>
                <button
                    class="secondary"
                    disabled={!page.has_previous()}
                    onclick={link.callback(move |_| Msg::SetPage(current.saturating_sub(1)))}
                >
                    { "‹" }
                </button>
                <span>{ format!("{} / {}", page.page, page.total_pages) }</span>
                <button
                    class="secondary"
                    disabled={!page.has_next()}
                    onclick={link.callback(move |_| Msg::SetPage(current + 1))}
                >
                    { "›" }
                </button>
            </div>
        </>
    }
}

fn build_row(
    component: &DoctorManagement,
    doctor: &DoctorRecord,
    backend_url: &str,
    link: &Scope<DoctorManagement>,
) -> Html {
    let avatar = match doctor.photo_url(backend_url) {
        Some(url) => html! { <img class="avatar" src={url} alt={doctor.full_name()} /> },
        None => html! { <span class="avatar">{ doctor.initials() }</span> },
    };
    let directions = doctor
        .direction_doctors
        .iter()
        .map(|assignment| html! { <span class="chip">{ assignment.direction.label().to_string() }</span> })
        .collect::<Html>();

    let actions = match doctor.id {
        Some(id) => {
            let deleting = component.deleting.contains(&id);
            html! {
                <>
                    <button class="secondary" onclick={link.callback(move |_| Msg::OpenEdit(id))}>{ "Edit" }</button>
                    { " " }
                    <button class="danger" disabled={deleting} onclick={link.callback(move |_| Msg::Delete(id))}>
                        { "Delete" }
                    </button>
                </>
            }
        }
        None => html! {},
    };

    html! {
        <tr>
            <td>{ avatar }</td>
            <td>{ doctor.full_name() }</td>
            <td>{ doctor.age }</td>
            <td>{ doctor.specialization.clone() }</td>
            <td>{ doctor.phone_number.clone().unwrap_or_default() }</td>
            <td>{ directions }</td>
            <td style="white-space:nowrap;">{ actions }</td>
        </tr>
    }
}

fn field_error(component: &DoctorManagement, field: &str) -> Html {
    match component.form_errors.as_ref().and_then(|e| e.for_field(field)) {
        Some(message) => html! { <span class="field-error">{ message.to_string() }</span> },
        None => html! {},
    }
}

fn build_text_input(component: &DoctorManagement, field: DoctorField, link: &Scope<DoctorManagement>) -> Html {
    let label = if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };
    let input_type = if field == DoctorField::Age { "number" } else { "text" };
    html! {
        <label>
            { label }
            <input
                type={input_type}
                name={field.name()}
                value={component.form.value(field).to_string()}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::SetField(field, e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
            { field_error(component, field.name()) }
        </label>
    }
}

fn build_file_input(
    component: &DoctorManagement,
    slot: AttachmentSlot,
    accept: &'static str,
    link: &Scope<DoctorManagement>,
) -> Html {
    let current = match (component.form.attachment(slot), component.form.original()) {
        (Some(file), _) => format!("New: {}", file.file_name),
        (None, Some(record)) if slot == AttachmentSlot::Photo && record.has_photo() => {
            "Keeping the stored photo".to_string()
        }
        _ => String::new(),
    };
    let title = match slot {
        AttachmentSlot::Photo => "Photo",
        AttachmentSlot::Video => "Video",
    };
    html! {
        <label>
            { title }
            <input
                type="file"
                accept={accept}
                onchange={link.batch_callback(move |e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    match input.files().and_then(|files| files.get(0)) {
                        Some(file) => vec![Msg::FileChosen(slot, file)],
                        None => vec![Msg::AttachmentRead(slot, None)],
                    }
                })}
            />
            <span class="muted">{ current }</span>
            { field_error(component, slot.name()) }
        </label>
    }
}

fn build_form_sheet(component: &DoctorManagement, link: &Scope<DoctorManagement>) -> Html {
    let title = if component.form.is_editing() {
        "Edit doctor"
    } else {
        "New doctor"
    };
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    html! {
        <YwMaterialTopSheet
            node_ref={component.form_sheet_ref.clone()}
            title={title.to_string()}
            on_close={link.callback(|_| Msg::FormClosed)}
        >
            <form class="doctor-form" onsubmit={on_submit}>
                { for DoctorField::ALL.iter().map(|field| build_text_input(component, *field, link)) }
                <label>
                    { "Direction *" }
                    <select onchange={link.callback(|e: Event| Msg::SetDirection(selected_id(&e)))}>
                        { direction_options(component, component.form.direction_id(), "Select a direction") }
                    </select>
                    { field_error(component, "direction") }
                </label>
                { build_file_input(component, AttachmentSlot::Photo, "image/*", link) }
                { build_file_input(component, AttachmentSlot::Video, "video/*", link) }
                <div class="form-actions">
                    <button type="button" class="secondary" onclick={link.callback(|_| Msg::ResetForm)}>
                        { "Reset" }
                    </button>
                    <button type="submit" disabled={component.submitting}>
                        { if component.submitting { "Saving…" } else { "Save" } }
                    </button>
                </div>
            </form>
        </YwMaterialTopSheet>
    }
}
