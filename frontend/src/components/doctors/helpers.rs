//! Browser-side helpers for the doctor screen: toasts, confirmation prompts
//! and reading chosen files into memory.

use common::client::Attachment;
use gloo_file::futures::read_as_bytes;
use gloo_file::Blob;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Displays a temporary notification at the bottom of the screen. Failures
/// get a red background so they stand apart from confirmations.
pub fn show_toast(message: &str, success: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
        toast.set_text_content(Some(message));
        let html_toast: HtmlElement = toast.unchecked_into();
        let style = html_toast.style();
        let background = if success {
            "rgba(0, 0, 0, 0.8)"
        } else {
            "rgba(211, 47, 47, 0.95)"
        };
        style.set_property("position", "fixed").ok();
        style.set_property("bottom", "20px").ok();
        style.set_property("left", "50%").ok();
        style.set_property("transform", "translateX(-50%)").ok();
        style.set_property("background", background).ok();
        style.set_property("color", "#fff").ok();
        style.set_property("padding", "10px 20px").ok();
        style.set_property("border-radius", "4px").ok();
        style.set_property("z-index", "10000").ok();
        style.set_property("font-family", "Arial, sans-serif").ok();

        if body.append_child(&html_toast).is_ok() {
            wasm_bindgen_futures::spawn_local(async move {
                let delay = if success { 3000 } else { 6000 };
                gloo_timers::future::TimeoutFuture::new(delay).await;
                if let Some(parent) = html_toast.parent_node() {
                    parent.remove_child(&html_toast).ok();
                }
            });
        }
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reads a chosen file into an [`Attachment`]. Empty or unreadable files
/// yield `None`, which clears the slot.
pub async fn read_attachment(file: web_sys::File) -> Option<Attachment> {
    let file_name = file.name();
    let content_type = file.type_();
    match read_as_bytes(&Blob::from(file)).await {
        Ok(bytes) if !bytes.is_empty() => {
            let attachment = Attachment::new(file_name, bytes);
            Some(if content_type.is_empty() {
                attachment
            } else {
                attachment.with_content_type(content_type)
            })
        }
        Ok(_) => None,
        Err(err) => {
            warn!("Could not read {}: {}", file_name, err);
            None
        }
    }
}
