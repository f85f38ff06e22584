use uuid::Uuid;
use yew::{html, Callback, Component, Context, Html, MouseEvent, NodeRef, Properties};

/// Sheet that slides down from the top of the page; shown by toggling the
/// `show` class through [`open_top_sheet`] / [`close_top_sheet`].
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub title: String,
    /// Called by the close button; the sheet is already hidden by then.
    #[prop_or_default]
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = {
            let node_ref = props.node_ref.clone();
            let on_close = props.on_close.clone();
            Callback::from(move |_: MouseEvent| {
                close_top_sheet(node_ref.clone());
                on_close.emit(());
            })
        };
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <div style="display:flex;justify-content:space-between;align-items:center;padding:16px 24px 0;">
                    <h2 style="margin:0;">{ props.title.clone() }</h2>
                    <button class="secondary" onclick={on_close}>{ "✕" }</button>
                </div>
                { props.children.clone() }
            </div>
        }
    }
}

fn toggle_show(top_sheet_ref: &NodeRef, show: bool) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        let classes = top_sheet.class_list();
        let _ = if show {
            classes.add_1("show")
        } else {
            classes.remove_1("show")
        };
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    // Give a freshly rendered sheet one frame so the transition runs.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        toggle_show(&top_sheet_ref, true);
    });
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(&top_sheet_ref, false);
}
