//! Doctor management screen: a filterable, paginated doctor table and a
//! top-sheet form whose submission runs the doctor ↔ direction workflow.
//!
//! Split the same way as the other screens: `state` holds data, `update`
//! reacts to `Msg`, `view` renders, `helpers` touches the DOM.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DoctorManagementProps;
pub use state::DoctorManagement;

impl Component for DoctorManagement {
    type Message = Msg;
    type Properties = DoctorManagementProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DoctorManagement::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Reload);
        }
    }
}
