//! File picker with the upload cards it spawns listed beneath it.

use gateway::GatewayConfig;
use leptos::prelude::*;

use crate::components::file_picker::{FilePicker, SelectedFile};
use crate::components::upload_card::UploadCard;
use crate::net::upload::{UploadController, perform_action};
use crate::state::upload::{CardAction, UploadsState};

/// Upload panel.
///
/// Owns an [`UploadController`]; every picked file becomes a card appended
/// below the picker in pick order.
#[component]
pub fn UploadPanel() -> impl IntoView {
    let config = use_context::<GatewayConfig>().unwrap_or_default();
    let controller = UploadController::new(config);
    let uploads = controller.uploads();

    let on_select = Callback::new(move |file: SelectedFile| {
        controller.start(file);
    });
    let on_clear = Callback::new(move |()| controller.clear());
    let on_action = Callback::new(move |action: CardAction| perform_action(&action));

    view! {
        <section class="upload-panel">
            <FilePicker on_select=on_select on_clear=on_clear/>
            <div class="upload-panel__list">
                <For
                    each=move || uploads.with(UploadsState::ids)
                    key=|id| *id
                    children=move |id| {
                        let card = Signal::derive(move || {
                            uploads.with(|state| state.card(id).cloned().unwrap_or_default())
                        });
                        let on_cancel = Callback::new(move |()| controller.cancel(id));
                        view! { <UploadCard card=card on_cancel=on_cancel on_action=on_action/> }
                    }
                />
            </div>
        </section>
    }
}
