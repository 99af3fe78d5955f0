//! Card showing one upload: title link, progress, error, and actions.
//!
//! The card's look is driven from its state: `--progress` carries the bar
//! width, `done` marks success, and `finished` marks any terminal phase.

use leptos::prelude::*;

use crate::components::action_button::ActionButton;
use crate::components::widget_style::WidgetStyle;
use crate::state::upload::{CardAction, CardEvent, CardPhase, UploadCardState};
use crate::util::style::UPLOAD_PROGRESS_CSS;

/// Upload card.
///
/// Clicking a card that is still uploading emits `on_cancel`; once the card is
/// terminal, clicks do nothing. Follow-up buttons report through `on_action`.
#[component]
pub fn UploadCard(
    #[prop(into)] card: Signal<UploadCardState>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] on_action: Callback<CardAction>,
) -> impl IntoView {
    let on_click = move |_| {
        if card.with_untracked(UploadCardState::activate) == Some(CardEvent::Cancel) {
            on_cancel.run(());
        }
    };

    let progress_style =
        move || format!("--progress: {}%", card.with(UploadCardState::progress_percent));
    let is_done = move || card.with(|c| c.phase() == CardPhase::Succeeded);
    let is_finished = move || card.with(UploadCardState::is_terminal);
    let title = move || card.with(|c| c.title().to_owned());
    let link = move || card.with(|c| c.link().map(str::to_owned));
    let error = move || card.with(|c| c.error().unwrap_or_default().to_owned());

    let actions = move || {
        card.with(|c| c.actions().to_vec())
            .into_iter()
            .map(|action| {
                let label = action.label();
                view! {
                    <ActionButton
                        label=label
                        on_click=Callback::new(move |()| on_action.run(action.clone()))
                    />
                }
            })
            .collect_view()
    };

    view! {
        <div
            class="upload-progress"
            class:done=is_done
            class:finished=is_finished
            style=progress_style
            on:click=on_click
        >
            <WidgetStyle href=UPLOAD_PROGRESS_CSS/>
            <div class="upload-progress__container">
                <a class="upload-progress__title" href=link>
                    {title}
                </a>
                {actions}
            </div>
            <span class="upload-progress__error">{error}</span>
        </div>
    }
}
