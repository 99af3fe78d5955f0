//! Multi-file picker that reports each chosen file through a callback.
//!
//! SYSTEM CONTEXT
//! ==============
//! The picker knows nothing about uploads. It reports one `on_select` per
//! chosen file, or a single `on_clear` when the dialog is dismissed, and the
//! owner decides what to do with them.

#[cfg(test)]
#[path = "file_picker_test.rs"]
mod file_picker_test;

use leptos::prelude::*;

use crate::components::widget_style::WidgetStyle;
use crate::util::style::FILE_CHOOSER_CSS;

/// A file chosen in the picker.
#[derive(Clone, Debug)]
pub struct SelectedFile {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    #[cfg(feature = "csr")]
    pub handle: web_sys::File,
}

#[cfg(feature = "csr")]
impl SelectedFile {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_handle(handle: web_sys::File) -> Self {
        Self {
            name: handle.name(),
            size: handle.size() as u64,
            handle,
        }
    }
}

/// Report a selection: one `on_select` per file, or `on_clear` when empty.
///
/// Returns `true` when at least one file was reported, which is when the
/// control should be reset so the same file can be picked again.
pub fn dispatch_selection<F>(
    files: Vec<F>,
    mut on_select: impl FnMut(F),
    on_clear: impl FnOnce(),
) -> bool {
    if files.is_empty() {
        on_clear();
        return false;
    }
    for file in files {
        on_select(file);
    }
    true
}

#[cfg(feature = "csr")]
fn picked_files(input_ref: NodeRef<leptos::html::Input>) -> Vec<SelectedFile> {
    let Some(list) = input_ref.get().and_then(|input| input.files()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(SelectedFile::from_handle)
        .collect()
}

#[cfg(not(feature = "csr"))]
fn picked_files(_input_ref: NodeRef<leptos::html::Input>) -> Vec<SelectedFile> {
    Vec::new()
}

#[cfg(feature = "csr")]
fn reset_input(input_ref: NodeRef<leptos::html::Input>) {
    if let Some(input) = input_ref.get() {
        input.set_value("");
    }
}

#[cfg(not(feature = "csr"))]
fn reset_input(_input_ref: NodeRef<leptos::html::Input>) {}

/// File input accepting multiple files.
#[component]
pub fn FilePicker(
    #[prop(into)] on_select: Callback<SelectedFile>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_change = move |_| {
        let files = picked_files(input_ref);
        if dispatch_selection(files, |file| on_select.run(file), || on_clear.run(())) {
            reset_input(input_ref);
        }
    };

    view! {
        <label class="file-chooser">
            <WidgetStyle href=FILE_CHOOSER_CSS/>
            <input
                class="file-chooser__control"
                type="file"
                multiple=true
                node_ref=input_ref
                on:change=on_change
            />
        </label>
    }
}
