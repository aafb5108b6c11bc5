//! Drop zone + file picker for one image slot, with its preview.
//!
//! DESIGN
//! ======
//! The card only collects a selection and hands it to `on_files`; validation
//! (media type, exactly one file) and preview ownership live in the staging
//! area. The file input is cleared after every change so picking the same
//! file again still fires.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast as _;

use crate::state::upload::{ACCEPTED_MIME_TYPES, ImageSlot, PreviewProvider, SelectedFile};
use crate::util::format::format_kb;

/// What the card shows for a filled slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotPreview {
    pub name: String,
    pub size: String,
    pub url: Option<String>,
}

impl SlotPreview {
    pub fn from_slot<P: PreviewProvider>(slot: &ImageSlot<P>) -> Self {
        Self {
            name: slot.image().name.clone(),
            size: format_kb(slot.image().size_bytes),
            url: slot.preview_url().map(str::to_owned),
        }
    }
}

#[component]
pub fn UploadCard(
    /// Card header.
    title: &'static str,
    /// Drop zone heading.
    heading: &'static str,
    hint: &'static str,
    /// Alt text of the preview image.
    alt: &'static str,
    #[prop(into)] preview: Signal<Option<SlotPreview>>,
    on_files: Callback<Vec<SelectedFile>>,
) -> impl IntoView {
    let drag_active = RwSignal::new(false);

    view! {
        <div class="card animate-in">
            <div class="card-header">
                <h3>{title}</h3>
            </div>
            <div class="card-body">
                <label
                    class="upload-zone"
                    class:active=move || drag_active.get()
                    on:dragover=move |ev: leptos::ev::DragEvent| {
                        ev.prevent_default();
                        drag_active.set(true);
                    }
                    on:dragleave=move |_| drag_active.set(false)
                    on:drop=move |ev: leptos::ev::DragEvent| {
                        ev.prevent_default();
                        drag_active.set(false);
                        on_files.run(dropped_files(&ev));
                    }
                >
                    <input
                        type="file"
                        class="upload-input"
                        accept=ACCEPTED_MIME_TYPES
                        on:change=move |ev: leptos::ev::Event| on_files.run(selected_files(&ev))
                    />
                    <div class="upload-icon" aria-hidden="true">"⇪"</div>
                    <h4>{heading}</h4>
                    <p>{hint}</p>
                </label>
                {move || {
                    preview
                        .get()
                        .map(|p| {
                            view! {
                                <div class="upload-preview">
                                    {p.url.map(|src| view! { <img src=src alt=alt/> })}
                                    <div class="file-info">
                                        <span>{p.name}</span>
                                        <span>{p.size}</span>
                                    </div>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn file_list(list: &web_sys::FileList) -> Vec<SelectedFile> {
    (0..list.length()).filter_map(|i| list.get(i)).map(SelectedFile::from_web_file).collect()
}

#[cfg(feature = "hydrate")]
fn selected_files(ev: &leptos::ev::Event) -> Vec<SelectedFile> {
    let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
        return Vec::new();
    };
    let files = input.files().map(|list| file_list(&list)).unwrap_or_default();
    input.set_value("");
    files
}

#[cfg(feature = "hydrate")]
fn dropped_files(ev: &leptos::ev::DragEvent) -> Vec<SelectedFile> {
    ev.data_transfer().and_then(|dt| dt.files()).map(|list| file_list(&list)).unwrap_or_default()
}

#[cfg(not(feature = "hydrate"))]
fn selected_files(_ev: &leptos::ev::Event) -> Vec<SelectedFile> {
    Vec::new()
}

#[cfg(not(feature = "hydrate"))]
fn dropped_files(_ev: &leptos::ev::DragEvent) -> Vec<SelectedFile> {
    Vec::new()
}
