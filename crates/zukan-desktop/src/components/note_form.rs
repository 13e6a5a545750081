//! Registration form component

use dioxus::prelude::*;

use zukan_core::sync::ImageUpload;

use crate::state::AppState;

/// A picked image file, staged for upload on submit.
#[derive(Clone, PartialEq, Eq)]
struct PickedImage {
    file_name: String,
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// Form for registering a Pokémon: name, type, and an image.
#[component]
pub fn NoteForm() -> Element {
    let mut state = use_context::<AppState>();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut image = use_signal(|| None::<PickedImage>);
    let mut form_error = use_signal(|| None::<String>);
    let mut is_saving = use_signal(|| false);

    let pick_image = move |_| {
        spawn(async move {
            let picked = rfd::AsyncFileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "svg"])
                .pick_file()
                .await;
            if let Some(file) = picked {
                let file_name = file.file_name();
                let content_type = mime_guess::from_path(&file_name)
                    .first()
                    .map(|mime| mime.essence_str().to_string());
                let bytes = file.read().await;
                image.set(Some(PickedImage {
                    file_name,
                    bytes,
                    content_type,
                }));
            }
        });
    };

    let submit = move |_| {
        if is_saving() {
            return;
        }

        // Local validation: no collaborator call for an incomplete form.
        if name.read().trim().is_empty() || description.read().trim().is_empty() {
            form_error.set(Some("Name and type are required".to_string()));
            return;
        }
        let Some(picked) = image() else {
            form_error.set(Some("Pick an image first".to_string()));
            return;
        };
        let Some(sync) = state.synchronizer() else {
            return;
        };

        form_error.set(None);
        is_saving.set(true);
        let name_value = name.read().clone();
        let description_value = description.read().clone();
        spawn(async move {
            let result = sync
                .create(
                    &name_value,
                    &description_value,
                    Some(ImageUpload {
                        file_name: picked.file_name,
                        bytes: picked.bytes,
                        content_type: picked.content_type,
                    }),
                )
                .await;

            match result {
                Ok(note) => {
                    tracing::info!("Registered Pokémon: {}", note.name);
                    name.set(String::new());
                    description.set(String::new());
                    image.set(None);
                }
                Err(error) => {
                    tracing::error!("Failed to register Pokémon: {error}");
                    form_error.set(Some(error.to_string()));
                }
            }
            state.notes.set(sync.notes().await);
            is_saving.set(false);
        });
    };

    let picked_name = image
        .read()
        .as_ref()
        .map_or_else(|| "No image picked".to_string(), |img| img.file_name.clone());

    rsx! {
        div {
            class: "note-form",

            h2 { "Register a Pokémon" }

            input {
                class: "note-form-field",
                placeholder: "Pokémon name",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }
            input {
                class: "note-form-field",
                placeholder: "Pokémon type",
                value: "{description}",
                oninput: move |evt| description.set(evt.value()),
            }

            div {
                class: "note-form-file",
                button { onclick: pick_image, "Choose image..." }
                span { "{picked_name}" }
            }

            if let Some(message) = form_error() {
                p { class: "form-error", "{message}" }
            }

            button {
                class: "note-form-submit",
                disabled: is_saving(),
                onclick: submit,
                "Register"
            }
        }
    }
}
