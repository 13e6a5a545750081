//! Note card component

use dioxus::prelude::*;

use zukan_core::models::Note;

/// A single registered Pokémon entry.
#[component]
pub fn NoteCard(note: Note, ondelete: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "note-card",

            h4 { "{note.name}" }
            p { class: "note-kind", "Type: {note.description}" }

            if let Some(url) = &note.image_url {
                img {
                    class: "note-image",
                    src: "{url}",
                    alt: "visual aid for {note.name}",
                }
            }

            button {
                class: "note-delete",
                onclick: move |_| ondelete.call(()),
                "Delete"
            }
        }
    }
}
