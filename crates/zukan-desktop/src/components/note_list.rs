//! Note list component

use dioxus::prelude::*;

use super::NoteCard;
use crate::state::AppState;

/// Grid of registered Pokémon entries.
#[component]
pub fn NoteList() -> Element {
    let mut state = use_context::<AppState>();
    let notes = (state.notes)();

    rsx! {
        div {
            class: "note-list",

            h2 { "Registered Pokémon" }

            if notes.is_empty() {
                p { class: "note-list-empty", "Nothing registered yet" }
            } else {
                div {
                    class: "note-grid",
                    for note in notes {
                        {
                            let key = note.id.to_string();
                            let note_id = note.id.clone();
                            rsx! {
                                NoteCard {
                                    key: "{key}",
                                    note,
                                    ondelete: move |()| {
                                        let id = note_id.clone();
                                        let Some(sync) = state.synchronizer() else {
                                            return;
                                        };
                                        spawn(async move {
                                            if let Err(error) = sync.remove(&id).await {
                                                tracing::error!("Failed to delete note: {error}");
                                            }
                                            state.notes.set(sync.notes().await);
                                        });
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
