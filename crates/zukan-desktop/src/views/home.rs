//! Home view - main application screen

use dioxus::prelude::*;

use crate::components::{CarouselView, NoteForm, NoteList, SignInPanel};
use crate::state::AppState;

/// Home view component - the memo book behind the sign-in gate.
#[component]
pub fn Home() -> Element {
    let mut state = use_context::<AppState>();
    let services_ready = (state.services)().is_some();
    let signed_in = (state.session)().is_some();

    let sign_out = move |_| {
        let Some(services) = (state.services)() else {
            return;
        };
        let Some(session) = (state.session)() else {
            return;
        };
        spawn(async move {
            if let Err(error) = services.auth().sign_out(&session.access_token).await {
                tracing::warn!("Sign-out failed: {error}");
            }
            state.session.set(None);
            state.synchronizer.set(None);
            state.notes.set(Vec::new());
        });
    };

    rsx! {
        div {
            class: "home-container",

            h1 { "Pokémon Memo Book" }

            if !services_ready {
                if let Some(message) = (state.auth_error)() {
                    p { class: "form-error", "{message}" }
                } else {
                    p { "Loading..." }
                }
            } else if !signed_in {
                SignInPanel {}
            } else {
                CarouselView {}
                hr {}
                NoteForm {}
                hr {}
                NoteList {}
                button {
                    class: "sign-out",
                    onclick: sign_out,
                    "Sign out"
                }
            }
        }
    }
}
