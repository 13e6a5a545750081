//! Sign-in gate component

use dioxus::prelude::*;

use crate::state::AppState;

/// Minimal email/password gate shown while no session is active.
#[component]
pub fn SignInPanel() -> Element {
    let mut state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_signing_in = use_signal(|| false);

    let sign_in = move |_| {
        if is_signing_in() {
            return;
        }
        let Some(services) = (state.services)() else {
            return;
        };

        is_signing_in.set(true);
        state.auth_error.set(None);
        let email_value = email.read().clone();
        let password_value = password.read().clone();
        spawn(async move {
            let auth = services.auth();
            match auth.sign_in(&email_value, &password_value).await {
                Ok(session) => match services.build_synchronizer(&session) {
                    Ok(sync) => {
                        state.session.set(Some(session));
                        state.synchronizer.set(Some(sync));
                        password.set(String::new());
                        state.refresh_notes().await;
                    }
                    Err(error) => {
                        tracing::error!("Failed to build synchronizer: {error}");
                        state.auth_error.set(Some(error.to_string()));
                    }
                },
                Err(error) => {
                    tracing::warn!("Sign-in failed: {error}");
                    state.auth_error.set(Some(error.to_string()));
                }
            }
            is_signing_in.set(false);
        });
    };

    rsx! {
        div {
            class: "sign-in",

            h2 { "Sign in" }

            input {
                class: "sign-in-field",
                r#type: "email",
                placeholder: "Email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            input {
                class: "sign-in-field",
                r#type: "password",
                placeholder: "Password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }

            if let Some(message) = (state.auth_error)() {
                p { class: "form-error", "{message}" }
            }

            button {
                class: "sign-in-submit",
                disabled: is_signing_in(),
                onclick: sign_in,
                "Sign in"
            }
        }
    }
}
