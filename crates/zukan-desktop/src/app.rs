//! Main application component

use std::sync::Arc;

use dioxus::prelude::*;

use crate::services::AppServices;
use crate::state::AppState;
use crate::views::Home;

/// Root application component
#[component]
pub fn App() -> Element {
    // State signals
    let notes = use_signal(Vec::new);
    let mut session = use_signal(|| None);
    let mut services = use_signal(|| None);
    let mut synchronizer = use_signal(|| None);
    let mut auth_error = use_signal(|| None::<String>);
    let mut services_initialized = use_signal(|| false);

    let mut state = AppState {
        notes,
        session,
        services,
        synchronizer,
        auth_error,
    };

    // Initialize collaborator clients asynchronously (only once)
    use_effect(move || {
        if services_initialized() {
            return;
        }
        services_initialized.set(true); // Mark immediately to prevent double init

        spawn(async move {
            let app_services = match AppServices::from_env() {
                Ok(app_services) => Arc::new(app_services),
                Err(error) => {
                    tracing::error!("Failed to initialize services: {error}");
                    auth_error.set(Some(error.to_string()));
                    return;
                }
            };

            // Restore a persisted session if one is still valid
            match app_services.auth().restore_session().await {
                Ok(Some(restored)) => match app_services.build_synchronizer(&restored) {
                    Ok(sync) => {
                        session.set(Some(restored));
                        synchronizer.set(Some(sync));
                        state.refresh_notes().await;
                    }
                    Err(error) => {
                        tracing::error!("Failed to build synchronizer: {error}");
                        auth_error.set(Some(error.to_string()));
                    }
                },
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!("Session restore failed: {error}");
                }
            }

            services.set(Some(app_services));
        });
    });

    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("/assets/theme.css") }

        div {
            class: "app-container",
            Home {}
        }
    }
}
