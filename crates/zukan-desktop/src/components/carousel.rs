//! Rotating recommendation carousel component

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use dioxus::prelude::*;

use zukan_core::carousel::{Carousel, SHUFFLE_PERIOD};
use zukan_core::models::{Preset, PRESETS};

use crate::state::AppState;

/// How often the view mirrors the controller's index into a signal.
const VIEW_POLL_PERIOD: Duration = Duration::from_millis(50);

/// The recommended-Pokémon carousel.
///
/// Clicking the image toggles rotation; while paused, a one-click
/// registration action for the displayed Pokémon appears.
#[component]
pub fn CarouselView() -> Element {
    let mut state = use_context::<AppState>();
    let mut carousel = use_signal(|| {
        let mut carousel =
            Carousel::new(PRESETS, SHUFFLE_PERIOD).expect("preset list is non-empty");
        carousel.start();
        carousel
    });
    let mut shown = use_signal(|| 0usize);
    let mut rotating = use_signal(|| true);
    let mut registering = use_signal(|| false);

    // The controller's timer advances a shared index off-screen; mirror
    // it into a signal so the view re-renders on change.
    use_future(move || async move {
        loop {
            tokio::time::sleep(VIEW_POLL_PERIOD).await;
            let index = carousel.read().index();
            if index != shown() {
                shown.set(index);
            }
        }
    });

    let preset: &Preset = &PRESETS[shown()];
    let image_src = format!(
        "data:{};base64,{}",
        preset.content_type,
        BASE64.encode(preset.image)
    );

    let toggle = move |_| {
        let mut controller = carousel.write();
        controller.toggle();
        rotating.set(controller.is_rotating());
    };

    let register_shown = move |_| {
        if registering() {
            return;
        }
        let Some(sync) = state.synchronizer() else {
            return;
        };
        let index = shown();
        registering.set(true);
        spawn(async move {
            match sync.register_preset(index).await {
                Ok(note) => {
                    tracing::info!("Registered preset Pokémon: {}", note.name);
                }
                Err(error) => {
                    tracing::error!("Failed to register preset: {error}");
                }
            }
            state.notes.set(sync.notes().await);
            registering.set(false);
        });
    };

    rsx! {
        div {
            class: "carousel",

            h2 { "Recommended Pokémon" }
            p { class: "carousel-hint", "Click the image!" }

            img {
                class: "carousel-image",
                src: "{image_src}",
                alt: "{preset.name}",
                onclick: toggle,
            }
            p { class: "carousel-name", "{preset.name}" }

            if !rotating() {
                button {
                    class: "carousel-register",
                    disabled: registering(),
                    onclick: register_shown,
                    "Register this one"
                }
            }
        }
    }
}
