//! Recommended Pokémon presets shown in the carousel.
//!
//! The preset list is fixed at compile time; images are embedded so a
//! one-click registration can upload the bytes without touching disk.

/// A carousel display item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Pokémon name
    pub name: &'static str,
    /// Pokémon type
    pub kind: &'static str,
    /// Literal image file name, used as the storage key on registration
    pub file_name: &'static str,
    /// Embedded image bytes
    pub image: &'static [u8],
    /// Image content type for uploads
    pub content_type: &'static str,
}

/// The fixed display-item list, in carousel order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Usokki",
        kind: "rock",
        file_name: "usokki0185.svg",
        image: include_bytes!("../../assets/usokki0185.svg"),
        content_type: "image/svg+xml",
    },
    Preset {
        name: "Mahoippu",
        kind: "fairy",
        file_name: "mahoippu0869.svg",
        image: include_bytes!("../../assets/mahoippu0869.svg"),
        content_type: "image/svg+xml",
    },
    Preset {
        name: "Ponita",
        kind: "fire",
        file_name: "ponita0077.svg",
        image: include_bytes!("../../assets/ponita0077.svg"),
        content_type: "image/svg+xml",
    },
];
