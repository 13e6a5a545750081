//! UI Components
//!
//! Reusable UI components for the desktop application.

mod carousel;
mod note_card;
mod note_form;
mod note_list;
mod sign_in;

pub use carousel::CarouselView;
pub use note_card::NoteCard;
pub use note_form::NoteForm;
pub use note_list::NoteList;
pub use sign_in::SignInPanel;
