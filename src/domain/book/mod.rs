pub mod draft;
pub mod entity;
pub mod invariants;

pub use draft::{BookDraft, BookInput};
pub use entity::{Book, ReadingStatus};
pub use invariants::{
    check_book, max_publication_year, validate_draft, validate_draft_for_year, BookField,
    FieldErrors,
};
