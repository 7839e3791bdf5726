//! Package-path substitution: open the archive, repair fragmented
//! placeholders, substitute text and images, and serialize the mutated
//! container back to bytes.

pub mod container;
pub mod drawing;
pub mod error;
pub mod patcher;
pub mod rels;

pub use container::{Container, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART};
pub use drawing::EMU_PER_PIXEL;
pub use error::PatchError;
pub use patcher::{DocxPatcher, PatchOutcome};
