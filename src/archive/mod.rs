//! Release archive handling: the entry layout policy and zip extraction.

mod policy;
mod zip;

pub use policy::{is_valid_entry, validate_entry};
pub use zip::ZipExtractor;
