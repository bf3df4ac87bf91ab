//! Package descriptors and the `.pc` file format.
//!
//! - `expand` - `${name}` variable substitution
//! - `parser` - two-section `.pc` parser
//! - `descriptor` - the parsed [`PkgConfig`] and its serialization

mod descriptor;
pub mod expand;
pub mod parser;

pub use descriptor::PkgConfig;
pub use expand::{Variables, expand};
pub use parser::{parse, parse_with_vars};
