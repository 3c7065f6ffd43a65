//! XML helpers shared by the vector backend.

mod escape;

pub use escape::{escape_xml, write_xml_escaped};
