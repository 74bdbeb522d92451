//! Schema layer: YAML document -> sorted field specs.

pub mod load;
pub mod value;

pub use load::{FieldSpec, Schema, load_schema, parse_schema};
pub use value::Value;
