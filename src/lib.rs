//! config-gen: typed Go accessors for an etcd-backed runtime config.
//!
//! Pipeline:
//! 1. `schema` reads config_schema.yaml into sorted field specs.
//! 2. `model` builds one `Field` per entry; `literal` and `duration` turn
//!    each default into a Go expression.
//! 3. `render` fills the config.go / fake.go templates and `emit` formats
//!    and writes them.

pub mod duration;
pub mod emit;
pub mod error;
pub mod literal;
pub mod model;
pub mod render;
pub mod schema;

use std::path::Path;

pub use error::{DurationError, GenError};
pub use literal::DurationStrings;
pub use model::{Field, FieldBuilder, GenerationPlan};

pub type Result<T> = anyhow::Result<T>;

/// Load a schema file and build its generation plan.
pub fn plan_from_file(path: &Path, duration_strings: DurationStrings) -> Result<GenerationPlan> {
    let schema = schema::load_schema(path)?;
    let plan = FieldBuilder::new(duration_strings).build_all(&schema)?;
    tracing::info!(
        fields = plan.fields.len(),
        uses_time = plan.uses_time(),
        "built generation plan"
    );
    Ok(plan)
}
