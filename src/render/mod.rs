//! Go source rendering for a generation plan.

pub mod go;

pub use go::{GENERATED_HEADER, render_config, render_fake};
