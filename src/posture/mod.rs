//! Named joint postures.

mod registry;

pub use registry::PostureRegistry;
