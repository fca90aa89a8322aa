// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Container handles, image references, and stage names.

mod id;
mod image_ref;
mod stage_name;

pub use id::{ContainerId, Id};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use stage_name::{StageName, StageNameError};
