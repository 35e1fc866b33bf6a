//! Structured sample fields.

pub mod depth_map;
pub mod instance_masks;

pub use burn::tensor::{backend::Backend, Bool, Int, Tensor, TensorData};
pub use depth_map::*;
pub use instance_masks::*;
