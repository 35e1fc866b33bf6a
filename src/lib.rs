#![allow(clippy::excessive_precision)]
#![allow(missing_docs)]

pub mod catalog;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod frustum;
pub mod metric;
pub mod preset;
pub mod structure;
pub mod transform;
