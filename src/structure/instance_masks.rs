//! Instance masks of one image.

pub use super::*;

use std::collections::BTreeMap;

/// A map of source instance id to the location assigned to the instance.
pub type InstanceLocations = BTreeMap<u32, u32>;

/// Instances extracted from a 2D segmentation, as a box list.
#[derive(Clone, Debug)]
pub struct InstanceMasks<B: Backend> {
    /// Image size, `(width, height)`.
    pub image_size: (u32, u32),
    /// Bounding boxes in `[x_min, y_min, x_max, y_max]` order, inclusive.
    ///
    /// The shape is `[N, 4]`.
    pub boxes: Tensor<B, 2>,
    /// `[N, H, W]`
    pub masks: Tensor<B, 3, Bool>,
    /// Semantic labels.
    ///
    /// The shape is `[N]`.
    pub labels: Tensor<B, 1, Int>,
    /// The location of each instance, ranging from `1` to the instance cap.
    ///
    /// The shape is `[N]`.
    pub locations: Tensor<B, 1, Int>,
    /// The location of each source instance id.
    ///
    /// 3D instance ids are remapped through it to agree with the 2D instances.
    pub instance_locations: InstanceLocations,
}

impl<B: Backend> InstanceMasks<B> {
    /// The instance count.
    #[inline]
    pub fn len(&self) -> usize {
        self.instance_locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instance_locations.is_empty()
    }
}
