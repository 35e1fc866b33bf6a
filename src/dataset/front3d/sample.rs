pub use super::*;

use crate::structure::{DepthMap, InstanceMasks};
use burn::tensor::{backend::Backend, Bool, Int, Tensor};

/// A record of one rendered view of a 3D-FRONT scene.
///
/// Fields that were not selected are `None`.
#[derive(Clone, Debug)]
pub struct Front3dSample<B: Backend> {
    /// The position in the file list.
    pub index: usize,
    /// `scene_id/image_id`
    pub name: String,
    /// The normalized color image, `[3, H, W]`.
    pub color: Option<Tensor<B, 3>>,
    pub depth: Option<DepthMap<B>>,
    pub instance2d: Option<InstanceMasks<B>>,
    pub geometry: Option<Geometry<B>>,
    /// Semantic labels, `[1, X, Y, Z]` at full resolution.
    pub semantic3d: Option<Pyramid<Tensor<B, 4, Int>>>,
    /// Instance labels agreeing with [`InstanceMasks::locations`],
    /// `[1, X, Y, Z]` at full resolution.
    pub instance3d: Option<Pyramid<Tensor<B, 4, Int>>>,
    /// Per-voxel loss weights, `[1, X, Y, Z]` at full resolution.
    pub weighting3d: Option<Pyramid<Tensor<B, 4>>>,
}

/// The scene geometry of a sample.
#[derive(Clone, Debug)]
pub struct Geometry<B: Backend> {
    /// The truncated distance field, `[1, X, Y, Z]`.
    pub geometry: Tensor<B, 4>,
    pub occupancy_256: Tensor<B, 4, Bool>,
    pub occupancy_128: Tensor<B, 4, Bool>,
    pub occupancy_64: Tensor<B, 4, Bool>,
    /// The cells inside the camera frustum, `[X, Y, Z]`.
    pub frustum_mask: Tensor<B, 3, Bool>,
}

/// A volume at full, half and quarter resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Pyramid<T> {
    pub full: T,
    pub half: T,
    pub quarter: T,
}

impl<B: Backend> Front3dSample<B> {
    /// A sample carrying no data field.
    #[inline]
    pub fn new(
        index: usize,
        name: String,
    ) -> Self {
        Self {
            index,
            name,
            color: None,
            depth: None,
            instance2d: None,
            geometry: None,
            semantic3d: None,
            instance3d: None,
            weighting3d: None,
        }
    }

    /// The flat names of the present fields.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["index", "name"];

        if self.color.is_some() {
            names.push("color");
        }
        if self.depth.is_some() {
            names.push("depth");
        }
        if self.instance2d.is_some() {
            names.push("instance2d");
        }
        if self.geometry.is_some() {
            names.extend([
                "geometry",
                "occupancy_256",
                "occupancy_128",
                "occupancy_64",
                "frustum_mask",
            ]);
        }
        if self.semantic3d.is_some() {
            names.extend(["semantic3d", "semantic3d_128", "semantic3d_64"]);
        }
        if self.instance3d.is_some() {
            names.extend(["instance3d", "instance3d_128", "instance3d_64"]);
        }
        if self.weighting3d.is_some() {
            names.extend(["weighting3d", "weighting3d_128", "weighting3d_64"]);
        }

        names
    }

    /// Splitting the name into `(scene_id, image_id)`.
    #[inline]
    pub fn scene_and_image_id(&self) -> Result<(&str, &str), Error> {
        split_sample_name(&self.name)
    }
}

impl<T> Pyramid<T> {
    /// Applying `f` to each level.
    pub fn map<U>(
        self,
        mut f: impl FnMut(T) -> U,
    ) -> Pyramid<U> {
        Pyramid {
            full: f(self.full),
            half: f(self.half),
            quarter: f(self.quarter),
        }
    }
}

/// Splitting `scene_id/image_id` at the first slash.
pub fn split_sample_name(name: &str) -> Result<(&str, &str), Error> {
    name.split_once('/')
        .filter(|(scene_id, image_id)| {
            !scene_id.is_empty() && !image_id.is_empty() && !image_id.contains('/')
        })
        .ok_or_else(|| Error::MalformedSampleName(name.into()))
}
