pub use super::*;

use crate::frustum;
use burn::config::Config;
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// The policy of decoding the 3D segmentation of a sample.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SegmentationDecode {
    /// Decoding only if [`Field::Semantic3d`] or [`Field::Instance3d`] is selected.
    #[default]
    OnDemand,
    /// Decoding for every sample, which also loads the weighting volumes.
    Always,
}

/// The geometric configuration of [`Front3dDataset`].
#[derive(Config, Debug)]
pub struct Front3dConfig {
    /// The pinhole intrinsic of the depth camera in row-major order.
    #[config(
        default = "[[277.1281435, 0.0, 159.5, 0.0], [0.0, 277.1281435, 119.5, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]]"
    )]
    pub intrinsic: [[f32; 4]; 4],

    /// The edge length of a voxel in meters.
    #[config(default = 0.03)]
    pub voxel_size: f32,

    #[config(default = 0.4)]
    pub depth_min: f32,

    #[config(default = 6.0)]
    pub depth_max: f32,

    /// The full-resolution grid dimensions, `[X, Y, Z]`.
    #[config(default = "[256, 256, 256]")]
    pub grid_dimensions: [u32; 3],

    /// The truncation of the geometry in voxels.
    #[config(default = 3.0)]
    pub truncation: f32,

    /// The cap on 2D instances per image.
    #[config(default = 50)]
    pub max_instances: usize,

    /// Instances covering fewer pixels are dropped.
    #[config(default = 200)]
    pub min_instance_pixels: usize,

    /// `(width, height)`
    #[config(default = "(320, 240)")]
    pub image_size: (u32, u32),

    /// `(width, height)`
    #[config(default = "(160, 120)")]
    pub depth_image_size: (u32, u32),

    /// Semantic classes never extracted as 2D instances.
    #[config(default = "vec![0, 10, 11, 12]")]
    pub stuff_classes: Vec<u32>,

    #[config(default = "SegmentationDecode::OnDemand")]
    pub segmentation_decode: SegmentationDecode,

    /// Shuffling the 2D instances and their locations.
    #[config(default = true)]
    pub shuffle_instances: bool,
}

/// The sample selection of [`Front3dDataset`].
#[derive(Config, Copy, Debug)]
pub struct Front3dDatasetOptions {
    /// Keeping only the first samples if specified.
    pub num_samples: Option<usize>,

    /// Shuffling the file list once at construction.
    #[config(default = false)]
    pub shuffle: bool,

    /// The seed of the file list shuffle.
    ///
    /// The shuffle is not reproducible if unspecified.
    pub seed: Option<u64>,
}

impl Front3dConfig {
    /// The transform from camera space to voxel coordinates of the grid.
    pub fn camera_to_frustum(&self) -> Mat4 {
        frustum::compute_camera_to_frustum(
            &self.intrinsic,
            self.image_size,
            self.depth_min,
            self.depth_max,
            self.voxel_size,
            self.grid_dimensions,
        )
    }

    /// The grid dimensions in tensor order.
    #[inline]
    pub fn grid_shape(&self) -> [usize; 3] {
        self.grid_dimensions.map(|dim| dim as usize)
    }

    /// Checking the values that the transforms rely on.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.truncation > 0.0) {
            return Err(Error::Config(format!(
                "truncation should be positive, got {}",
                self.truncation
            )));
        }
        if !(self.voxel_size > 0.0) {
            return Err(Error::Config(format!(
                "voxel_size should be positive, got {}",
                self.voxel_size
            )));
        }
        if !(self.depth_min < self.depth_max) {
            return Err(Error::Config(format!(
                "depth_min ({}) should be less than depth_max ({})",
                self.depth_min, self.depth_max
            )));
        }
        if self.grid_dimensions.contains(&0) {
            return Err(Error::Config(format!(
                "grid_dimensions should be non-zero, got {:?}",
                self.grid_dimensions
            )));
        }
        Ok(())
    }
}

impl Default for Front3dConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Front3dDatasetOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
