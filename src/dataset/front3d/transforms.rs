pub use super::*;

use crate::{
    preset::front3d as preset,
    transform::{
        Chain, Compose, ImageToTensor, Mapping, Normalize, ResizeMax, ResizeNearest,
        ResizeTrilinear, SegmentationToMasks, ToBinaryMask, ToDepthMap, ToTdf,
        Transform, Unsqueeze, VolumeToTensor,
    },
};
use burn::tensor::backend::Backend;

/// The chains of [`Front3dDataset`], one per derived field.
///
/// Built once from [`Front3dConfig`] and shared by all samples.
#[derive(Clone, Debug)]
pub struct Front3dTransforms<B: Backend> {
    /// `RgbImage -> [3, H, W]`
    pub color: Chain<ImageToTensor<B>, Normalize>,
    /// `DepthImage -> DepthMap`
    pub depth: Chain<Chain<ResizeNearest, ImageToTensor<B>>, ToDepthMap>,
    pub instance2d: SegmentationToMasks<B>,
    /// `Volume<f32> -> [1, X, Y, Z]`, truncated at the decoding default.
    pub geometry: Chain<Chain<VolumeToTensor<B>, Unsqueeze>, ToTdf>,
    pub geometry_truncate: ToTdf,
    pub occupancy_256: ToBinaryMask,
    pub occupancy_128: Chain<ResizeTrilinear, ToBinaryMask>,
    pub occupancy_64: Chain<ResizeTrilinear, ToBinaryMask>,
    /// `Volume<u32> -> [1, X, Y, Z]`
    pub semantic3d: Chain<VolumeToTensor<B>, Unsqueeze>,
    /// `(Volume<u32>, &InstanceLocations) -> [1, X, Y, Z]`
    pub instance3d: Chain<Chain<Mapping, VolumeToTensor<B>>, Unsqueeze>,
    pub segmentation3d_128: ResizeMax,
    pub segmentation3d_64: ResizeMax,
    /// `Volume<f32> -> [1, X, Y, Z]`
    pub weighting: Chain<VolumeToTensor<B>, Unsqueeze>,
    pub weighting3d_128: ResizeTrilinear,
    pub weighting3d_64: ResizeTrilinear,
}

impl<B: Backend> Front3dTransforms<B> {
    pub fn new(
        config: &Front3dConfig,
        device: &B::Device,
    ) -> Self {
        let (depth_width, depth_height) = config.depth_image_size;
        let half = ResizeTrilinear { scale_factor: 0.5 };
        let quarter = ResizeTrilinear { scale_factor: 0.25 };

        Self {
            color: ImageToTensor::new(device).then(Normalize {
                mean: preset::IMAGENET_MEAN,
                std: preset::IMAGENET_STD,
            }),
            depth: ResizeNearest {
                width: depth_width,
                height: depth_height,
            }
            .then(ImageToTensor::new(device))
            .then(ToDepthMap {
                intrinsic: config.intrinsic,
            }),
            instance2d: SegmentationToMasks {
                device: device.to_owned(),
                max_instances: config.max_instances,
                min_instance_pixels: config.min_instance_pixels,
                shuffle: config.shuffle_instances,
                stuff_classes: config.stuff_classes.to_owned(),
            },
            geometry: VolumeToTensor::new(device).then(Unsqueeze).then(ToTdf {
                truncation: preset::GEOMETRY_TRUNCATION,
            }),
            geometry_truncate: ToTdf {
                truncation: config.truncation,
            },
            occupancy_256: ToBinaryMask {
                threshold: config.truncation,
            },
            occupancy_128: half.then(ToBinaryMask {
                threshold: preset::OCCUPANCY_THRESHOLD_128,
            }),
            occupancy_64: quarter.then(ToBinaryMask {
                threshold: preset::OCCUPANCY_THRESHOLD_64,
            }),
            semantic3d: VolumeToTensor::new(device).then(Unsqueeze),
            instance3d: Mapping {
                ignore_values: vec![preset::IGNORE_LABEL],
                fill_value: preset::IGNORE_LABEL,
            }
            .then(VolumeToTensor::new(device))
            .then(Unsqueeze),
            segmentation3d_128: ResizeMax {
                kernel_size: 4,
                stride: 2,
                padding: 1,
            },
            segmentation3d_64: ResizeMax {
                kernel_size: 8,
                stride: 4,
                padding: 2,
            },
            weighting: VolumeToTensor::new(device).then(Unsqueeze),
            weighting3d_128: half,
            weighting3d_64: quarter,
        }
    }
}
