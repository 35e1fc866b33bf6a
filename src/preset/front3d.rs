//! Constants of the 3D-FRONT renderings.

/// The size of color and segmentation images, `(width, height)`.
pub const IMAGE_SIZE: (u32, u32) = (320, 240);

/// The size of depth maps after resizing, `(width, height)`.
pub const DEPTH_IMAGE_SIZE: (u32, u32) = (160, 120);

/// The per-channel mean of ImageNet in RGB order.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// The per-channel standard deviation of ImageNet in RGB order.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Semantic classes treated as stuff rather than instances.
pub const STUFF_CLASSES: [u32; 4] = [0, 10, 11, 12];

/// The fill value and the truncation of decoded geometry, in voxels.
pub const GEOMETRY_TRUNCATION: f32 = 12.0;

/// The fill value of decoded weighting volumes.
pub const WEIGHTING_DEFAULT: f32 = 1.0;

/// The fill value of the decoded frustum mask.
pub const FRUSTUM_MASK_DEFAULT: f32 = 0.0;

/// The divisor splitting a packed 3D label into semantic and instance ids.
pub const MAX_INSTANCE_ID: u32 = 1000;

/// The label of unlabeled voxels.
pub const IGNORE_LABEL: u32 = 0;

/// The occupancy threshold at half resolution.
pub const OCCUPANCY_THRESHOLD_128: f32 = 6.0;

/// The occupancy threshold at quarter resolution.
pub const OCCUPANCY_THRESHOLD_64: f32 = 8.0;

/// The name of the frustum mask file under the dataset root.
pub const FRUSTUM_MASK_FILE_NAME: &str = "frustum_mask.npz";
