//! Camera frustum geometry.
//!
//! The frustum is the truncated pyramid seen by a pinhole camera between
//! two depths. Voxelizing it yields the grid the 3D volumes live in.

pub use crate::structure::intrinsic_matrix;

use glam::{Mat4, Vec3, Vec4};

/// The eight corners of a frustum in camera space.
///
/// The near plane comes first, each plane in the order
/// `(0, 0)`, `(0, H)`, `(W, H)`, `(W, 0)` of the image.
pub type Frustum = [Vec3; 8];

/// The voxel extent of a frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumVolume {
    /// The voxel count along each axis.
    pub dimensions: [u32; 3],
    /// The minimum corner in voxel units.
    pub origin: Vec3,
}

/// Generating the frustum of `image_size` between `depth_min` and `depth_max`.
///
/// `image_size` is `(width, height)`.
pub fn generate_frustum(
    image_size: (u32, u32),
    intrinsic_inverse: Mat4,
    depth_min: f32,
    depth_max: f32,
) -> Frustum {
    let (width, height) = (image_size.0 as f32, image_size.1 as f32);
    let corners = [(0.0, 0.0), (0.0, height), (width, height), (width, 0.0)];

    let mut frustum = [Vec3::ZERO; 8];
    [depth_min, depth_max]
        .into_iter()
        .flat_map(|depth| corners.map(|(x, y)| Vec4::new(x * depth, y * depth, depth, 1.0)))
        .zip(frustum.iter_mut())
        .for_each(|(pixel, corner)| {
            *corner = (intrinsic_inverse * pixel).truncate();
        });

    frustum
}

/// Voxelizing the bounding box of `frustum` with voxels of `voxel_size`.
pub fn generate_frustum_volume(
    frustum: &Frustum,
    voxel_size: f32,
) -> FrustumVolume {
    let (min, max) = frustum.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), corner| (min.min(*corner), max.max(*corner)),
    );
    let (min, max) = (min / voxel_size, max / voxel_size);
    let dimensions = (max - min).to_array().map(|extent| extent as u32 + 1);

    FrustumVolume {
        dimensions,
        origin: min,
    }
}

/// The offsets centering `volume` inside a grid of `grid_dimensions`.
pub fn compute_frustum_padding(
    volume: &FrustumVolume,
    grid_dimensions: [u32; 3],
) -> Vec3 {
    let difference = Vec3::from_array(grid_dimensions.map(|dim| dim as f32))
        - Vec3::from_array(volume.dimensions.map(|dim| dim as f32));
    (difference / 2.0).floor()
}

/// Computing the transform from camera space to voxel coordinates.
///
/// The frustum is voxelized and centered inside a grid of `grid_dimensions`.
/// `intrinsic` is in row-major order.
pub fn compute_camera_to_frustum(
    intrinsic: &[[f32; 4]; 4],
    image_size: (u32, u32),
    depth_min: f32,
    depth_max: f32,
    voxel_size: f32,
    grid_dimensions: [u32; 3],
) -> Mat4 {
    let intrinsic_inverse = intrinsic_matrix(intrinsic).inverse();
    let frustum = generate_frustum(image_size, intrinsic_inverse, depth_min, depth_max);
    let volume = generate_frustum_volume(&frustum, voxel_size);
    let padding = compute_frustum_padding(&volume, grid_dimensions);

    Mat4::from_translation(padding - volume.origin)
        * Mat4::from_scale(Vec3::splat(voxel_size.recip()))
}
