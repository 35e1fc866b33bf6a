//! Depth maps with camera intrinsics.

pub use super::*;

use glam::{Mat4, Vec4};

/// A depth map and the camera it was captured with.
#[derive(Clone, Debug)]
pub struct DepthMap<B: Backend> {
    /// `[H, W]`
    pub depth_map: Tensor<B, 2>,
    /// The pinhole intrinsic in **row-major order**, i.e., `K[row][col]`.
    ///
    /// ```plaintext
    /// [f_x 0   c_x 0]
    /// [0   f_y c_y 0]
    /// [0   0   1   0]
    /// [0   0   0   1]
    /// ```
    pub intrinsic: [[f32; 4]; 4],
}

impl<B: Backend> DepthMap<B> {
    /// The intrinsic as a matrix.
    #[inline]
    pub fn intrinsic_matrix(&self) -> Mat4 {
        intrinsic_matrix(&self.intrinsic)
    }

    /// Back-projecting pixels with positive depth into camera space.
    ///
    /// The shape is `[N, 3]`, where `N` is the count of such pixels.
    pub fn unproject(&self) -> Tensor<B, 2> {
        let [_, width] = self.depth_map.dims();
        let intrinsic_inverse = self.intrinsic_matrix().inverse();

        let points = self
            .depth_map
            .to_data()
            .iter::<f32>()
            .enumerate()
            .filter(|(_, depth)| *depth > 0.0)
            .fold(Vec::<f32>::new(), |mut points, (offset, depth)| {
                let x = (offset % width) as f32;
                let y = (offset / width) as f32;
                let point =
                    intrinsic_inverse * Vec4::new(x * depth, y * depth, depth, 1.0);
                points.extend(point.truncate().to_array());
                points
            });
        let point_count = points.len() / 3;

        Tensor::from_data(
            TensorData::new(points, [point_count, 3]),
            &self.depth_map.device(),
        )
    }
}

/// Converting a row-major intrinsic into a matrix.
#[inline]
pub fn intrinsic_matrix(intrinsic: &[[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(intrinsic).transpose()
}
