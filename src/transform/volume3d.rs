//! 3D transforms.
//!
//! Volumes are `[X, Y, Z]` before [`Unsqueeze`] and `[C, X, Y, Z]` after it.

pub use super::*;

use burn::tensor::{BasicOps, Element, Numeric};
use codec::Volume;
use rayon::prelude::*;
use structure::InstanceLocations;

/// Converting a host volume into a tensor.
#[derive(Clone, Debug)]
pub struct VolumeToTensor<B: Backend> {
    pub device: B::Device,
}

/// Adding a leading channel dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Unsqueeze;

/// Converting a distance field into a truncated distance field.
///
/// `min(|input|, truncation)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToTdf {
    pub truncation: f32,
}

/// Binarizing a distance field into an occupancy mask.
///
/// `input < threshold`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToBinaryMask {
    pub threshold: f32,
}

/// Resizing the spatial dimensions with trilinear interpolation.
///
/// The output size is `floor(size * scale_factor)`.
/// Sampling follows half-pixel centers, so halving a volume averages
/// each `2 x 2 x 2` block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeTrilinear {
    pub scale_factor: f32,
}

/// Resizing the spatial dimensions with max pooling.
///
/// The output size is `(size + 2 * padding - kernel_size) / stride + 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeMax {
    pub kernel_size: usize,
    pub stride: usize,
    pub padding: usize,
}

/// Remapping labels with a lookup table.
///
/// Labels in `ignore_values` are kept,
/// and labels absent from the table become `fill_value`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    pub ignore_values: Vec<u32>,
    pub fill_value: u32,
}

impl<B: Backend> VolumeToTensor<B> {
    #[inline]
    pub fn new(device: &B::Device) -> Self {
        Self {
            device: device.to_owned(),
        }
    }
}

impl<B: Backend> Transform<Volume<f32>> for VolumeToTensor<B> {
    type Output = Tensor<B, 3>;

    #[inline]
    fn forward(
        &self,
        input: Volume<f32>,
    ) -> Self::Output {
        Tensor::from_data(TensorData::new(input.data, input.dims), &self.device)
    }
}

impl<B: Backend> Transform<Volume<u32>> for VolumeToTensor<B> {
    type Output = Tensor<B, 3, Int>;

    #[inline]
    fn forward(
        &self,
        input: Volume<u32>,
    ) -> Self::Output {
        let data = input.data.into_iter().map(i64::from).collect::<Vec<_>>();
        Tensor::from_data(TensorData::new(data, input.dims), &self.device)
    }
}

impl<B: Backend, K: BasicOps<B>> Transform<Tensor<B, 3, K>> for Unsqueeze {
    type Output = Tensor<B, 4, K>;

    #[inline]
    fn forward(
        &self,
        input: Tensor<B, 3, K>,
    ) -> Self::Output {
        input.unsqueeze::<4>()
    }
}

impl<B: Backend, const D: usize> Transform<Tensor<B, D>> for ToTdf {
    type Output = Tensor<B, D>;

    #[inline]
    fn forward(
        &self,
        input: Tensor<B, D>,
    ) -> Self::Output {
        input.abs().clamp_max(self.truncation)
    }
}

impl<B: Backend, const D: usize> Transform<Tensor<B, D>> for ToBinaryMask {
    type Output = Tensor<B, D, Bool>;

    #[inline]
    fn forward(
        &self,
        input: Tensor<B, D>,
    ) -> Self::Output {
        input.lower_elem(self.threshold)
    }
}

impl<B: Backend> Transform<Tensor<B, 4>> for ResizeTrilinear {
    type Output = Tensor<B, 4>;

    fn forward(
        &self,
        input: Tensor<B, 4>,
    ) -> Self::Output {
        (1..4).fold(input, |output, dim| {
            let size_out =
                (output.dims()[dim] as f64 * self.scale_factor as f64).floor() as usize;
            interpolate_linear(output, dim, size_out)
        })
    }
}

impl<B: Backend, K> Transform<Tensor<B, 4, K>> for ResizeMax
where
    K: Numeric<B>,
    K::Elem: Element,
{
    type Output = Tensor<B, 4, K>;

    fn forward(
        &self,
        input: Tensor<B, 4, K>,
    ) -> Self::Output {
        (1..4).fold(input, |output, dim| self.pool_max(output, dim))
    }
}

impl<'a> Transform<(Volume<u32>, &'a InstanceLocations)> for Mapping {
    type Output = Volume<u32>;

    fn forward(
        &self,
        (mut input, mapping): (Volume<u32>, &'a InstanceLocations),
    ) -> Self::Output {
        input.data.par_iter_mut().for_each(|label| {
            if !self.ignore_values.contains(label) {
                *label = mapping.get(label).copied().unwrap_or(self.fill_value);
            }
        });
        input
    }
}

impl ResizeMax {
    /// The output size along one dimension of `size_in`.
    #[inline]
    pub fn size_out(
        &self,
        size_in: usize,
    ) -> usize {
        (size_in + 2 * self.padding).saturating_sub(self.kernel_size) / self.stride + 1
    }

    /// Max pooling along `dim`.
    ///
    /// Padded taps are clamped to the border, which never changes the maximum
    /// as long as `padding < kernel_size`.
    fn pool_max<B: Backend, K>(
        &self,
        input: Tensor<B, 4, K>,
        dim: usize,
    ) -> Tensor<B, 4, K>
    where
        K: Numeric<B>,
        K::Elem: Element,
    {
        let size_in = input.dims()[dim];
        if size_in == 0 || self.kernel_size == 0 || self.stride == 0 {
            return input;
        }
        let size_out = self.size_out(size_in);
        let device = input.device();

        (0..self.kernel_size)
            .map(|tap| {
                let indices = (0..size_out)
                    .map(|index| {
                        (index * self.stride + tap)
                            .saturating_sub(self.padding)
                            .min(size_in - 1) as i64
                    })
                    .collect::<Vec<_>>();
                let indices = Tensor::<B, 1, Int>::from_data(
                    TensorData::new(indices, [size_out]),
                    &device,
                );
                input.to_owned().select(dim, indices)
            })
            .reduce(|output, tap| output.max_pair(tap))
            .unwrap_or(input)
    }
}

/// Linear interpolation along `dim` with half-pixel centers.
fn interpolate_linear<B: Backend>(
    input: Tensor<B, 4>,
    dim: usize,
    size_out: usize,
) -> Tensor<B, 4> {
    let size_in = input.dims()[dim];
    if size_in == size_out || size_in == 0 || size_out == 0 {
        return input;
    }
    let scale = size_in as f64 / size_out as f64;
    let device = input.device();

    let (indices_lower, indices_upper, weights) = (0..size_out).fold(
        (
            Vec::<i64>::with_capacity(size_out),
            Vec::<i64>::with_capacity(size_out),
            Vec::<f32>::with_capacity(size_out),
        ),
        |(mut indices_lower, mut indices_upper, mut weights), index| {
            let source = ((index as f64 + 0.5) * scale - 0.5).max(0.0);
            let lower = (source.floor() as usize).min(size_in - 1);
            let upper = (lower + 1).min(size_in - 1);
            indices_lower.push(lower as i64);
            indices_upper.push(upper as i64);
            weights.push((source - lower as f64) as f32);
            (indices_lower, indices_upper, weights)
        },
    );

    let mut shape = [1; 4];
    shape[dim] = size_out;
    let weights =
        Tensor::<B, 1>::from_data(TensorData::new(weights, [size_out]), &device)
            .reshape(shape);
    let indices_lower =
        Tensor::<B, 1, Int>::from_data(TensorData::new(indices_lower, [size_out]), &device);
    let indices_upper =
        Tensor::<B, 1, Int>::from_data(TensorData::new(indices_upper, [size_out]), &device);

    let lower = input.to_owned().select(dim, indices_lower);
    let upper = input.select(dim, indices_upper);
    lower.to_owned() + (upper - lower) * weights
}
