//! 2D transforms.

pub use super::*;

use ::image::RgbImage;
use codec::DepthImage;
use structure::DepthMap;

/// Converting an image into a tensor.
///
/// - A color image becomes `[3, H, W]` ranging from `0.0` to `1.0`.
/// - A depth image becomes `[H, W]`.
#[derive(Clone, Debug)]
pub struct ImageToTensor<B: Backend> {
    pub device: B::Device,
}

/// Standardizing each channel of a `[3, H, W]` tensor.
///
/// `(input - mean) / std`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

/// Resizing a depth image with nearest-neighbor sampling.
///
/// Each target pixel copies the source pixel under its center,
/// so depth values pass through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeNearest {
    pub width: u32,
    pub height: u32,
}

/// Attaching the camera intrinsic to a depth tensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToDepthMap {
    pub intrinsic: [[f32; 4]; 4],
}

impl<B: Backend> ImageToTensor<B> {
    #[inline]
    pub fn new(device: &B::Device) -> Self {
        Self {
            device: device.to_owned(),
        }
    }
}

impl<B: Backend> Transform<RgbImage> for ImageToTensor<B> {
    type Output = Tensor<B, 3>;

    fn forward(
        &self,
        input: RgbImage,
    ) -> Self::Output {
        let (width, height) = input.dimensions();
        let (width, height) = (width as usize, height as usize);

        // [H, W, 3] -> [3, H, W]
        let mut data = vec![0.0_f32; 3 * height * width];
        input.enumerate_pixels().for_each(|(x, y, pixel)| {
            let offset = y as usize * width + x as usize;
            pixel.0.iter().enumerate().for_each(|(channel, &value)| {
                data[channel * height * width + offset] = value as f32 / 255.0;
            });
        });

        Tensor::from_data(TensorData::new(data, [3, height, width]), &self.device)
    }
}

impl<B: Backend> Transform<DepthImage> for ImageToTensor<B> {
    type Output = Tensor<B, 2>;

    fn forward(
        &self,
        input: DepthImage,
    ) -> Self::Output {
        let (width, height) = input.dimensions();
        Tensor::from_data(
            TensorData::new(input.into_raw(), [height as usize, width as usize]),
            &self.device,
        )
    }
}

impl<B: Backend> Transform<Tensor<B, 3>> for Normalize {
    type Output = Tensor<B, 3>;

    fn forward(
        &self,
        input: Tensor<B, 3>,
    ) -> Self::Output {
        let device = input.device();
        let mean = Tensor::<B, 1>::from_data(TensorData::new(self.mean.to_vec(), [3]), &device)
            .reshape([3, 1, 1]);
        let std = Tensor::<B, 1>::from_data(TensorData::new(self.std.to_vec(), [3]), &device)
            .reshape([3, 1, 1]);
        (input - mean) / std
    }
}

impl Transform<DepthImage> for ResizeNearest {
    type Output = DepthImage;

    fn forward(
        &self,
        input: DepthImage,
    ) -> Self::Output {
        let (width_in, height_in) = input.dimensions();
        if (width_in, height_in) == (self.width, self.height) {
            return input;
        }
        if width_in == 0 || height_in == 0 {
            return DepthImage::new(self.width, self.height);
        }

        DepthImage::from_fn(self.width, self.height, |x, y| {
            *input.get_pixel(
                Self::source_index(x, width_in, self.width),
                Self::source_index(y, height_in, self.height),
            )
        })
    }
}

impl ResizeNearest {
    /// The source index under the center of `index_out`.
    #[inline]
    pub fn source_index(
        index_out: u32,
        size_in: u32,
        size_out: u32,
    ) -> u32 {
        let index_in = (2 * index_out as u64 + 1) * size_in as u64 / (2 * size_out as u64);
        index_in.min(size_in as u64 - 1) as u32
    }
}

impl<B: Backend> Transform<Tensor<B, 2>> for ToDepthMap {
    type Output = DepthMap<B>;

    #[inline]
    fn forward(
        &self,
        input: Tensor<B, 2>,
    ) -> Self::Output {
        DepthMap {
            depth_map: input,
            intrinsic: self.intrinsic,
        }
    }
}
