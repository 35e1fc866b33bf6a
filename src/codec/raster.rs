//! Color images (`*.png`), depth images (`*.exr`) and 2D segmentations (`*.npz`).

pub use super::*;

use ::image::{imageops, DynamicImage, ImageBuffer, ImageFormat, ImageReader, Luma};
use ndarray::{Array3, ArrayView3, Axis};
use ndarray_npy::NpzReader;
use std::fs::File;

pub use ::image::RgbImage;

/// A single-channel floating-point image.
pub type DepthImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// The name of the array holding a 2D segmentation in an NPZ archive.
pub const SEGMENTATION_2D_ARRAY_NAME: &str = "data";

/// Semantic and instance ids of one image, both row-major `[H, W]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segmentation2d {
    pub width: u32,
    pub height: u32,
    pub semantic: Vec<u32>,
    pub instance: Vec<u32>,
}

/// Reading the color image at `path` in PNG format.
pub fn read_color(path: impl AsRef<Path>) -> Result<RgbImage, Error> {
    Ok(decode_image(path.as_ref(), ImageFormat::Png)?.into_rgb8())
}

/// Reading the first channel of the depth image at `path` in OpenEXR format.
///
/// The image is flipped along both axes to undo the sensor orientation.
pub fn read_depth(path: impl AsRef<Path>) -> Result<DepthImage, Error> {
    let image = decode_image(path.as_ref(), ImageFormat::OpenExr)?.into_rgb32f();
    let (width, height) = image.dimensions();
    let depth =
        DepthImage::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y)[0]]));
    Ok(imageops::rotate180(&depth))
}

/// Reading the 2D segmentation at `path`.
///
/// The archive holds an `int32` array named [`SEGMENTATION_2D_ARRAY_NAME`]
/// of shape `[H, W, 2]`, with semantic ids in channel 0
/// and instance ids in channel 1.
pub fn read_segmentation_2d(path: impl AsRef<Path>) -> Result<Segmentation2d, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| Error::Io(path.into(), err))?;
    let mut npz = NpzReader::new(file).map_err(|err| Error::Npz(path.into(), err))?;

    let name = npz
        .names()
        .map_err(|err| Error::Npz(path.into(), err))?
        .into_iter()
        .find(|name| {
            name.strip_suffix(".npy").unwrap_or(name) == SEGMENTATION_2D_ARRAY_NAME
        })
        .ok_or_else(|| {
            Error::Codec(format!(
                "The array {SEGMENTATION_2D_ARRAY_NAME:?} is missing in {path:?}"
            ))
        })?;
    let data: Array3<i32> =
        npz.by_name(&name).map_err(|err| Error::Npz(path.into(), err))?;

    Segmentation2d::from_array(data.view())
}

fn decode_image(
    path: &Path,
    format: ImageFormat,
) -> Result<DynamicImage, Error> {
    let mut reader =
        ImageReader::open(path).map_err(|err| Error::Io(path.into(), err))?;
    reader.set_format(format);
    reader.decode().map_err(|err| Error::Image(path.into(), err))
}

impl Segmentation2d {
    /// Splitting an `[H, W, C]` array with `C >= 2` into semantic and instance ids.
    pub fn from_array(data: ArrayView3<i32>) -> Result<Self, Error> {
        let (height, width, channel_count) = data.dim();
        if channel_count < 2 {
            return Err(Error::MismatchedShape(
                format!("the 2D segmentation shape {:?}", data.shape()),
                "[H, W, 2]".into(),
            ));
        }

        let take_channel = |channel: usize| {
            data.index_axis(Axis(2), channel)
                .iter()
                .map(|&id| {
                    u32::try_from(id).map_err(|_| {
                        Error::Codec(format!("The segment id {id} should be non-negative"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(Self {
            width: width as u32,
            height: height as u32,
            semantic: take_channel(0)?,
            instance: take_channel(1)?,
        })
    }

    /// The pixel count.
    #[inline]
    pub fn len(&self) -> usize {
        self.instance.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instance.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn segmentation_2d_from_array() {
        use super::*;

        let data = Array3::from_shape_vec(
            (2, 3, 2),
            vec![1, 0, 1, 0, 5, 7, 5, 7, 5, 8, 0, 0],
        )
        .unwrap();

        let output = Segmentation2d::from_array(data.view()).unwrap();
        assert_eq!(output.width, 3);
        assert_eq!(output.height, 2);
        assert_eq!(output.semantic, vec![1, 1, 5, 5, 5, 0]);
        assert_eq!(output.instance, vec![0, 0, 7, 7, 8, 0]);
        assert_eq!(output.len(), 6);
    }

    #[test]
    fn segmentation_2d_from_invalid_array() {
        use super::*;

        let data = Array3::<i32>::zeros((2, 2, 1));
        let output = Segmentation2d::from_array(data.view());
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))), "{output:?}");

        let data = Array3::from_shape_vec((1, 1, 2), vec![3, -1]).unwrap();
        let output = Segmentation2d::from_array(data.view());
        assert!(matches!(output, Err(Error::Codec(_))), "{output:?}");
    }

    #[test]
    fn read_depth_flipped() {
        use super::*;
        use ::image::{ImageBuffer, Rgb};

        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("depth_0000.exr");
        let source = ImageBuffer::<Rgb<f32>, Vec<f32>>::from_fn(3, 2, |x, y| {
            let value = (y * 3 + x) as f32;
            Rgb([value, value, value])
        });
        DynamicImage::ImageRgb32F(source)
            .save_with_format(&path, ImageFormat::OpenExr)
            .unwrap();

        let target = vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        let output = read_depth(&path).unwrap();
        assert_eq!(output.dimensions(), (3, 2));
        assert_eq!(output.into_raw(), target);
    }

    #[test]
    fn read_missing_files() {
        use super::*;

        let output = read_color("/nonexistent/rgb_0000.png");
        assert!(matches!(output, Err(Error::Io(_, _))), "{output:?}");

        let output = read_segmentation_2d("/nonexistent/segmap_0000.mapped.npz");
        assert!(matches!(output, Err(Error::Io(_, _))), "{output:?}");
    }
}
