//! The 3D-FRONT dataset.
//!
//! ## Layout
//!
//! ```plaintext
//! {root}/frustum_mask.npz
//! {root}/{scene_id}/rgb_{image_id}.png
//! {root}/{scene_id}/depth_{image_id}.exr
//! {root}/{scene_id}/segmap_{image_id}.mapped.npz
//! {root}/{scene_id}/geometry_{image_id}.df
//! {root}/{scene_id}/segmentation_{image_id}.mapped.sem
//! {root}/{scene_id}/weighting_{image_id}.df
//! ```

pub mod config;
pub mod sample;
pub mod transforms;

pub use super::*;
pub use config::*;
pub use sample::*;
pub use transforms::*;

use crate::{
    catalog::{DatasetCatalog, DatasetFactory},
    codec,
    preset::front3d as preset,
    transform::{Transform, VolumeToTensor},
};
use burn::{
    data::dataset::Dataset,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Rendered views of 3D-FRONT scenes with their 2D and 3D annotations.
///
/// Samples are assembled on every retrieval and never cached.
#[derive(Clone, Debug)]
pub struct Front3dDataset<B: Backend> {
    pub config: Front3dConfig,
    pub dataset_root_path: PathBuf,
    pub device: B::Device,
    pub fields: FieldSet,
    /// `[X, Y, Z]`
    pub frustum_mask: Tensor<B, 3, Bool>,
    /// `scene_id/image_id` entries.
    pub samples: Vec<String>,
    pub transforms: Front3dTransforms<B>,
}

impl<B: Backend> Front3dDataset<B> {
    /// Loading the file list and the frustum mask.
    pub fn new(
        file_list_path: impl AsRef<Path>,
        dataset_root_path: impl AsRef<Path>,
        fields: FieldSet,
        options: &Front3dDatasetOptions,
        config: Front3dConfig,
        device: &B::Device,
    ) -> Result<Self, Error> {
        fields.validate()?;
        config.validate()?;

        let dataset_root_path = dataset_root_path.as_ref().to_owned();

        let mut samples = load_file_list(file_list_path.as_ref())?;
        if options.shuffle {
            match options.seed {
                Some(seed) => samples.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => samples.shuffle(&mut rand::thread_rng()),
            }
        }
        if let Some(num_samples) = options.num_samples {
            samples.truncate(num_samples);
        }

        let frustum_mask = load_frustum_mask(
            &dataset_root_path.join(preset::FRUSTUM_MASK_FILE_NAME),
            &config,
            device,
        )?;
        let transforms = Front3dTransforms::new(&config, device);

        #[cfg(all(debug_assertions, not(test)))]
        log::debug!(
            target: "front3d::loader::dataset",
            "Front3dDataset::new > {dataset_root_path:?} ({} samples)",
            samples.len(),
        );

        Ok(Self {
            config,
            dataset_root_path,
            device: device.to_owned(),
            fields,
            frustum_mask,
            samples,
            transforms,
        })
    }

    /// Building the dataset registered as `name` in the catalog.
    pub fn from_catalog(
        name: &str,
        fields: FieldSet,
        options: &Front3dDatasetOptions,
        config: Front3dConfig,
        device: &B::Device,
    ) -> Result<Self, Error> {
        let descriptor = DatasetCatalog::get(name)?;
        match descriptor.factory {
            DatasetFactory::Front3d => Self::new(
                descriptor.file_list_path(),
                descriptor.dataset_root_path(),
                fields,
                options,
                config,
                device,
            ),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Assembling the sample at `index`.
    ///
    /// The result only depends on `index`.
    pub fn get_item(
        &self,
        index: usize,
    ) -> Result<Front3dSample<B>, Error> {
        let name = self
            .samples
            .get(index)
            .ok_or(Error::IndexOutOfBounds(index, self.len()))?;
        let (scene_id, image_id) = split_sample_name(name)?;
        let scene_path = self.dataset_root_path.join(scene_id);

        let mut sample = Front3dSample::new(index, name.to_owned());
        let mut should_load_weighting = false;

        for field in self.fields.in_dependency_order() {
            match field {
                Field::Color => {
                    let image =
                        codec::read_color(scene_path.join(format!("rgb_{image_id}.png")))?;
                    sample.color = Some(self.transforms.color.forward(image));
                },
                Field::Depth => {
                    let image =
                        codec::read_depth(scene_path.join(format!("depth_{image_id}.exr")))?;
                    sample.depth = Some(self.transforms.depth.forward(image));
                },
                Field::Instance2d => {
                    let segmentation = codec::read_segmentation_2d(
                        scene_path.join(format!("segmap_{image_id}.mapped.npz")),
                    )?;
                    sample.instance2d = Some(
                        self.transforms
                            .instance2d
                            .forward_seeded(segmentation, index as u64),
                    );
                },
                Field::Geometry => {
                    sample.geometry = Some(self.load_geometry(&scene_path, image_id)?);
                    should_load_weighting = true;
                },
                Field::Semantic3d | Field::Instance3d => {},
            }
        }

        let should_load_segmentation = match self.config.segmentation_decode {
            SegmentationDecode::OnDemand => {
                self.fields.contains(Field::Semantic3d)
                    || self.fields.contains(Field::Instance3d)
            },
            SegmentationDecode::Always => true,
        };
        if should_load_segmentation {
            self.load_segmentation(&scene_path, image_id, &mut sample)?;
            should_load_weighting = true;
        }

        if should_load_weighting {
            sample.weighting3d = Some(self.load_weighting(&scene_path, image_id)?);
        }

        Ok(sample)
    }

    fn load_geometry(
        &self,
        scene_path: &Path,
        image_id: &str,
    ) -> Result<Geometry<B>, Error> {
        let volume = codec::read_sparse_distance_field(
            scene_path.join(format!("geometry_{image_id}.df")),
            preset::GEOMETRY_TRUNCATION,
            Some(self.config.grid_shape()),
        )?;

        let transforms = &self.transforms;
        let geometry = transforms.geometry.forward(volume);
        let occupancy_256 = transforms.occupancy_256.forward(geometry.to_owned());
        let occupancy_128 = transforms.occupancy_128.forward(geometry.to_owned());
        let occupancy_64 = transforms.occupancy_64.forward(geometry.to_owned());
        let geometry = transforms.geometry_truncate.forward(geometry);

        Ok(Geometry {
            geometry,
            occupancy_256,
            occupancy_128,
            occupancy_64,
            frustum_mask: self.frustum_mask.to_owned(),
        })
    }

    fn load_segmentation(
        &self,
        scene_path: &Path,
        image_id: &str,
        sample: &mut Front3dSample<B>,
    ) -> Result<(), Error> {
        let segmentation = codec::read_sparse_segmentation(
            scene_path.join(format!("segmentation_{image_id}.mapped.sem")),
            preset::MAX_INSTANCE_ID,
            preset::IGNORE_LABEL,
            Some(self.config.grid_shape()),
        )?;

        let transforms = &self.transforms;
        let pyramid = |full: Tensor<B, 4, Int>| Pyramid {
            half: transforms.segmentation3d_128.forward(full.to_owned()),
            quarter: transforms.segmentation3d_64.forward(full.to_owned()),
            full,
        };

        if self.fields.contains(Field::Semantic3d) {
            sample.semantic3d =
                Some(pyramid(transforms.semantic3d.forward(segmentation.semantic)));
        }

        if self.fields.contains(Field::Instance3d) {
            let instance_locations = sample
                .instance2d
                .as_ref()
                .map(|instance2d| &instance2d.instance_locations)
                .ok_or_else(|| {
                    Error::MissingFieldDependency(
                        Field::Instance3d.to_string(),
                        Field::Instance2d.to_string(),
                    )
                })?;
            sample.instance3d = Some(pyramid(
                transforms
                    .instance3d
                    .forward((segmentation.instance, instance_locations)),
            ));
        }

        Ok(())
    }

    fn load_weighting(
        &self,
        scene_path: &Path,
        image_id: &str,
    ) -> Result<Pyramid<Tensor<B, 4>>, Error> {
        let volume = codec::read_sparse_distance_field(
            scene_path.join(format!("weighting_{image_id}.df")),
            preset::WEIGHTING_DEFAULT,
            Some(self.config.grid_shape()),
        )?;

        let transforms = &self.transforms;
        let full = transforms.weighting.forward(volume);

        Ok(Pyramid {
            half: transforms.weighting3d_128.forward(full.to_owned()),
            quarter: transforms.weighting3d_64.forward(full.to_owned()),
            full,
        })
    }
}

impl<B: Backend> Dataset<Front3dSample<B>> for Front3dDataset<B> {
    fn get(
        &self,
        index: usize,
    ) -> Option<Front3dSample<B>> {
        self.get_item(index)
            .map_err(|err| {
                log::error!(
                    target: "front3d::loader::dataset",
                    "Front3dDataset::get > {index} ({err})",
                );
            })
            .ok()
    }

    #[inline]
    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Reading the non-blank lines of the file list at `path`.
pub fn load_file_list(path: &Path) -> Result<Vec<String>, Error> {
    let text = fs::read_to_string(path).map_err(|err| Error::Io(path.into(), err))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Reading the frustum mask at `path`.
///
/// The file is a sparse distance field whose non-zero cells are inside the frustum.
pub fn load_frustum_mask<B: Backend>(
    path: &Path,
    config: &Front3dConfig,
    device: &B::Device,
) -> Result<Tensor<B, 3, Bool>, Error> {
    let volume = codec::read_sparse_distance_field(
        path,
        preset::FRUSTUM_MASK_DEFAULT,
        Some(config.grid_shape()),
    )?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "front3d::loader::dataset",
        "load_frustum_mask > {path:?} ({})",
        humansize::format_size(volume.size(), humansize::BINARY),
    );

    let mask = VolumeToTensor::<B>::new(device)
        .forward(volume)
        .equal_elem(preset::FRUSTUM_MASK_DEFAULT)
        .bool_not();

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Volume;
    use burn::backend::NdArray;
    use std::collections::BTreeSet;

    type B = NdArray<f32>;

    const SCENE_ID: &str = "00001_00";

    /// Writing a scene with the given images and a file list of `names`.
    fn write_fixture(
        root: &Path,
        image_ids: &[&str],
        names: &[&str],
    ) -> PathBuf {
        use crate::codec::{
            encode_sparse_distance_field, encode_sparse_segmentation, Segmentation3d,
        };
        use ::image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
        use ndarray::Array3;
        use ndarray_npy::NpzWriter;
        use std::fs::File;

        let mut frustum_mask = Volume::full([8, 8, 8], 0.0_f32);
        frustum_mask.data[..256].fill(1.0);
        fs::write(
            root.join(preset::FRUSTUM_MASK_FILE_NAME),
            encode_sparse_distance_field(&frustum_mask, 0.0),
        )
        .unwrap();

        let scene_path = root.join(SCENE_ID);
        fs::create_dir_all(&scene_path).unwrap();

        image_ids.iter().for_each(|image_id| {
            RgbImage::from_fn(8, 6, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 128]))
                .save(scene_path.join(format!("rgb_{image_id}.png")))
                .unwrap();

            let depth = ImageBuffer::<Rgb<f32>, Vec<f32>>::from_fn(8, 6, |x, y| {
                let value = 1.0 + (y * 8 + x) as f32 / 10.0;
                Rgb([value, value, value])
            });
            DynamicImage::ImageRgb32F(depth)
                .save_with_format(
                    scene_path.join(format!("depth_{image_id}.exr")),
                    ImageFormat::OpenExr,
                )
                .unwrap();

            // Instance 1 (semantic 5) and 2 (semantic 7) are things,
            // instance 3 (semantic 10) is stuff.
            let segmentation = Array3::from_shape_fn((6, 8, 2), |(y, x, channel)| {
                let (semantic, instance) = match (x, y) {
                    (0..=1, 0..=1) => (5, 1),
                    (6..=7, 4..=5) => (7, 2),
                    (_, 3) => (10, 3),
                    _ => (0, 0),
                };
                if channel == 0 {
                    semantic
                } else {
                    instance
                }
            });
            let mut npz = NpzWriter::new(
                File::create(scene_path.join(format!("segmap_{image_id}.mapped.npz")))
                    .unwrap(),
            );
            npz.add_array("data", &segmentation).unwrap();
            npz.finish().unwrap();

            let mut geometry = Volume::full([8, 8, 8], 12.0_f32);
            geometry.data[0] = 0.5;
            geometry.data[1] = -2.0;
            geometry.data[2] = 5.0;
            fs::write(
                scene_path.join(format!("geometry_{image_id}.df")),
                encode_sparse_distance_field(&geometry, 12.0),
            )
            .unwrap();

            let mut segmentation = Segmentation3d {
                semantic: Volume::full([8, 8, 8], 0),
                instance: Volume::full([8, 8, 8], 0),
            };
            [([0, 0, 0], 5, 1), ([7, 7, 7], 7, 2), ([3, 3, 3], 9, 4)]
                .into_iter()
                .for_each(|(coordinate, semantic, instance)| {
                    let offset = segmentation.semantic.offset(coordinate).unwrap();
                    segmentation.semantic.data[offset] = semantic;
                    segmentation.instance.data[offset] = instance;
                });
            fs::write(
                scene_path.join(format!("segmentation_{image_id}.mapped.sem")),
                encode_sparse_segmentation(&segmentation, preset::MAX_INSTANCE_ID, 0),
            )
            .unwrap();

            let mut weighting = Volume::full([8, 8, 8], 1.0_f32);
            weighting.data[..8].fill(3.0);
            fs::write(
                scene_path.join(format!("weighting_{image_id}.df")),
                encode_sparse_distance_field(&weighting, 1.0),
            )
            .unwrap();
        });

        let file_list_path = root.join("file_list.txt");
        fs::write(&file_list_path, names.join("\n") + "\n\n").unwrap();
        file_list_path
    }

    fn config() -> Front3dConfig {
        Front3dConfig::default()
            .with_grid_dimensions([8, 8, 8])
            .with_image_size((8, 6))
            .with_depth_image_size((4, 3))
            .with_max_instances(4)
            .with_min_instance_pixels(1)
    }

    fn dataset(
        root: &Path,
        fields: FieldSet,
        options: &Front3dDatasetOptions,
        config: Front3dConfig,
    ) -> Front3dDataset<B> {
        let file_list_path = write_fixture(
            root,
            &["0001", "0002"],
            &["00001_00/0001", "00001_00/0002"],
        );
        Front3dDataset::new(
            file_list_path,
            root,
            fields,
            options,
            config,
            &Default::default(),
        )
        .unwrap()
    }

    #[test]
    fn get_item_all_fields() {
        let directory = tempfile::tempdir().unwrap();
        let options = Front3dDatasetOptions::new().with_num_samples(Some(1));
        let dataset = dataset(directory.path(), FieldSet::all(), &options, config());

        assert_eq!(dataset.len(), 1);

        let sample = dataset.get_item(0).unwrap();
        assert_eq!(sample.index, 0);
        assert_eq!(sample.name, "00001_00/0001");

        let output = sample.field_names().into_iter().collect::<BTreeSet<_>>();
        let target = [
            "index",
            "name",
            "color",
            "depth",
            "instance2d",
            "geometry",
            "occupancy_256",
            "occupancy_128",
            "occupancy_64",
            "frustum_mask",
            "semantic3d",
            "semantic3d_128",
            "semantic3d_64",
            "instance3d",
            "instance3d_128",
            "instance3d_64",
            "weighting3d",
            "weighting3d_128",
            "weighting3d_64",
        ]
        .into_iter()
        .collect::<BTreeSet<_>>();
        assert_eq!(output, target);

        assert_eq!(sample.color.unwrap().dims(), [3, 6, 8]);

        let depth = sample.depth.unwrap();
        assert_eq!(depth.depth_map.dims(), [3, 4]);
        assert_eq!(depth.intrinsic, config().intrinsic);

        // Flipped along both axes, then sampled at the centers of 2x2 blocks.
        let target = (0..3)
            .flat_map(|y| (0..4).map(move |x| (4 - 2 * y) * 8 + 6 - 2 * x))
            .map(|offset| 1.0 + offset as f32 / 10.0)
            .collect::<Vec<_>>();
        let output = depth.depth_map.into_data().to_vec::<f32>().unwrap();
        assert_eq!(output, target);
        assert!(output.iter().any(|&value| value > 1.0));

        let instance2d = sample.instance2d.unwrap();
        assert_eq!(instance2d.len(), 2);
        assert_eq!(instance2d.masks.dims(), [2, 6, 8]);
        let output = instance2d
            .labels
            .into_data()
            .to_vec::<i64>()
            .unwrap()
            .into_iter()
            .collect::<BTreeSet<_>>();
        assert_eq!(output, BTreeSet::from([5, 7]));
    }

    #[test]
    fn get_item_geometry() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Geometry]).unwrap(),
            &Default::default(),
            config(),
        );

        let sample = dataset.get_item(1).unwrap();
        assert_eq!(sample.name, "00001_00/0002");
        assert!(sample.weighting3d.is_some());
        assert!(sample.semantic3d.is_none());

        let geometry = sample.geometry.unwrap();
        assert_eq!(geometry.geometry.dims(), [1, 8, 8, 8]);
        assert_eq!(geometry.occupancy_256.dims(), [1, 8, 8, 8]);
        assert_eq!(geometry.occupancy_128.dims(), [1, 4, 4, 4]);
        assert_eq!(geometry.occupancy_64.dims(), [1, 2, 2, 2]);
        assert_eq!(geometry.frustum_mask.dims(), [8, 8, 8]);

        let output = geometry.geometry.into_data().to_vec::<f32>().unwrap();
        assert_eq!(&output[..4], &[0.5, 2.0, 3.0, 3.0]);

        let output = geometry.occupancy_256.into_data().to_vec::<bool>().unwrap();
        assert_eq!(output.iter().filter(|&&occupied| occupied).count(), 2);

        let output = geometry.frustum_mask.into_data().to_vec::<bool>().unwrap();
        assert_eq!(output.iter().filter(|&&inside| inside).count(), 256);
        assert!(output[0] && !output[511]);
    }

    #[test]
    fn get_item_pyramids() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Instance2d, Field::Semantic3d, Field::Instance3d])
                .unwrap(),
            &Default::default(),
            config(),
        );

        let sample = dataset.get_item(0).unwrap();
        assert!(sample.geometry.is_none());

        let semantic3d = sample.semantic3d.unwrap();
        let instance3d = sample.instance3d.unwrap();
        let weighting3d = sample.weighting3d.unwrap();
        assert_eq!(
            semantic3d.map(|level| level.dims()),
            Pyramid {
                full: [1, 8, 8, 8],
                half: [1, 4, 4, 4],
                quarter: [1, 2, 2, 2],
            }
        );
        assert_eq!(
            instance3d.map(|level| level.dims()),
            Pyramid {
                full: [1, 8, 8, 8],
                half: [1, 4, 4, 4],
                quarter: [1, 2, 2, 2],
            }
        );
        assert_eq!(
            weighting3d.map(|level| level.dims()),
            Pyramid {
                full: [1, 8, 8, 8],
                half: [1, 4, 4, 4],
                quarter: [1, 2, 2, 2],
            }
        );
    }

    #[test]
    fn get_item_instance_consistency() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Instance2d, Field::Instance3d]).unwrap(),
            &Default::default(),
            config(),
        );

        let sample = dataset.get_item(0).unwrap();
        let instance2d = sample.instance2d.unwrap();
        let locations = &instance2d.instance_locations;
        assert_eq!(locations.keys().copied().collect::<Vec<_>>(), vec![1, 2]);

        let instance3d = sample.instance3d.unwrap().full;
        let volume = Volume {
            dims: [8, 8, 8],
            data: instance3d.into_data().to_vec::<i64>().unwrap(),
        };
        assert_eq!(volume.get([0, 0, 0]), Some(&(locations[&1] as i64)));
        assert_eq!(volume.get([7, 7, 7]), Some(&(locations[&2] as i64)));
        // Instance 4 has no 2D counterpart.
        assert_eq!(volume.get([3, 3, 3]), Some(&0));

        let ids_2d = instance2d
            .locations
            .into_data()
            .to_vec::<i64>()
            .unwrap()
            .into_iter()
            .collect::<BTreeSet<_>>();
        volume
            .data
            .iter()
            .filter(|&&id| id != 0)
            .for_each(|id| assert!(ids_2d.contains(id), "{id}"));
    }

    #[test]
    fn get_item_deterministic() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Instance2d]).unwrap(),
            &Default::default(),
            config(),
        );

        let output_1 = dataset.get_item(1).unwrap().instance2d.unwrap();
        let output_2 = dataset.get_item(1).unwrap().instance2d.unwrap();
        assert_eq!(output_1.instance_locations, output_2.instance_locations);
    }

    #[test]
    fn get_item_color_only() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Color]).unwrap(),
            &Default::default(),
            config(),
        );

        let sample = dataset.get_item(0).unwrap();
        assert_eq!(sample.field_names(), vec!["index", "name", "color"]);

        let output = sample
            .color
            .unwrap()
            .slice([2..3, 0..1, 0..1])
            .into_scalar();
        assert!((output - (128.0 / 255.0 - 0.406) / 0.225).abs() < 1e-5);
    }

    #[test]
    fn get_item_always_decode() {
        let directory = tempfile::tempdir().unwrap();
        let dataset = dataset(
            directory.path(),
            FieldSet::new([Field::Color]).unwrap(),
            &Default::default(),
            config().with_segmentation_decode(SegmentationDecode::Always),
        );

        let sample = dataset.get_item(0).unwrap();
        assert!(sample.semantic3d.is_none());
        assert!(sample.instance3d.is_none());
        assert!(sample.weighting3d.is_some());
    }

    #[test]
    fn get_item_errors() {
        let directory = tempfile::tempdir().unwrap();
        let root = directory.path();
        let file_list_path = write_fixture(
            root,
            &["0001"],
            &["00001_00/0001", "00001_00/0009", "0001"],
        );
        let dataset = Front3dDataset::<B>::new(
            file_list_path,
            root,
            FieldSet::new([Field::Color]).unwrap(),
            &Default::default(),
            config(),
            &Default::default(),
        )
        .unwrap();
        assert_eq!(dataset.len(), 3);

        assert!(dataset.get_item(0).is_ok());

        let output = dataset.get_item(1);
        assert!(matches!(output, Err(Error::Io(_, _))), "{output:?}");

        let output = dataset.get_item(2);
        assert!(matches!(output, Err(Error::MalformedSampleName(_))), "{output:?}");

        let output = dataset.get_item(3);
        assert!(matches!(output, Err(Error::IndexOutOfBounds(3, 3))), "{output:?}");

        assert!(Dataset::get(&dataset, 0).is_some());
        assert!(Dataset::get(&dataset, 1).is_none());
        assert_eq!(Dataset::len(&dataset), 3);
    }

    #[test]
    fn get_item_corrupt_volume_header() {
        use crate::codec::ByteWriter;

        let directory = tempfile::tempdir().unwrap();
        let root = directory.path();
        let file_list_path = write_fixture(root, &["0001"], &["00001_00/0001"]);
        let oversized_header = {
            let mut writer = ByteWriter::default();
            writer.write_sparse_header([1 << 40; 3], 0);
            writer.into_bytes()
        };

        let new = || {
            Front3dDataset::<B>::new(
                &file_list_path,
                root,
                FieldSet::new([Field::Geometry]).unwrap(),
                &Default::default(),
                config(),
                &Default::default(),
            )
        };

        let scene_path = root.join(SCENE_ID);
        fs::write(scene_path.join("geometry_0001.df"), &oversized_header).unwrap();
        let output = new().unwrap().get_item(0);
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))), "{output:?}");

        fs::write(root.join(preset::FRUSTUM_MASK_FILE_NAME), &oversized_header).unwrap();
        let output = new();
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))), "{output:?}");
    }

    #[test]
    fn new_shuffle() {
        let directory = tempfile::tempdir().unwrap();
        let root = directory.path();
        let names = (0..16).map(|index| format!("00001_00/{index:04}")).collect::<Vec<_>>();
        let file_list_path = write_fixture(
            root,
            &[],
            &names.iter().map(String::as_str).collect::<Vec<_>>(),
        );

        let new = |options: &Front3dDatasetOptions| {
            Front3dDataset::<B>::new(
                &file_list_path,
                root,
                FieldSet::default(),
                options,
                config(),
                &Default::default(),
            )
            .unwrap()
        };

        let options = Front3dDatasetOptions::new().with_shuffle(true).with_seed(Some(7));
        let output_1 = new(&options).samples;
        let output_2 = new(&options).samples;
        assert_eq!(output_1, output_2);
        assert_eq!(
            output_1.iter().collect::<BTreeSet<_>>(),
            names.iter().collect::<BTreeSet<_>>()
        );

        let output = new(&Front3dDatasetOptions::new()).samples;
        assert_eq!(output, names);

        let output = new(&Front3dDatasetOptions::new().with_num_samples(Some(100))).samples;
        assert_eq!(output.len(), 16);

        let output = new(
            &Front3dDatasetOptions::new()
                .with_shuffle(true)
                .with_num_samples(Some(4)),
        )
        .samples;
        assert_eq!(output.len(), 4);
        assert!(output.iter().all(|name| names.contains(name)));
    }

    #[test]
    fn new_errors() {
        let directory = tempfile::tempdir().unwrap();
        let root = directory.path();
        let file_list_path = write_fixture(root, &[], &["00001_00/0001"]);
        let new = |fields: FieldSet, config: Front3dConfig, file_list_path: &Path| {
            Front3dDataset::<B>::new(
                file_list_path,
                root,
                fields,
                &Default::default(),
                config,
                &Default::default(),
            )
        };

        let fields = FieldSet::new([Field::Color]).unwrap();
        let output = new(fields.to_owned(), config(), &root.join("missing.txt"));
        assert!(matches!(output, Err(Error::Io(_, _))));

        let output = new(
            fields.to_owned(),
            config().with_grid_dimensions([16, 16, 16]),
            &file_list_path,
        );
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))));

        fs::remove_file(root.join(preset::FRUSTUM_MASK_FILE_NAME)).unwrap();
        let output = new(fields, config(), &file_list_path);
        assert!(matches!(output, Err(Error::Io(_, _))));
    }

    #[test]
    fn from_catalog_errors() {
        let new = |name: &str| {
            Front3dDataset::<B>::from_catalog(
                name,
                FieldSet::all(),
                &Default::default(),
                config(),
                &Default::default(),
            )
        };

        let output = new("Front3D_Unknown");
        assert!(matches!(output, Err(Error::UnknownDataset(_))), "{output:?}");

        let output = new("Front3D_Sample");
        assert!(matches!(output, Err(Error::Io(_, _))), "{output:?}");
    }
}
