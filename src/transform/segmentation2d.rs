//! Instance extraction from 2D segmentations.

pub use super::*;

use codec::Segmentation2d;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use structure::{InstanceLocations, InstanceMasks};

/// Extracting instance masks, boxes and labels from a 2D segmentation.
///
/// An instance is dropped if it covers fewer than `min_instance_pixels`
/// pixels or if its majority semantic label is in `stuff_classes`.
/// At most `max_instances` instances are kept.
///
/// With `shuffle`, the kept instances and their locations are permuted
/// by a generator seeded in [`SegmentationToMasks::forward_seeded`].
#[derive(Clone, Debug)]
pub struct SegmentationToMasks<B: Backend> {
    pub device: B::Device,
    pub max_instances: usize,
    pub min_instance_pixels: usize,
    pub shuffle: bool,
    pub stuff_classes: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Instance {
    id: u32,
    label: u32,
    /// `[x_min, y_min, x_max, y_max]`
    bounds: [u32; 4],
}

impl<B: Backend> SegmentationToMasks<B> {
    /// Extracting instances, seeding the shuffle with `seed`.
    pub fn forward_seeded(
        &self,
        input: Segmentation2d,
        seed: u64,
    ) -> InstanceMasks<B> {
        let (width, height) = (input.width as usize, input.height as usize);

        let ids = input
            .instance
            .iter()
            .copied()
            .filter(|&id| id != 0)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let mut instances = ids
            .par_iter()
            .filter_map(|&id| self.describe(&input, id))
            .collect::<Vec<_>>();

        let mut rng = StdRng::seed_from_u64(seed);
        if self.shuffle {
            instances.shuffle(&mut rng);
        }
        instances.truncate(self.max_instances);

        // N
        let instance_count = instances.len();
        let locations = if self.shuffle {
            rand::seq::index::sample(&mut rng, self.max_instances, instance_count)
                .into_iter()
                .map(|index| index as u32 + 1)
                .collect::<Vec<_>>()
        } else {
            (1..=instance_count as u32).collect()
        };

        let instance_locations = instances
            .iter()
            .zip(&locations)
            .map(|(instance, &location)| (instance.id, location))
            .collect::<InstanceLocations>();

        // [N, 4]
        let boxes = instances
            .iter()
            .flat_map(|instance| instance.bounds.map(|bound| bound as f32))
            .collect::<Vec<_>>();
        // [N, H, W]
        let masks = instances
            .iter()
            .flat_map(|instance| input.instance.iter().map(move |&id| id == instance.id))
            .collect::<Vec<_>>();
        // [N]
        let labels = instances
            .iter()
            .map(|instance| instance.label as i64)
            .collect::<Vec<_>>();
        // [N]
        let locations = locations.into_iter().map(i64::from).collect::<Vec<_>>();

        InstanceMasks {
            image_size: (input.width, input.height),
            boxes: Tensor::from_data(
                TensorData::new(boxes, [instance_count, 4]),
                &self.device,
            ),
            masks: Tensor::from_data(
                TensorData::new(masks, [instance_count, height, width]),
                &self.device,
            ),
            labels: Tensor::from_data(
                TensorData::new(labels, [instance_count]),
                &self.device,
            ),
            locations: Tensor::from_data(
                TensorData::new(locations, [instance_count]),
                &self.device,
            ),
            instance_locations,
        }
    }

    /// Describing the instance `id`, or `None` if it should be dropped.
    fn describe(
        &self,
        input: &Segmentation2d,
        id: u32,
    ) -> Option<Instance> {
        let width = input.width.max(1) as usize;
        let mut pixel_count = 0;
        let mut bounds = [u32::MAX, u32::MAX, 0, 0];
        let mut histogram = BTreeMap::<u32, usize>::new();

        input
            .instance
            .iter()
            .zip(&input.semantic)
            .enumerate()
            .filter(|(_, (&instance, _))| instance == id)
            .for_each(|(offset, (_, &semantic))| {
                let x = (offset % width) as u32;
                let y = (offset / width) as u32;
                pixel_count += 1;
                bounds = [
                    bounds[0].min(x),
                    bounds[1].min(y),
                    bounds[2].max(x),
                    bounds[3].max(y),
                ];
                *histogram.entry(semantic).or_default() += 1;
            });

        if pixel_count == 0 || pixel_count < self.min_instance_pixels {
            return None;
        }

        // The smallest label wins ties.
        let label = histogram
            .into_iter()
            .fold((0, 0), |(label_max, count_max), (label, count)| {
                if count > count_max {
                    (label, count)
                } else {
                    (label_max, count_max)
                }
            })
            .0;
        if self.stuff_classes.contains(&label) {
            return None;
        }

        Some(Instance { id, label, bounds })
    }
}

impl<B: Backend> Transform<Segmentation2d> for SegmentationToMasks<B> {
    type Output = InstanceMasks<B>;

    #[inline]
    fn forward(
        &self,
        input: Segmentation2d,
    ) -> Self::Output {
        self.forward_seeded(input, 0)
    }
}
