pub use super::*;

use std::collections::BTreeMap;

/// The mean intersection over union of ground-truth instances.
///
/// Each non-zero target id is one instance, matched with the same id
/// in the prediction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InstanceIntersectionOverUnion {
    sum: f64,
    count: u64,
}

impl InstanceIntersectionOverUnion {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D, Int>,
        target: Tensor<B, D, Int>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;

        let prediction = to_labels(prediction);
        let target = to_labels(target);

        // Instance id -> (intersection, union)
        let mut counts = target
            .iter()
            .filter(|&&id| id != 0)
            .map(|&id| (id, (0_u64, 0_u64)))
            .collect::<BTreeMap<_, _>>();
        prediction.iter().zip(&target).for_each(|(&prediction, &target)| {
            if let Some(counts) = counts.get_mut(&target) {
                counts.1 += 1;
                if prediction == target {
                    counts.0 += 1;
                }
            }
            if prediction != target {
                if let Some(counts) = counts.get_mut(&prediction) {
                    counts.1 += 1;
                }
            }
        });

        counts.values().for_each(|&(intersection, union)| {
            self.sum += intersection as f64 / union as f64;
            self.count += 1;
        });
        Ok(())
    }
}

impl Metric for InstanceIntersectionOverUnion {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        ratio(self.sum, self.count as f64)
    }
}
