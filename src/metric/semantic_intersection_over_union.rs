pub use super::*;

use std::collections::BTreeMap;

/// The intersection over union of each semantic class.
///
/// A class is seen once it occurs in a prediction or a target.
/// Labels equal to `ignore_label` are not a class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SemanticIntersectionOverUnion {
    pub ignore_label: Option<i64>,
    statistics: ClassStatistics,
}

/// [`SemanticIntersectionOverUnion`] restricted to the cells selected by a mask.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskedSemanticIntersectionOverUnion {
    pub ignore_label: Option<i64>,
    statistics: ClassStatistics,
}

/// The summary of a semantic IoU metric.
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticIntersectionOverUnionOutput {
    /// The IoU of each seen class.
    pub per_class: BTreeMap<i64, f64>,
    /// The mean IoU over the seen classes.
    pub mean: f64,
}

/// The intersection and union counts of each class.
#[derive(Clone, Debug, Default, PartialEq)]
struct ClassStatistics {
    counts: BTreeMap<i64, (u64, u64)>,
}

impl SemanticIntersectionOverUnion {
    #[inline]
    pub fn new(ignore_label: Option<i64>) -> Self {
        Self {
            ignore_label,
            ..Default::default()
        }
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D, Int>,
        target: Tensor<B, D, Int>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;

        let prediction = to_labels(prediction);
        let target = to_labels(target);
        self.statistics.accumulate(
            prediction.into_iter().zip(target),
            self.ignore_label,
        );
        Ok(())
    }
}

impl Metric for SemanticIntersectionOverUnion {
    type Output = SemanticIntersectionOverUnionOutput;

    #[inline]
    fn reset(&mut self) {
        *self = Self::new(self.ignore_label);
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        self.statistics.summarize()
    }
}

impl MaskedSemanticIntersectionOverUnion {
    #[inline]
    pub fn new(ignore_label: Option<i64>) -> Self {
        Self {
            ignore_label,
            ..Default::default()
        }
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D, Int>,
        target: Tensor<B, D, Int>,
        mask: Tensor<B, D, Bool>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;
        check_dims("the mask", &mask.dims(), &target.dims())?;

        let prediction = to_labels(prediction);
        let target = to_labels(target);
        let mask = to_flags(mask);
        self.statistics.accumulate(
            prediction
                .into_iter()
                .zip(target)
                .zip(mask)
                .filter_map(|(labels, is_selected)| is_selected.then_some(labels)),
            self.ignore_label,
        );
        Ok(())
    }
}

impl Metric for MaskedSemanticIntersectionOverUnion {
    type Output = SemanticIntersectionOverUnionOutput;

    #[inline]
    fn reset(&mut self) {
        *self = Self::new(self.ignore_label);
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        self.statistics.summarize()
    }
}

impl ClassStatistics {
    fn accumulate(
        &mut self,
        labels: impl IntoIterator<Item = (i64, i64)>,
        ignore_label: Option<i64>,
    ) {
        let is_class = |label: i64| Some(label) != ignore_label;

        labels.into_iter().for_each(|(prediction, target)| {
            if prediction == target {
                if is_class(target) {
                    let counts = self.counts.entry(target).or_default();
                    counts.0 += 1;
                    counts.1 += 1;
                }
                return;
            }
            if is_class(prediction) {
                self.counts.entry(prediction).or_default().1 += 1;
            }
            if is_class(target) {
                self.counts.entry(target).or_default().1 += 1;
            }
        });
    }

    fn summarize(&self) -> SemanticIntersectionOverUnionOutput {
        let per_class = self
            .counts
            .iter()
            .map(|(&class, &(intersection, union))| {
                (class, ratio(intersection as f64, union as f64))
            })
            .collect::<BTreeMap<_, _>>();
        let mean = ratio(per_class.values().sum(), per_class.len() as f64);

        SemanticIntersectionOverUnionOutput { per_class, mean }
    }
}
