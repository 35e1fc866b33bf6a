pub use super::*;

use std::collections::BTreeMap;

/// Predicted instances with confidence scores.
#[derive(Clone, Debug)]
pub struct ScoredInstances<B: Backend, const D: usize> {
    /// `[N, ...]`
    pub masks: Tensor<B, D, Bool>,
    /// `[N]`
    pub labels: Tensor<B, 1, Int>,
    /// `[N]`
    pub scores: Tensor<B, 1>,
}

/// Ground-truth instances.
#[derive(Clone, Debug)]
pub struct Instances<B: Backend, const D: usize> {
    /// `[M, ...]`
    pub masks: Tensor<B, D, Bool>,
    /// `[M]`
    pub labels: Tensor<B, 1, Int>,
}

/// The mean over classes of the average precision of instance masks.
///
/// Predictions are matched greedily in descending score order to the
/// unmatched target of the same class with the highest IoU.
/// A match needs an IoU of at least `iou_threshold`.
/// The precision is interpolated at all recall points.
#[derive(Clone, Debug, PartialEq)]
pub struct MeanAveragePrecision {
    pub iou_threshold: f64,
    classes: BTreeMap<i64, ClassDetections>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct ClassDetections {
    /// `(score, is_true_positive)`
    detections: Vec<(f32, bool)>,
    target_count: u64,
}

impl MeanAveragePrecision {
    #[inline]
    pub fn new(iou_threshold: f64) -> Self {
        Self {
            iou_threshold,
            classes: Default::default(),
        }
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: ScoredInstances<B, D>,
        target: Instances<B, D>,
    ) -> Result<(), Error> {
        let dims_prediction = prediction.masks.dims();
        let dims_target = target.masks.dims();
        let [prediction_count] = prediction.labels.dims();
        let [target_count] = target.labels.dims();
        check_dims(
            "the prediction masks",
            &dims_prediction[1..],
            &dims_target[1..],
        )?;
        check_dims("the prediction labels", &[prediction_count], &dims_prediction[..1])?;
        check_dims("the prediction scores", &prediction.scores.dims(), &[prediction_count])?;
        check_dims("the target labels", &[target_count], &dims_target[..1])?;

        let ious = intersection_over_union_matrix(prediction.masks, target.masks);
        let prediction_labels = to_labels(prediction.labels);
        let target_labels = to_labels(target.labels);
        let mut prediction_order = prediction
            .scores
            .into_data()
            .iter::<f32>()
            .enumerate()
            .collect::<Vec<_>>();
        prediction_order.sort_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs));

        target_labels.iter().for_each(|label| {
            self.classes.entry(*label).or_default().target_count += 1;
        });

        let mut is_matched = vec![false; target_count];
        prediction_order.into_iter().for_each(|(index, score)| {
            let label = prediction_labels[index];
            let matched = (0..target_count)
                .filter(|&target| target_labels[target] == label && !is_matched[target])
                .map(|target| (target, ious[index * target_count + target]))
                .filter(|(_, iou)| *iou >= self.iou_threshold)
                .max_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs));
            if let Some((target, _)) = matched {
                is_matched[target] = true;
            }
            self.classes
                .entry(label)
                .or_default()
                .detections
                .push((score, matched.is_some()));
        });

        Ok(())
    }

    /// The average precision of each class with at least one target.
    pub fn compute_per_class(&self) -> BTreeMap<i64, f64> {
        self.classes
            .iter()
            .filter(|(_, class)| class.target_count > 0)
            .map(|(&label, class)| (label, class.average_precision()))
            .collect()
    }
}

impl Default for MeanAveragePrecision {
    #[inline]
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Metric for MeanAveragePrecision {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        self.classes.clear();
    }

    fn compute(&self) -> Self::Output {
        let per_class = self.compute_per_class();
        ratio(per_class.values().sum(), per_class.len() as f64)
    }
}

impl ClassDetections {
    fn average_precision(&self) -> f64 {
        let mut detections = self.detections.to_owned();
        detections.sort_by(|(lhs, _), (rhs, _)| rhs.total_cmp(lhs));

        // (recall, precision)
        let mut true_positive_count = 0_u64;
        let points = detections
            .iter()
            .enumerate()
            .map(|(rank, &(_, is_true_positive))| {
                true_positive_count += is_true_positive as u64;
                (
                    true_positive_count as f64 / self.target_count as f64,
                    true_positive_count as f64 / (rank + 1) as f64,
                )
            })
            .collect::<Vec<_>>();

        // The precision envelope from the right
        let mut precision_max = 0.0_f64;
        let envelope = points
            .iter()
            .rev()
            .map(|&(_, precision)| {
                precision_max = precision_max.max(precision);
                precision_max
            })
            .collect::<Vec<_>>();

        let mut recall_previous = 0.0;
        points
            .iter()
            .zip(envelope.iter().rev())
            .map(|(&(recall, _), &precision)| {
                let area = (recall - recall_previous) * precision;
                recall_previous = recall;
                area
            })
            .sum()
    }
}

/// The IoU of each prediction and target mask in row-major `[N, M]` order.
fn intersection_over_union_matrix<B: Backend, const D: usize>(
    prediction: Tensor<B, D, Bool>,
    target: Tensor<B, D, Bool>,
) -> Vec<f64> {
    let dims_prediction = prediction.dims();
    let dims_target = target.dims();
    let (prediction_count, target_count) = (dims_prediction[0], dims_target[0]);
    let size = dims_prediction[1..].iter().product::<usize>();
    if prediction_count == 0 || target_count == 0 || size == 0 {
        return vec![0.0; prediction_count * target_count];
    }

    // [N, P], [M, P]
    let prediction = prediction.reshape([prediction_count, size]).float();
    let target = target.reshape([target_count, size]).float();
    // [N, 1], [1, M]
    let area_prediction = prediction.to_owned().sum_dim(1);
    let area_target = target.to_owned().sum_dim(1).transpose();
    // [N, M]
    let intersection = prediction.matmul(target.transpose());
    let union = area_prediction + area_target - intersection.to_owned();

    intersection
        .into_data()
        .iter::<f64>()
        .zip(union.into_data().iter::<f64>())
        .map(|(intersection, union)| ratio(intersection, union))
        .map(|iou| if iou.is_nan() { 0.0 } else { iou })
        .collect()
}
