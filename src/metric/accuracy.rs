pub use super::*;

/// The rate of exactly matching labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accuracy {
    correct: u64,
    total: u64,
}

/// The rate of exactly matching voxel labels.
///
/// Voxels whose target is `ignore_label` are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoxelAccuracy {
    pub ignore_label: Option<i64>,
    correct: u64,
    total: u64,
}

impl Accuracy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// * `prediction` - `[N]`
    /// * `target` - `[N]`
    pub fn update<B: Backend>(
        &mut self,
        prediction: Tensor<B, 1, Int>,
        target: Tensor<B, 1, Int>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;

        let [count] = target.dims();
        self.correct += count_true(prediction.equal(target));
        self.total += count as u64;
        Ok(())
    }
}

impl Metric for Accuracy {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        ratio(self.correct as f64, self.total as f64)
    }
}

impl VoxelAccuracy {
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

        let is_correct = prediction.equal(target.to_owned()).int();
        match self.ignore_label {
            Some(label) => {
                let is_valid = target.equal_elem(label).bool_not().int();
                self.correct += count_true((is_correct * is_valid.to_owned()).bool());
                self.total += count_true(is_valid.bool());
            },
            None => {
                self.total += is_correct.shape().num_elements() as u64;
                self.correct += count_true(is_correct.bool());
            },
        }
        Ok(())
    }
}

impl Metric for VoxelAccuracy {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        *self = Self::new(self.ignore_label);
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        ratio(self.correct as f64, self.total as f64)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn accuracy() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let mut metric = Accuracy::new();
        assert!(metric.compute().is_nan());

        let prediction = Tensor::<B, 1, Int>::from_data([1, 2, 3, 4], device);
        let target = Tensor::<B, 1, Int>::from_data([1, 2, 0, 0], device);
        metric.update(prediction, target).unwrap();
        assert_eq!(metric.compute(), 0.5);

        let prediction = Tensor::<B, 1, Int>::from_data([5, 6, 7], device);
        let target = Tensor::<B, 1, Int>::from_data([5, 6, 7, 8], device);
        let output = metric.update(prediction, target);
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))), "{output:?}");
        assert_eq!(metric.compute(), 0.5);

        metric.reset();
        assert!(metric.compute().is_nan());
    }

    #[test]
    fn voxel_accuracy() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let prediction =
            Tensor::<B, 3, Int>::from_data([[[1, 2], [3, 4]], [[0, 0], [5, 5]]], device);
        let target =
            Tensor::<B, 3, Int>::from_data([[[1, 2], [0, 0]], [[0, 1], [5, 0]]], device);

        let mut metric = VoxelAccuracy::new(None);
        metric.update(prediction.to_owned(), target.to_owned()).unwrap();
        assert_eq!(metric.compute(), 4.0 / 8.0);

        let mut metric = VoxelAccuracy::new(Some(0));
        metric.update(prediction, target).unwrap();
        assert_eq!(metric.compute(), 3.0 / 4.0);
        assert_eq!(metric.compute(), 3.0 / 4.0);

        metric.reset();
        assert_eq!(metric.ignore_label, Some(0));
        assert!(metric.compute().is_nan());
    }
}
