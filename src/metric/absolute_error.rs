pub use super::*;

/// The mean absolute error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AbsoluteError {
    sum: f64,
    count: u64,
}

/// The mean absolute error over the cells selected by a mask.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaskedAbsoluteError {
    sum: f64,
    count: u64,
}

impl AbsoluteError {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;

        self.count += target.shape().num_elements() as u64;
        self.sum += sum((prediction - target).abs());
        Ok(())
    }
}

impl Metric for AbsoluteError {
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

impl MaskedAbsoluteError {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D>,
        target: Tensor<B, D>,
        mask: Tensor<B, D, Bool>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;
        check_dims("the mask", &mask.dims(), &target.dims())?;

        self.sum += sum((prediction - target).abs() * mask.to_owned().float());
        self.count += count_true(mask);
        Ok(())
    }
}

impl Metric for MaskedAbsoluteError {
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
