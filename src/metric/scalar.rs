pub use super::*;

/// The mean of scalar values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scalar {
    sum: f64,
    count: u64,
}

/// The mean of the tensor elements selected by a mask.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaskedScalar {
    sum: f64,
    count: u64,
}

impl Scalar {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(
        &mut self,
        value: f64,
    ) -> Result<(), Error> {
        self.sum += value;
        self.count += 1;
        Ok(())
    }
}

impl Metric for Scalar {
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

impl MaskedScalar {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulating `values` where `mask` is true.
    pub fn update<B: Backend, const D: usize>(
        &mut self,
        values: Tensor<B, D>,
        mask: Tensor<B, D, Bool>,
    ) -> Result<(), Error> {
        check_dims("the mask", &mask.dims(), &values.dims())?;

        self.sum += sum(values * mask.to_owned().float());
        self.count += count_true(mask);
        Ok(())
    }
}

impl Metric for MaskedScalar {
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
