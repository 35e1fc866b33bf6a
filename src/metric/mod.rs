//! Evaluation metrics.
//!
//! Every metric accumulates sufficient statistics through an inherent
//! `update` method and summarizes them with [`Metric::compute`].
//! A failed `update` leaves the statistics unchanged.
//! Summaries over no data are `NaN`.

pub mod absolute_error;
pub mod accuracy;
pub mod instance_intersection_over_union;
pub mod intersection_over_union;
pub mod mean_average_precision;
pub mod scalar;
pub mod semantic_intersection_over_union;

pub use crate::error::Error;
pub use absolute_error::*;
pub use accuracy::*;
pub use burn::tensor::{backend::Backend, Bool, Int, Tensor};
pub use instance_intersection_over_union::*;
pub use intersection_over_union::*;
pub use mean_average_precision::*;
pub use scalar::*;
pub use semantic_intersection_over_union::*;

use burn::tensor::ElementConversion;

/// An accumulator of evaluation statistics.
pub trait Metric {
    type Output;

    /// Clearing the statistics.
    fn reset(&mut self);

    /// Summarizing the statistics without changing them.
    fn compute(&self) -> Self::Output;
}

/// Checking that `dims` equals `dims_target`.
pub(crate) fn check_dims(
    name: &str,
    dims: &[usize],
    dims_target: &[usize],
) -> Result<(), Error> {
    if dims != dims_target {
        return Err(Error::MismatchedShape(
            format!("the shape of {name} {dims:?}"),
            format!("{dims_target:?}"),
        ));
    }
    Ok(())
}

/// The count of true elements.
pub(crate) fn count_true<B: Backend, const D: usize>(mask: Tensor<B, D, Bool>) -> u64 {
    if mask.shape().num_elements() == 0 {
        return 0;
    }
    mask.int().sum().into_scalar().elem::<i64>() as u64
}

/// The sum of all elements in double precision.
pub(crate) fn sum<B: Backend, const D: usize>(input: Tensor<B, D>) -> f64 {
    if input.shape().num_elements() == 0 {
        return 0.0;
    }
    input.sum().into_scalar().elem::<f64>()
}

/// `numerator / denominator`, or `NaN` if the denominator is zero.
#[inline]
pub(crate) fn ratio(
    numerator: f64,
    denominator: f64,
) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// The elements of an integer tensor in row-major order.
pub(crate) fn to_labels<B: Backend, const D: usize>(input: Tensor<B, D, Int>) -> Vec<i64> {
    input.into_data().iter::<i64>().collect()
}

/// The elements of a boolean tensor in row-major order.
pub(crate) fn to_flags<B: Backend, const D: usize>(input: Tensor<B, D, Bool>) -> Vec<bool> {
    input.into_data().iter::<bool>().collect()
}

#[cfg(test)]
mod tests {
    #[test]
    fn check_dims() {
        use super::*;

        assert!(super::check_dims("the prediction", &[2, 3], &[2, 3]).is_ok());

        let output = super::check_dims("the prediction", &[2, 3], &[3, 2]);
        assert!(matches!(output, Err(Error::MismatchedShape(_, _))), "{output:?}");
    }

    #[test]
    fn count_true_and_sum() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let mask = Tensor::<B, 2, Bool>::from_data([[true, false], [true, true]], device);
        assert_eq!(count_true(mask), 3);

        let input = Tensor::<B, 2>::from_data([[0.5, 1.0], [2.0, -4.0]], device);
        assert_eq!(super::sum(input), -0.5);

        let input = Tensor::<B, 2>::zeros([0, 3], device);
        assert_eq!(super::sum(input), 0.0);

        assert!(ratio(1.0, 0.0).is_nan());
        assert_eq!(ratio(1.0, 4.0), 0.25);
    }
}
