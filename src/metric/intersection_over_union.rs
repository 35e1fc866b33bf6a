pub use super::*;

/// How a volume is read as an occupancy mask.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interpretation {
    /// Non-zero cells are occupied.
    #[default]
    General,
    /// Cells above `0.5` are occupied.
    Occupancy,
    /// Cells below `threshold` are occupied.
    DistanceField { threshold: f32 },
    /// Cells below `0.0` are occupied.
    SignedDistanceField,
}

/// The intersection over union of occupied cells, accumulated over updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntersectionOverUnion {
    pub interpretation: Interpretation,
    intersection: u64,
    union: u64,
}

/// [`IntersectionOverUnion`] restricted to the cells selected by a mask.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaskedIntersectionOverUnion {
    pub interpretation: Interpretation,
    intersection: u64,
    union: u64,
}

impl Interpretation {
    /// Reading `input` as an occupancy mask.
    pub fn occupancy<B: Backend, const D: usize>(
        &self,
        input: Tensor<B, D>,
    ) -> Tensor<B, D, Bool> {
        match self {
            Interpretation::General => input.equal_elem(0.0).bool_not(),
            Interpretation::Occupancy => input.greater_elem(0.5),
            Interpretation::DistanceField { threshold } => input.lower_elem(*threshold),
            Interpretation::SignedDistanceField => input.lower_elem(0.0),
        }
    }
}

impl IntersectionOverUnion {
    #[inline]
    pub fn new(interpretation: Interpretation) -> Self {
        Self {
            interpretation,
            ..Default::default()
        }
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D>,
        target: Tensor<B, D>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;

        let prediction = self.interpretation.occupancy(prediction).int();
        let target = self.interpretation.occupancy(target).int();
        let (intersection, union) = intersection_and_union(prediction, target);
        self.intersection += intersection;
        self.union += union;
        Ok(())
    }
}

impl Metric for IntersectionOverUnion {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        *self = Self::new(self.interpretation);
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        ratio(self.intersection as f64, self.union as f64)
    }
}

impl MaskedIntersectionOverUnion {
    #[inline]
    pub fn new(interpretation: Interpretation) -> Self {
        Self {
            interpretation,
            ..Default::default()
        }
    }

    pub fn update<B: Backend, const D: usize>(
        &mut self,
        prediction: Tensor<B, D>,
        target: Tensor<B, D>,
        mask: Tensor<B, D, Bool>,
    ) -> Result<(), Error> {
        check_dims("the prediction", &prediction.dims(), &target.dims())?;
        check_dims("the mask", &mask.dims(), &target.dims())?;

        let mask = mask.int();
        let prediction = self.interpretation.occupancy(prediction).int() * mask.to_owned();
        let target = self.interpretation.occupancy(target).int() * mask;
        let (intersection, union) = intersection_and_union(prediction, target);
        self.intersection += intersection;
        self.union += union;
        Ok(())
    }
}

impl Metric for MaskedIntersectionOverUnion {
    type Output = f64;

    #[inline]
    fn reset(&mut self) {
        *self = Self::new(self.interpretation);
    }

    #[inline]
    fn compute(&self) -> Self::Output {
        ratio(self.intersection as f64, self.union as f64)
    }
}

/// Counting the intersection and the union of two binary integer tensors.
fn intersection_and_union<B: Backend, const D: usize>(
    prediction: Tensor<B, D, Int>,
    target: Tensor<B, D, Int>,
) -> (u64, u64) {
    let intersection = count_true((prediction.to_owned() * target.to_owned()).bool());
    let union = count_true((prediction + target).bool());
    (intersection, union)
}
