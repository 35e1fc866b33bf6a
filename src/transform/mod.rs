//! Transforms over images and volumes.
//!
//! Each transform is a small value implementing [`Transform`].
//! Chains are composed statically with [`Compose::then`].

pub mod image2d;
pub mod segmentation2d;
pub mod volume3d;

pub use crate::{codec, error::Error, structure};
pub use burn::tensor::{backend::Backend, Bool, Int, Tensor, TensorData};
pub use image2d::*;
pub use segmentation2d::*;
pub use volume3d::*;

/// A transform from `I` to [`Transform::Output`].
pub trait Transform<I> {
    type Output;

    fn forward(
        &self,
        input: I,
    ) -> Self::Output;
}

/// Composing transforms into a [`Chain`].
pub trait Compose: Sized {
    /// Applying `next` after `self`.
    #[inline]
    fn then<N>(
        self,
        next: N,
    ) -> Chain<Self, N> {
        Chain { first: self, next }
    }
}

impl<T> Compose for T {}

/// Two transforms applied in order.
#[derive(Clone, Debug)]
pub struct Chain<F, N> {
    pub first: F,
    pub next: N,
}

impl<I, F, N> Transform<I> for Chain<F, N>
where
    F: Transform<I>,
    N: Transform<F::Output>,
{
    type Output = N::Output;

    #[inline]
    fn forward(
        &self,
        input: I,
    ) -> Self::Output {
        self.next.forward(self.first.forward(input))
    }
}
