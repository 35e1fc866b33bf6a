//! Dense host volumes.

pub use super::*;

/// A dense 3D grid in `[X, Y, Z]` order, `Z` varying fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume<T> {
    pub dims: [usize; 3],
    pub data: Vec<T>,
}

impl<T: Clone> Volume<T> {
    /// A volume with every cell set to `value`.
    pub fn full(
        dims: [usize; 3],
        value: T,
    ) -> Self {
        Self {
            dims,
            data: vec![value; dims.iter().product()],
        }
    }

    /// A volume with every cell set to `value`.
    ///
    /// Fails instead of aborting if the cells cannot be allocated.
    pub fn try_full(
        dims: [usize; 3],
        value: T,
    ) -> Result<Self, Error> {
        let len = dims
            .iter()
            .try_fold(1_usize, |len, &dim| len.checked_mul(dim))
            .ok_or_else(|| Error::Codec(format!("Too many cells in the volume {dims:?}")))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|err| Error::Codec(format!("{err} for the volume {dims:?}")))?;
        data.resize(len, value);

        Ok(Self { dims, data })
    }
}

impl<T> Volume<T> {
    /// The cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The linear offset of `[x, y, z]`, or `None` if it is out of bounds.
    #[inline]
    pub fn offset(
        &self,
        coordinate: [usize; 3],
    ) -> Option<usize> {
        let [x, y, z] = coordinate;
        let [_, dim_y, dim_z] = self.dims;
        (x < self.dims[0] && y < dim_y && z < dim_z)
            .then(|| (x * dim_y + y) * dim_z + z)
    }

    #[inline]
    pub fn get(
        &self,
        coordinate: [usize; 3],
    ) -> Option<&T> {
        self.offset(coordinate).map(|offset| &self.data[offset])
    }

    /// The coordinate of the linear `offset`.
    #[inline]
    pub fn coordinate(
        &self,
        offset: usize,
    ) -> [usize; 3] {
        let [_, dim_y, dim_z] = self.dims;
        [offset / (dim_y * dim_z), offset / dim_z % dim_y, offset % dim_z]
    }

    /// The size of the cells in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len() * size_of::<T>()
    }
}
