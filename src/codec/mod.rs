//! Decoders of the on-disk scene assets.
//!
//! All decoders produce dense host arrays. Tensors are made by the
//! [transforms](crate::transform).

pub mod distance_field;
pub mod raster;
pub mod segmentation;
pub mod volume;

pub use crate::error::Error;
pub use distance_field::*;
pub use raster::*;
pub use segmentation::*;
pub use volume::*;

use std::{fs, path::Path};

/// Reading all bytes of the file at `path`.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| Error::Io(path.into(), err))
}

/// Checking the header dimensions of a sparse volume against `expected_dims`.
pub(crate) fn check_sparse_dims(
    name: &str,
    dims: [usize; 3],
    expected_dims: Option<[usize; 3]>,
) -> Result<(), Error> {
    match expected_dims {
        Some(expected_dims) if dims != expected_dims => Err(Error::MismatchedShape(
            format!("the shape of {name} {dims:?}"),
            format!("{expected_dims:?}"),
        )),
        _ => Ok(()),
    }
}

/// A little-endian reader over a byte slice.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn take(
        &mut self,
        len: usize,
    ) -> Result<&'a [u8], Error> {
        if self.bytes.len() < len {
            return Err(Error::Codec(format!(
                "Unexpected end of data: {len} bytes requested, {} left",
                self.bytes.len()
            )));
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        let bytes = self.take(size_of::<u64>())?;
        Ok(u64::from_le(bytemuck::pod_read_unaligned(bytes)))
    }

    pub fn read_u32s(
        &mut self,
        count: usize,
    ) -> Result<Vec<u32>, Error> {
        let len = count.checked_mul(size_of::<u32>()).ok_or_else(|| {
            Error::Codec(format!("Too many 32-bit words: {count}"))
        })?;
        let mut words = bytemuck::pod_collect_to_vec::<u8, u32>(self.take(len)?);
        words.iter_mut().for_each(|word| *word = u32::from_le(*word));
        Ok(words)
    }

    /// Reading the shared header of sparse volumes: dimensions and entry count.
    pub fn read_sparse_header(&mut self) -> Result<([usize; 3], usize), Error> {
        let mut dims = [0; 3];
        for dim in dims.iter_mut() {
            *dim = usize::try_from(self.read_u64()?)
                .map_err(|err| Error::Codec(err.to_string()))?;
        }
        let count = usize::try_from(self.read_u64()?)
            .map_err(|err| Error::Codec(err.to_string()))?;
        Ok((dims, count))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A little-endian writer, the inverse of [`ByteReader`].
#[derive(Default)]
pub(crate) struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    pub fn write_u64(
        &mut self,
        value: u64,
    ) -> &mut Self {
        self.bytes.extend_from_slice(bytemuck::bytes_of(&value.to_le()));
        self
    }

    pub fn write_u32s(
        &mut self,
        words: &[u32],
    ) -> &mut Self {
        let words = words.iter().map(|word| word.to_le()).collect::<Vec<_>>();
        self.bytes.extend_from_slice(bytemuck::cast_slice(&words));
        self
    }

    pub fn write_sparse_header(
        &mut self,
        dims: [usize; 3],
        count: usize,
    ) -> &mut Self {
        dims.iter().for_each(|&dim| {
            self.write_u64(dim as u64);
        });
        self.write_u64(count as u64)
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn byte_reader_truncated() {
        use super::*;

        let bytes = [1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u64().unwrap(), 1);

        let output = reader.read_u64();
        assert!(matches!(output, Err(Error::Codec(_))), "{output:?}");
    }

    #[test]
    fn byte_reader_words() {
        use super::*;

        let mut writer = ByteWriter::default();
        writer.write_sparse_header([4, 5, 6], 2).write_u32s(&[7, 0x0102_0304]);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 4 * 8 + 2 * 4);
        assert_eq!(&bytes[32..36], &[7, 0, 0, 0]);
        assert_eq!(&bytes[36..40], &[4, 3, 2, 1]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_sparse_header().unwrap(), ([4, 5, 6], 2));
        assert_eq!(reader.read_u32s(2).unwrap(), vec![7, 0x0102_0304]);
        assert!(reader.is_empty());
    }
}
