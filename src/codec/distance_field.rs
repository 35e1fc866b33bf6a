//! Sparse distance fields (`*.df`).
//!
//! ## Format
//!
//! All numbers are little-endian.
//!
//! ```plaintext
//! u64 dim_x, u64 dim_y, u64 dim_z
//! u64 count
//! [u32; 3] coordinates * count
//! f32 values * count
//! ```

pub use super::*;

/// Reading the sparse distance field at `path` into a dense volume.
///
/// Cells absent from the file are `default_value`.
/// The volume must be `expected_dims` if specified.
pub fn read_sparse_distance_field(
    path: impl AsRef<Path>,
    default_value: f32,
    expected_dims: Option<[usize; 3]>,
) -> Result<Volume<f32>, Error> {
    let path = path.as_ref();
    let volume =
        decode_sparse_distance_field(&read_bytes(path)?, default_value, expected_dims)?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "front3d::loader::codec",
        "read_sparse_distance_field > {path:?} ({:?})",
        volume.dims,
    );

    Ok(volume)
}

/// Decoding a sparse distance field into a dense volume.
///
/// The header is checked against `expected_dims` before allocating.
pub fn decode_sparse_distance_field(
    bytes: &[u8],
    default_value: f32,
    expected_dims: Option<[usize; 3]>,
) -> Result<Volume<f32>, Error> {
    let mut reader = ByteReader::new(bytes);
    let (dims, count) = reader.read_sparse_header()?;
    check_sparse_dims("the sparse distance field", dims, expected_dims)?;
    let coordinates = reader.read_u32s(count.saturating_mul(3))?;
    let values = reader.read_u32s(count)?;
    if !reader.is_empty() {
        return Err(Error::Codec(
            "Trailing bytes after the sparse distance field".into(),
        ));
    }

    let mut volume = Volume::try_full(dims, default_value)?;
    for (coordinate, value) in coordinates.chunks_exact(3).zip(values) {
        let coordinate =
            [coordinate[0], coordinate[1], coordinate[2]].map(|c| c as usize);
        let offset = volume.offset(coordinate).ok_or_else(|| {
            Error::Codec(format!(
                "Coordinate {coordinate:?} is out of the volume {dims:?}"
            ))
        })?;
        volume.data[offset] = f32::from_bits(value);
    }

    Ok(volume)
}

/// Encoding the cells of `volume` differing from `default_value`.
pub fn encode_sparse_distance_field(
    volume: &Volume<f32>,
    default_value: f32,
) -> Vec<u8> {
    let (coordinates, values) = volume
        .data
        .iter()
        .enumerate()
        .filter(|(_, value)| value.to_bits() != default_value.to_bits())
        .fold(
            (Vec::<u32>::new(), Vec::<u32>::new()),
            |(mut coordinates, mut values), (offset, value)| {
                coordinates.extend(volume.coordinate(offset).map(|c| c as u32));
                values.push(value.to_bits());
                (coordinates, values)
            },
        );

    let mut writer = ByteWriter::default();
    writer
        .write_sparse_header(volume.dims, values.len())
        .write_u32s(&coordinates)
        .write_u32s(&values);
    writer.into_bytes()
}
