//! Sparse 3D segmentations (`*.sem`).
//!
//! ## Format
//!
//! All numbers are little-endian.
//!
//! ```plaintext
//! u64 dim_x, u64 dim_y, u64 dim_z
//! u64 count
//! [u32; 3] coordinates * count
//! u32 labels * count
//! ```
//!
//! Each label packs both ids as `semantic * max_instance_id + instance`.

pub use super::*;

/// Dense semantic and instance volumes of one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Segmentation3d {
    pub semantic: Volume<u32>,
    pub instance: Volume<u32>,
}

/// Reading the sparse segmentation at `path` into dense volumes.
///
/// Cells absent from the file are `default_value` in both volumes.
/// The volumes must be `expected_dims` if specified.
pub fn read_sparse_segmentation(
    path: impl AsRef<Path>,
    max_instance_id: u32,
    default_value: u32,
    expected_dims: Option<[usize; 3]>,
) -> Result<Segmentation3d, Error> {
    let path = path.as_ref();
    let segmentation = decode_sparse_segmentation(
        &read_bytes(path)?,
        max_instance_id,
        default_value,
        expected_dims,
    )?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "front3d::loader::codec",
        "read_sparse_segmentation > {path:?} ({:?})",
        segmentation.semantic.dims,
    );

    Ok(segmentation)
}

/// Decoding a sparse segmentation into dense semantic and instance volumes.
///
/// The header is checked against `expected_dims` before allocating.
pub fn decode_sparse_segmentation(
    bytes: &[u8],
    max_instance_id: u32,
    default_value: u32,
    expected_dims: Option<[usize; 3]>,
) -> Result<Segmentation3d, Error> {
    if max_instance_id == 0 {
        return Err(Error::Codec("max_instance_id should be positive".into()));
    }

    let mut reader = ByteReader::new(bytes);
    let (dims, count) = reader.read_sparse_header()?;
    check_sparse_dims("the sparse segmentation", dims, expected_dims)?;
    let coordinates = reader.read_u32s(count.saturating_mul(3))?;
    let labels = reader.read_u32s(count)?;
    if !reader.is_empty() {
        return Err(Error::Codec(
            "Trailing bytes after the sparse segmentation".into(),
        ));
    }

    let mut semantic = Volume::try_full(dims, default_value)?;
    let mut instance = Volume::try_full(dims, default_value)?;
    for (coordinate, label) in coordinates.chunks_exact(3).zip(labels) {
        let coordinate =
            [coordinate[0], coordinate[1], coordinate[2]].map(|c| c as usize);
        let offset = semantic.offset(coordinate).ok_or_else(|| {
            Error::Codec(format!(
                "Coordinate {coordinate:?} is out of the volume {dims:?}"
            ))
        })?;
        semantic.data[offset] = label / max_instance_id;
        instance.data[offset] = label % max_instance_id;
    }

    Ok(Segmentation3d { semantic, instance })
}

/// Encoding the labeled cells of `segmentation`.
///
/// A cell is labeled if either id differs from `default_value`.
pub fn encode_sparse_segmentation(
    segmentation: &Segmentation3d,
    max_instance_id: u32,
    default_value: u32,
) -> Vec<u8> {
    let semantic = &segmentation.semantic;
    let instance = &segmentation.instance;
    let (coordinates, labels) = semantic
        .data
        .iter()
        .zip(&instance.data)
        .enumerate()
        .filter(|(_, (&s, &i))| s != default_value || i != default_value)
        .fold(
            (Vec::<u32>::new(), Vec::<u32>::new()),
            |(mut coordinates, mut labels), (offset, (&s, &i))| {
                coordinates.extend(semantic.coordinate(offset).map(|c| c as u32));
                labels.push(s * max_instance_id + i);
                (coordinates, labels)
            },
        );

    let mut writer = ByteWriter::default();
    writer
        .write_sparse_header(semantic.dims, labels.len())
        .write_u32s(&coordinates)
        .write_u32s(&labels);
    writer.into_bytes()
}
