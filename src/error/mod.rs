use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Codec Error: {0}")]
    Codec(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Image Error: {1} ({0:?})")]
    Image(PathBuf, #[source] image::ImageError),

    #[error("Index Error: {0} should be less than {1}")]
    IndexOutOfBounds(usize, usize),

    #[error("IO Error: {1} ({0:?})")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Malformed Sample Name: {0:?} should be \"scene_id/image_id\"")]
    MalformedSampleName(String),

    #[error("Field Error: {0} requires {1} to be selected")]
    MissingFieldDependency(String, String),

    #[error("Shape Error: {0} should be {1}")]
    MismatchedShape(String, String),

    #[error("NPZ Error: {1} ({0:?})")]
    Npz(PathBuf, #[source] ndarray_npy::ReadNpzError),

    #[error("Unknown Dataset: {0:?}")]
    UnknownDataset(String),

    #[error("Unknown Field: {0:?}")]
    UnknownField(String),
}
