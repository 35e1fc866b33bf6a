//! Dataset catalog.
//!
//! A static table mapping dataset names to their file lists and roots.

pub use crate::error::Error;

use crate::preset::catalog::DATASETS;
use std::path::Path;

/// The loader building a registered dataset.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DatasetFactory {
    /// [`Front3dDataset`](crate::dataset::front3d::Front3dDataset)
    Front3d,
}

/// A registered dataset.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DatasetDescriptor {
    pub name: &'static str,
    /// The text file listing `scene_id/image_id` entries.
    pub file_list_path: &'static str,
    /// The directory holding one sub-directory per scene.
    pub dataset_root_path: &'static str,
    pub factory: DatasetFactory,
}

/// Lookup of [`DatasetDescriptor`] by name.
#[derive(Clone, Copy, Debug, Default)]
pub struct DatasetCatalog;

impl DatasetCatalog {
    /// Returns the descriptor registered as `name`.
    pub fn get(name: &str) -> Result<&'static DatasetDescriptor, Error> {
        DATASETS
            .iter()
            .find(|descriptor| descriptor.name == name)
            .ok_or_else(|| Error::UnknownDataset(name.into()))
    }

    /// Returns the names of all registered datasets.
    pub fn names() -> impl Iterator<Item = &'static str> {
        DATASETS.iter().map(|descriptor| descriptor.name)
    }
}

impl DatasetDescriptor {
    #[inline]
    pub fn file_list_path(&self) -> &'static Path {
        Path::new(self.file_list_path)
    }

    #[inline]
    pub fn dataset_root_path(&self) -> &'static Path {
        Path::new(self.dataset_root_path)
    }
}
