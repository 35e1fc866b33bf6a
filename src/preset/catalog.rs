//! Registered datasets.

pub use crate::catalog::{DatasetDescriptor, DatasetFactory};

/// The registered datasets, looked up by [`DatasetDescriptor::name`].
pub static DATASETS: &[DatasetDescriptor] = &[
    DatasetDescriptor {
        name: "Front3DImages_Train",
        file_list_path: "resources/front3d/train_list_2d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3DImages_Validation",
        file_list_path: "resources/front3d/validation_list_2d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3DImages_Test",
        file_list_path: "resources/front3d/test_list_2d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3D_Sample",
        file_list_path: "resources/front3d/sample.txt",
        dataset_root_path: "data/front3d-sample/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3D_Train",
        file_list_path: "resources/front3d/train_list_3d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3D_Validation",
        file_list_path: "resources/front3d/validation_list_3d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
    DatasetDescriptor {
        name: "Front3D_Test",
        file_list_path: "resources/front3d/test_list_3d.txt",
        dataset_root_path: "data/front3d/",
        factory: DatasetFactory::Front3d,
    },
];
