//! Datasets and field selection.

pub mod front3d;

pub use crate::error::Error;
pub use front3d::*;

use std::{collections::BTreeSet, fmt, str::FromStr};

/// A field that a sample can carry.
///
/// The declaration order is a valid evaluation order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Field {
    Color,
    Depth,
    Instance2d,
    Geometry,
    Semantic3d,
    Instance3d,
}

/// A validated selection of [`Field`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldSet {
    fields: BTreeSet<Field>,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Color,
        Field::Depth,
        Field::Instance2d,
        Field::Geometry,
        Field::Semantic3d,
        Field::Instance3d,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Field::Color => "color",
            Field::Depth => "depth",
            Field::Instance2d => "instance2d",
            Field::Geometry => "geometry",
            Field::Semantic3d => "semantic3d",
            Field::Instance3d => "instance3d",
        }
    }

    /// The fields that must be evaluated before this one.
    ///
    /// 3D instance ids are remapped through the 2D instance locations.
    #[inline]
    pub fn dependencies(&self) -> &'static [Field] {
        match self {
            Field::Instance3d => &[Field::Instance2d],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| Error::UnknownField(name.into()))
    }
}

impl FieldSet {
    /// Selecting `fields`.
    ///
    /// Fails if a dependency of a selected field is missing.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Result<Self, Error> {
        let fields = Self {
            fields: fields.into_iter().collect(),
        };
        fields.validate()?;
        Ok(fields)
    }

    /// Selecting every field.
    #[inline]
    pub fn all() -> Self {
        Self {
            fields: Field::ALL.into_iter().collect(),
        }
    }

    #[inline]
    pub fn contains(
        &self,
        field: Field,
    ) -> bool {
        self.fields.contains(&field)
    }

    /// Iterating the fields so that dependencies come first.
    #[inline]
    pub fn in_dependency_order(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checking that the dependencies of each field are selected.
    pub fn validate(&self) -> Result<(), Error> {
        self.fields.iter().try_for_each(|field| {
            field
                .dependencies()
                .iter()
                .find(|dependency| !self.contains(**dependency))
                .map_or(Ok(()), |dependency| {
                    Err(Error::MissingFieldDependency(
                        field.to_string(),
                        dependency.to_string(),
                    ))
                })
        })
    }
}

impl FromStr for FieldSet {
    type Err = Error;

    /// Parsing comma-separated field names, e.g., `"color,depth"`.
    fn from_str(names: &str) -> Result<Self, Self::Err> {
        let fields = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Field::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(fields)
    }
}
