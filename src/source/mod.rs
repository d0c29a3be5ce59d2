//! The attribute source a beamformed file is read through.
//!
//! The renderer only ever talks to these traits, so it can be driven by the
//! HDF5-backed source in production and by an in-memory fake in tests. Nodes
//! are cheap handles constructed lazily during traversal; a handle for a
//! child that does not exist is still returned and answers `exists() ==
//! false` without ever failing.

use std::fmt;

pub mod h5;

#[cfg(any(test, feature = "test-utils"))]
pub mod fake;

/// A typed attribute value. An attribute that is present but carries no
/// value is reported as `None` by [`MetaNode::attr`]; reads never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Bool(v) => write!(f, "{v}"),
            AttrValue::StrList(v) => write!(f, "[{}]", v.join(", ")),
            AttrValue::IntList(v) => write_list(f, v),
            AttrValue::FloatList(v) => write_list(f, v),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

/// The coordinate variant, resolved once from the source's declared type
/// attribute rather than re-compared as a string at every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateKind {
    Time,
    Spectral,
    Other(String),
}

/// Common surface of every node: existence and attribute reads.
pub trait MetaNode {
    fn exists(&self) -> bool;
    fn attr(&self, name: &str) -> Option<AttrValue>;
}

/// The file (root) node.
pub trait FileMeta: MetaNode {
    type Sap: SapMeta;

    /// Declared number of sub-array pointings.
    fn nof_sub_array_pointings(&self) -> usize;
    /// Handle for SAP `nr`, which may not exist.
    fn sub_array_pointing(&self, nr: usize) -> Self::Sap;
}

/// A sub-array pointing group.
pub trait SapMeta: MetaNode {
    type Beam: BeamMeta;

    /// The group's display name, `SUB_ARRAY_POINTING_000`.
    fn name(&self) -> String;
    fn nof_beams(&self) -> usize;
    fn beam(&self, nr: usize) -> Self::Beam;
}

/// A beam group.
pub trait BeamMeta: MetaNode {
    type Stokes: StokesMeta;
    type Coordinates: CoordinatesMeta;

    /// The group's display name, `BEAM_000`.
    fn name(&self) -> String;
    fn nof_stokes(&self) -> usize;
    fn stokes(&self, nr: usize) -> Self::Stokes;
    /// The beam's Stokes component set, e.g. `["I", "Q"]`.
    fn stokes_components(&self) -> Vec<String>;
    fn coordinates(&self) -> Self::Coordinates;
}

/// A Stokes dataset (leaf).
pub trait StokesMeta: MetaNode {
    /// The dataset's component name, if declared.
    fn component(&self) -> Option<String>;
}

/// The per-beam coordinate group.
pub trait CoordinatesMeta: MetaNode {
    type Coordinate: CoordinateMeta;

    fn nof_coordinates(&self) -> usize;
    fn coordinate(&self, nr: usize) -> Self::Coordinate;
}

/// A single coordinate within the coordinate group.
pub trait CoordinateMeta: MetaNode {
    fn kind(&self) -> CoordinateKind;
}
