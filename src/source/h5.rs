//! HDF5-backed attribute source.
//!
//! Group and dataset handles are opened lazily as the traversal reaches
//! them; a child that cannot be opened is carried as `None` and reported
//! through `exists()`. Attribute reads dispatch on the stored datatype and
//! map anything unreadable to "no value" instead of an error.

use std::path::Path;

use hdf5::types::{TypeDescriptor, VarLenUnicode};

use crate::error::BfError;
use crate::source::{
    AttrValue, BeamMeta, CoordinateKind, CoordinateMeta, CoordinatesMeta, FileMeta, MetaNode,
    SapMeta, StokesMeta,
};

/// An opened beamformed file.
pub struct BfFile {
    file: hdf5::File,
}

impl BfFile {
    /// Open a beamformed HDF5 file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BfError> {
        // so that libhdf5 doesn't print errors to stdout
        hdf5::silence_errors(true);

        // If the file doesn't exist, hdf5::File::open will handle it, but the
        // error message is horrendous.
        if !path.as_ref().exists() {
            return Err(BfError::FileDoesntExist(
                path.as_ref().display().to_string(),
            ));
        }
        let file = hdf5::File::open(path)?;
        Ok(BfFile { file })
    }
}

/// Read one attribute, dispatching on its stored type. Anything absent,
/// unreadable or of an unsupported type class is "no value".
fn read_attr(loc: &hdf5::Location, name: &str) -> Option<AttrValue> {
    let attr = loc.attr(name).ok()?;
    let desc = attr.dtype().ok()?.to_descriptor().ok()?;
    let scalar = attr.ndim() == 0;
    match desc {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => {
            if scalar {
                attr.read_scalar::<i64>().ok().map(AttrValue::Int)
            } else {
                attr.read_raw::<i64>().ok().map(AttrValue::IntList)
            }
        }
        TypeDescriptor::Float(_) => {
            if scalar {
                attr.read_scalar::<f64>().ok().map(AttrValue::Float)
            } else {
                attr.read_raw::<f64>().ok().map(AttrValue::FloatList)
            }
        }
        TypeDescriptor::Boolean => attr.read_scalar::<bool>().ok().map(AttrValue::Bool),
        TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => {
            if scalar {
                attr.read_scalar::<VarLenUnicode>()
                    .ok()
                    .map(|s| AttrValue::Str(s.to_string()))
            } else {
                attr.read_raw::<VarLenUnicode>().ok().map(|v| {
                    AttrValue::StrList(v.into_iter().map(|s| s.to_string()).collect())
                })
            }
        }
        _ => None,
    }
}

/// Read the first usable declared-count attribute, 0 when none is set.
fn count_attr(loc: &hdf5::Location, names: &[&str]) -> usize {
    for name in names {
        if let Some(AttrValue::Int(n)) = read_attr(loc, name) {
            if n >= 0 {
                return n as usize;
            }
        }
    }
    0
}

impl MetaNode for BfFile {
    fn exists(&self) -> bool {
        true
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(&self.file, name)
    }
}

impl FileMeta for BfFile {
    type Sap = SapGroup;

    fn nof_sub_array_pointings(&self) -> usize {
        count_attr(
            &self.file,
            &["NOF_SUB_ARRAY_POINTINGS", "OBSERVATION_NOF_SUB_ARRAY_POINTINGS"],
        )
    }

    fn sub_array_pointing(&self, nr: usize) -> SapGroup {
        SapGroup {
            nr,
            group: self.file.group(&format!("SUB_ARRAY_POINTING_{nr:03}")).ok(),
        }
    }
}

/// A `SUB_ARRAY_POINTING_%03d` group handle.
pub struct SapGroup {
    nr: usize,
    group: Option<hdf5::Group>,
}

impl MetaNode for SapGroup {
    fn exists(&self) -> bool {
        self.group.is_some()
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(self.group.as_ref()?, name)
    }
}

impl SapMeta for SapGroup {
    type Beam = BeamGroup;

    fn name(&self) -> String {
        format!("SUB_ARRAY_POINTING_{:03}", self.nr)
    }

    fn nof_beams(&self) -> usize {
        match &self.group {
            Some(group) => count_attr(group, &["OBSERVATION_NOF_BEAMS", "NOF_BEAMS"]),
            None => 0,
        }
    }

    fn beam(&self, nr: usize) -> BeamGroup {
        BeamGroup {
            nr,
            group: self
                .group
                .as_ref()
                .and_then(|g| g.group(&format!("BEAM_{nr:03}")).ok()),
        }
    }
}

/// A `BEAM_%03d` group handle.
pub struct BeamGroup {
    nr: usize,
    group: Option<hdf5::Group>,
}

impl MetaNode for BeamGroup {
    fn exists(&self) -> bool {
        self.group.is_some()
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(self.group.as_ref()?, name)
    }
}

impl BeamMeta for BeamGroup {
    type Stokes = StokesSet;
    type Coordinates = CoordinatesGroup;

    fn name(&self) -> String {
        format!("BEAM_{:03}", self.nr)
    }

    fn nof_stokes(&self) -> usize {
        match &self.group {
            Some(group) => count_attr(group, &["OBSERVATION_NOF_STOKES", "NOF_STOKES"]),
            None => 0,
        }
    }

    fn stokes(&self, nr: usize) -> StokesSet {
        StokesSet {
            dataset: self
                .group
                .as_ref()
                .and_then(|g| g.dataset(&format!("STOKES_{nr}")).ok()),
        }
    }

    fn stokes_components(&self) -> Vec<String> {
        match self.attr("STOKES_COMPONENTS") {
            Some(AttrValue::StrList(components)) => components,
            Some(AttrValue::Str(component)) => vec![component],
            _ => Vec::new(),
        }
    }

    fn coordinates(&self) -> CoordinatesGroup {
        CoordinatesGroup {
            group: self.group.as_ref().and_then(|g| g.group("COORDINATES").ok()),
        }
    }
}

/// A `STOKES_%d` dataset handle. The metadata of interest lives in the
/// dataset's attributes; the sample data itself is never touched.
pub struct StokesSet {
    dataset: Option<hdf5::Dataset>,
}

impl MetaNode for StokesSet {
    fn exists(&self) -> bool {
        self.dataset.is_some()
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(self.dataset.as_ref()?, name)
    }
}

impl StokesMeta for StokesSet {
    fn component(&self) -> Option<String> {
        match self.attr("STOKES_COMPONENT") {
            Some(AttrValue::Str(component)) => Some(component),
            _ => None,
        }
    }
}

/// The per-beam `COORDINATES` group handle.
pub struct CoordinatesGroup {
    group: Option<hdf5::Group>,
}

impl MetaNode for CoordinatesGroup {
    fn exists(&self) -> bool {
        self.group.is_some()
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(self.group.as_ref()?, name)
    }
}

impl CoordinatesMeta for CoordinatesGroup {
    type Coordinate = CoordinateGroup;

    fn nof_coordinates(&self) -> usize {
        match &self.group {
            Some(group) => count_attr(group, &["NOF_COORDINATES"]),
            None => 0,
        }
    }

    fn coordinate(&self, nr: usize) -> CoordinateGroup {
        CoordinateGroup {
            group: self
                .group
                .as_ref()
                .and_then(|g| g.group(&format!("COORDINATE_{nr}")).ok()),
        }
    }
}

/// A `COORDINATE_%d` group handle.
pub struct CoordinateGroup {
    group: Option<hdf5::Group>,
}

impl MetaNode for CoordinateGroup {
    fn exists(&self) -> bool {
        self.group.is_some()
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        read_attr(self.group.as_ref()?, name)
    }
}

impl CoordinateMeta for CoordinateGroup {
    fn kind(&self) -> CoordinateKind {
        // COORDINATE_TYPE carries "Time"/"Spectral"; older writers only set
        // GROUPTYPE to "TimeCoord"/"SpectralCoord".
        let tag = match self.attr("COORDINATE_TYPE") {
            Some(AttrValue::Str(tag)) => tag,
            _ => match self.attr("GROUPTYPE") {
                Some(AttrValue::Str(tag)) => tag,
                _ => return CoordinateKind::Other("Unknown".to_string()),
            },
        };
        match tag.as_str() {
            "Time" | "TimeCoord" => CoordinateKind::Time,
            "Spectral" | "SpectralCoord" => CoordinateKind::Spectral,
            _ => CoordinateKind::Other(tag),
        }
    }
}
