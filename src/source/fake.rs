//! In-memory attribute source for tests.
//!
//! Built tree-first with the `with_*` helpers, then handed to the renderer.
//! Every node counts its attribute reads through a shared cell, so tests can
//! assert that collapsed or absent nodes are never read. Handles returned to
//! the renderer are clones and share their counter with the original node.

use std::cell::Cell;
use std::rc::Rc;

use crate::source::{
    AttrValue, BeamMeta, CoordinateKind, CoordinateMeta, CoordinatesMeta, FileMeta, MetaNode,
    SapMeta, StokesMeta,
};

/// Attribute bag with a read counter shared across clones.
#[derive(Debug, Clone, Default)]
pub struct FakeAttrs {
    entries: Vec<(String, AttrValue)>,
    reads: Rc<Cell<usize>>,
}

impl FakeAttrs {
    pub fn set(&mut self, name: &str, value: AttrValue) {
        self.entries.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<AttrValue> {
        self.reads.set(self.reads.get() + 1);
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// How many attribute reads this node (and its clones) has served.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeFile {
    pub attrs: FakeAttrs,
    pub saps: Vec<FakeSap>,
}

impl FakeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn with_sap(mut self, sap: FakeSap) -> Self {
        self.saps.push(sap);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeSap {
    pub present: bool,
    pub nr: usize,
    pub attrs: FakeAttrs,
    pub beams: Vec<FakeBeam>,
}

impl FakeSap {
    pub fn new(nr: usize) -> Self {
        Self {
            present: true,
            nr,
            attrs: FakeAttrs::default(),
            beams: Vec::new(),
        }
    }

    /// A handle for a SAP that is not in the file.
    pub fn absent(nr: usize) -> Self {
        Self {
            present: false,
            ..Self::new(nr)
        }
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn with_beam(mut self, beam: FakeBeam) -> Self {
        self.beams.push(beam);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeBeam {
    pub present: bool,
    pub nr: usize,
    pub attrs: FakeAttrs,
    pub stokes: Vec<FakeStokes>,
    pub coordinates: FakeCoordinates,
}

impl FakeBeam {
    pub fn new(nr: usize) -> Self {
        Self {
            present: true,
            nr,
            attrs: FakeAttrs::default(),
            stokes: Vec::new(),
            coordinates: FakeCoordinates::absent(),
        }
    }

    pub fn absent(nr: usize) -> Self {
        Self {
            present: false,
            ..Self::new(nr)
        }
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn with_stokes(mut self, stokes: FakeStokes) -> Self {
        self.stokes.push(stokes);
        self
    }

    pub fn with_coordinates(mut self, coordinates: FakeCoordinates) -> Self {
        self.coordinates = coordinates;
        self
    }

    /// Declare a component set, as `STOKES_COMPONENTS` would.
    pub fn with_components(self, components: &[&str]) -> Self {
        let list = components.iter().map(|c| c.to_string()).collect();
        self.with_attr("STOKES_COMPONENTS", AttrValue::StrList(list))
    }
}

#[derive(Debug, Clone)]
pub struct FakeStokes {
    pub present: bool,
    pub attrs: FakeAttrs,
}

impl FakeStokes {
    /// A dataset carrying the given Stokes component.
    pub fn component(name: &str) -> Self {
        let mut attrs = FakeAttrs::default();
        attrs.set("STOKES_COMPONENT", AttrValue::Str(name.to_string()));
        Self {
            present: true,
            attrs,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            attrs: FakeAttrs::default(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeCoordinates {
    pub present: bool,
    pub attrs: FakeAttrs,
    pub coordinates: Vec<FakeCoordinate>,
}

impl FakeCoordinates {
    pub fn new() -> Self {
        Self {
            present: true,
            attrs: FakeAttrs::default(),
            coordinates: Vec::new(),
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new()
        }
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn with_coordinate(mut self, coordinate: FakeCoordinate) -> Self {
        self.coordinates.push(coordinate);
        self
    }
}

impl Default for FakeCoordinates {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct FakeCoordinate {
    pub present: bool,
    pub kind: CoordinateKind,
    pub attrs: FakeAttrs,
}

impl FakeCoordinate {
    pub fn new(kind: CoordinateKind) -> Self {
        Self {
            present: true,
            kind,
            attrs: FakeAttrs::default(),
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            kind: CoordinateKind::Other("Unknown".to_string()),
            attrs: FakeAttrs::default(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: AttrValue) -> Self {
        self.attrs.set(name, value);
        self
    }
}

impl MetaNode for FakeFile {
    fn exists(&self) -> bool {
        true
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl FileMeta for FakeFile {
    type Sap = FakeSap;

    fn nof_sub_array_pointings(&self) -> usize {
        self.saps.len()
    }

    fn sub_array_pointing(&self, nr: usize) -> FakeSap {
        self.saps
            .get(nr)
            .cloned()
            .unwrap_or_else(|| FakeSap::absent(nr))
    }
}

impl MetaNode for FakeSap {
    fn exists(&self) -> bool {
        self.present
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl SapMeta for FakeSap {
    type Beam = FakeBeam;

    fn name(&self) -> String {
        format!("SUB_ARRAY_POINTING_{:03}", self.nr)
    }

    fn nof_beams(&self) -> usize {
        self.beams.len()
    }

    fn beam(&self, nr: usize) -> FakeBeam {
        self.beams
            .get(nr)
            .cloned()
            .unwrap_or_else(|| FakeBeam::absent(nr))
    }
}

impl MetaNode for FakeBeam {
    fn exists(&self) -> bool {
        self.present
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl BeamMeta for FakeBeam {
    type Stokes = FakeStokes;
    type Coordinates = FakeCoordinates;

    fn name(&self) -> String {
        format!("BEAM_{:03}", self.nr)
    }

    fn nof_stokes(&self) -> usize {
        self.stokes.len()
    }

    fn stokes(&self, nr: usize) -> FakeStokes {
        self.stokes
            .get(nr)
            .cloned()
            .unwrap_or_else(FakeStokes::absent)
    }

    fn stokes_components(&self) -> Vec<String> {
        match self.attr("STOKES_COMPONENTS") {
            Some(AttrValue::StrList(components)) => components,
            Some(AttrValue::Str(component)) => vec![component],
            _ => Vec::new(),
        }
    }

    fn coordinates(&self) -> FakeCoordinates {
        self.coordinates.clone()
    }
}

impl MetaNode for FakeStokes {
    fn exists(&self) -> bool {
        self.present
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl StokesMeta for FakeStokes {
    fn component(&self) -> Option<String> {
        match self.attr("STOKES_COMPONENT") {
            Some(AttrValue::Str(component)) => Some(component),
            _ => None,
        }
    }
}

impl MetaNode for FakeCoordinates {
    fn exists(&self) -> bool {
        self.present
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl CoordinatesMeta for FakeCoordinates {
    type Coordinate = FakeCoordinate;

    fn nof_coordinates(&self) -> usize {
        self.coordinates.len()
    }

    fn coordinate(&self, nr: usize) -> FakeCoordinate {
        self.coordinates
            .get(nr)
            .cloned()
            .unwrap_or_else(FakeCoordinate::absent)
    }
}

impl MetaNode for FakeCoordinate {
    fn exists(&self) -> bool {
        self.present
    }

    fn attr(&self, name: &str) -> Option<AttrValue> {
        self.attrs.get(name)
    }
}

impl CoordinateMeta for FakeCoordinate {
    fn kind(&self) -> CoordinateKind {
        self.kind.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_read_counter() {
        let file = FakeFile::new()
            .with_sap(FakeSap::new(0).with_attr("GROUPTYPE", AttrValue::Str("SAP".into())));
        let handle = file.sub_array_pointing(0);
        handle.attr("GROUPTYPE");
        handle.attr("GROUPTYPE");
        assert_eq!(file.saps[0].attrs.read_count(), 2);
    }

    #[test]
    fn missing_children_are_absent() {
        let file = FakeFile::new();
        assert!(!file.sub_array_pointing(3).exists());
        assert!(!FakeSap::new(0).beam(0).exists());
    }

    #[test]
    fn components_come_from_the_attribute() {
        let beam = FakeBeam::new(0).with_components(&["I", "Q"]);
        assert_eq!(beam.stokes_components(), vec!["I", "Q"]);
    }
}
