//! Renderer behavior against an in-memory attribute source.

use bfinfo::source::fake::{
    FakeBeam, FakeCoordinate, FakeCoordinates, FakeFile, FakeSap, FakeStokes,
};
use bfinfo::source::{AttrValue, CoordinateKind};
use bfinfo::{DisplayConfig, MetaFormatter, Selector, StokesSelector};

fn formatter(config: DisplayConfig) -> MetaFormatter {
    MetaFormatter::new(config)
}

fn plain(level: u8) -> DisplayConfig {
    DisplayConfig {
        level,
        use_tabs: false,
        ..DisplayConfig::default()
    }
}

/// One SAP with two beams; the first carries Stokes components I and Q plus
/// a time and a spectral coordinate.
fn scenario_file() -> FakeFile {
    let coordinates = FakeCoordinates::new()
        .with_attr("GROUPTYPE", AttrValue::Str("Coordinates".into()))
        .with_attr("NOF_COORDINATES", AttrValue::Int(2))
        .with_coordinate(
            FakeCoordinate::new(CoordinateKind::Time)
                .with_attr("GROUPTYPE", AttrValue::Str("TimeCoord".into()))
                .with_attr("COORDINATE_TYPE", AttrValue::Str("Time".into()))
                .with_attr("REFERENCE_VALUE", AttrValue::Float(0.0))
                .with_attr("INCREMENT", AttrValue::Float(1.3107e-3)),
        )
        .with_coordinate(
            FakeCoordinate::new(CoordinateKind::Spectral)
                .with_attr("GROUPTYPE", AttrValue::Str("SpectralCoord".into()))
                .with_attr("COORDINATE_TYPE", AttrValue::Str("Spectral".into()))
                .with_attr(
                    "AXIS_VALUES_WORLD",
                    AttrValue::FloatList(vec![1.19e8, 1.2e8]),
                ),
        );
    let beam0 = FakeBeam::new(0)
        .with_attr("GROUPTYPE", AttrValue::Str("Beam".into()))
        .with_attr("TRACKING", AttrValue::Str("J2000".into()))
        .with_components(&["I", "Q"])
        .with_stokes(
            FakeStokes::component("I")
                .with_attr("DATATYPE", AttrValue::Str("float".into()))
                .with_attr("NOF_CHANNELS", AttrValue::Int(16)),
        )
        .with_stokes(FakeStokes::component("Q"))
        .with_coordinates(coordinates);
    let beam1 = FakeBeam::new(1)
        .with_attr("GROUPTYPE", AttrValue::Str("Beam".into()))
        .with_components(&["I"])
        .with_stokes(FakeStokes::component("I"))
        .with_coordinates(FakeCoordinates::new());
    FakeFile::new()
        .with_attr("GROUPTYPE", AttrValue::Str("Root".into()))
        .with_attr("TELESCOPE", AttrValue::Str("LOFAR".into()))
        .with_attr("OBSERVATION_START_MJD", AttrValue::Float(56000.5))
        .with_sap(
            FakeSap::new(0)
                .with_attr("GROUPTYPE", AttrValue::Str("SubArrayPointing".into()))
                .with_attr("EXPTIME_START_UTC", AttrValue::Str("2012-07-18T10:00:00Z".into()))
                .with_beam(beam0)
                .with_beam(beam1),
        )
}

#[test]
fn stokes_filter_expands_only_the_requested_component() {
    let file = scenario_file();
    let config = DisplayConfig {
        stokes: StokesSelector::parse("I").unwrap(),
        ..plain(6)
    };
    let output = formatter(config).format(&file);

    // Full file, SAP and beam blocks.
    assert!(output.contains("TELESCOPE"));
    assert!(output.contains("SUB_ARRAY_POINTING_000"));
    assert!(output.contains("BEAM_000"));
    // Exactly one expanded Stokes block in beam 0, plus the skip line for Q.
    assert!(output.contains("STOKES_001 not selected."));
    let component_lines: Vec<&str> = output
        .lines()
        .filter(|l| l.contains("STOKES_COMPONENT "))
        .collect();
    // Beam 0's I and beam 1's I, nothing else.
    assert_eq!(component_lines.len(), 2);
    assert!(component_lines.iter().all(|l| l.ends_with("= I")));
    // The coordinate group is fully expanded, with per-variant tagging.
    assert!(output.contains("COORDINATES"));
    assert!(output.contains("COORDINATE_0"));
    assert!(output.contains("COORDINATE_1"));
    assert!(output.contains("REFERENCE_VALUE"));
    assert!(output.contains("AXIS_VALUES_WORLD"));
}

#[test]
fn mjd_fields_use_the_fixed_point_layout_and_unset_ones_are_skipped() {
    let file = scenario_file();
    let output = formatter(plain(6)).format(&file);
    assert!(output.contains(" 56000.500000000000"));
    // OBSERVATION_END_MJD was never set: no line at all.
    assert!(!output.contains("OBSERVATION_END_MJD"));
}

#[test]
fn every_expanded_schema_field_appears_exactly_once_per_node() {
    let file = scenario_file();
    let output = formatter(plain(6)).format(&file);
    let count = |needle: &str| output.matches(needle).count();
    // File-level fields appear once.
    assert_eq!(count("TELESCOPE"), 1);
    assert_eq!(count("EXPTIME_START_UTC"), 1);
    // TRACKING is a beam field; two expanded beams.
    assert_eq!(count("TRACKING"), 2);
}

#[test]
fn sap_fields_follow_schema_order() {
    let file = scenario_file();
    let output = formatter(plain(6)).format(&file);
    let group = output.find("SUB_ARRAY_POINTING_000").unwrap();
    let start = output[group..].find("EXPTIME_START_UTC").unwrap();
    let beams = output[group..].find("NOF_BEAMS").unwrap();
    assert!(start < beams);
}

#[test]
fn unselected_and_absent_saps_use_distinct_placeholders() {
    let file = scenario_file();
    let config = DisplayConfig {
        sap: Selector::parse("2").unwrap(),
        ..plain(6)
    };
    let output = formatter(config).format(&file);
    assert!(output.contains("SUB_ARRAY_POINTING_000 not selected."));
    assert!(output.contains("SUB_ARRAY_POINTING_002 doesn't exist."));
    // The unselected SAP was never read.
    assert_eq!(file.saps[0].attrs.read_count(), 0);
}

#[test]
fn collapsed_nodes_read_nothing_but_keep_the_skeleton() {
    let file = scenario_file();
    let output = formatter(plain(1)).format(&file);
    assert!(output.contains("SAP_000"));
    assert!(output.contains("BEAM_000"));
    assert!(output.contains("STOKES_000"));
    assert!(output.contains("COORDINATES"));
    assert!(output.contains("COORDINATE_0"));
    assert_eq!(file.saps[0].attrs.read_count(), 0);
    assert_eq!(file.saps[0].beams[0].attrs.read_count(), 0);
    assert_eq!(file.saps[0].beams[0].stokes[0].attrs.read_count(), 0);
    assert_eq!(file.saps[0].beams[0].coordinates.attrs.read_count(), 0);
}

#[test]
fn absent_beam_yields_a_placeholder_and_no_reads() {
    let mut file = scenario_file();
    file.saps[0].beams.push(FakeBeam::absent(2));
    let output = formatter(plain(6)).format(&file);
    assert!(output.contains("BEAM_002 doesn't exist in SUB_ARRAY_POINTING_000"));
    assert_eq!(file.saps[0].beams[2].attrs.read_count(), 0);
}

#[test]
fn absent_stokes_dataset_is_reported_in_place() {
    let file = FakeFile::new().with_sap(
        FakeSap::new(0).with_beam(
            FakeBeam::new(0)
                .with_components(&["I"])
                .with_stokes(FakeStokes::absent())
                .with_coordinates(FakeCoordinates::new()),
        ),
    );
    let output = formatter(plain(6)).format(&file);
    assert!(output.contains("STOKES_000 doesn't exist in BEAM_000"));
}

#[test]
fn beam_without_the_requested_component_prints_a_skip_line() {
    let file = FakeFile::new().with_sap(
        FakeSap::new(0).with_beam(
            FakeBeam::new(0)
                .with_components(&["Q"])
                .with_stokes(FakeStokes::component("Q"))
                .with_coordinates(FakeCoordinates::new()),
        ),
    );
    let config = DisplayConfig {
        stokes: StokesSelector::parse("I").unwrap(),
        ..plain(6)
    };
    let output = formatter(config).format(&file);
    assert!(output.contains("STOKES_COMPONENT_I doesn't exist in BEAM_000"));
    // The tree shape survives: the coordinate group still renders.
    assert!(output.contains("COORDINATES"));
}

#[test]
fn beam_list_selection_expands_in_ascending_index_order() {
    let sap = (0..4).fold(FakeSap::new(0), |sap, nr| {
        sap.with_beam(
            FakeBeam::new(nr)
                .with_components(&["I"])
                .with_coordinates(FakeCoordinates::new()),
        )
    });
    let file = FakeFile::new().with_sap(sap);
    let config = DisplayConfig {
        beam: Selector::parse("[3,1]").unwrap(),
        ..plain(6)
    };
    let output = formatter(config).format(&file);
    assert!(output.contains("BEAM_000 not selected."));
    assert!(output.contains("BEAM_002 not selected."));
    let b1 = output.find("BEAM_001\n").expect("beam 1 expanded");
    let b3 = output.find("BEAM_003\n").expect("beam 3 expanded");
    assert!(b1 < b3);
}

#[test]
fn other_coordinate_variants_get_a_type_tag_line() {
    let file = FakeFile::new().with_sap(
        FakeSap::new(0).with_beam(
            FakeBeam::new(0).with_components(&["I"]).with_coordinates(
                FakeCoordinates::new().with_coordinate(
                    FakeCoordinate::new(CoordinateKind::Other("DirectionCoord".into()))
                        .with_attr("COORDINATE_TYPE", AttrValue::Str("Direction".into()))
                        .with_attr("REFERENCE_VALUE", AttrValue::Float(1.0)),
                ),
            ),
        ),
    );
    let output = formatter(plain(6)).format(&file);
    assert!(output.contains("COORDINATE_0 is of type DirectionCoord"));
    // Variant-specific axis fields only belong to Time and Spectral.
    assert!(!output.contains("REFERENCE_VALUE"));
}

#[test]
fn spectral_frame_block_is_separate_from_the_traversal() {
    let coordinate = FakeCoordinate::new(CoordinateKind::Spectral)
        .with_attr("REFERENCE_FRAME", AttrValue::Str("TOPOCENTRIC".into()))
        .with_attr("REST_FREQUENCY", AttrValue::Float(1.42040575e9))
        .with_attr("REST_FREQUENCY_UNIT", AttrValue::Str("Hz".into()));
    let formatter = formatter(plain(6));
    let block = formatter.format_spectral_frame(&coordinate);
    assert!(block.contains("REFERENCE_FRAME"));
    assert!(block.contains("Hz"));

    let file = FakeFile::new().with_sap(
        FakeSap::new(0).with_beam(
            FakeBeam::new(0)
                .with_components(&["I"])
                .with_coordinates(FakeCoordinates::new().with_coordinate(coordinate)),
        ),
    );
    let output = formatter.format(&file);
    assert!(!output.contains("REFERENCE_FRAME"));
}

#[test]
fn rendering_twice_is_byte_identical() {
    let file = scenario_file();
    let formatter = formatter(plain(6));
    assert_eq!(formatter.format(&file), formatter.format(&file));
}
