//! Fixed attribute schema of a beamformed file.
//!
//! Each node kind carries an ordered table of the attributes to print for
//! it. Unit-bearing quantities name their companion unit attribute here
//! (some share one, e.g. the three `OBSERVATION_FREQUENCY_*` attributes all
//! use `OBSERVATION_FREQUENCY_UNIT`).

use crate::source::AttrValue;

/// How a value is rendered on its `NAME = value unit` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Default rendering of the underlying value.
    Plain,
    /// Modified Julian Date, fixed-point with 12 decimals.
    Mjd,
    /// Durations and bandwidths, two decimals.
    Fixed2,
    /// Pointing angles, ten decimals.
    Angle,
}

impl ValueFormat {
    pub fn apply(self, value: &AttrValue) -> String {
        match (self, value) {
            (ValueFormat::Mjd, AttrValue::Float(v)) => format!("{v:19.12}"),
            (ValueFormat::Mjd, AttrValue::Int(v)) => format!("{:19.12}", *v as f64),
            (ValueFormat::Fixed2, AttrValue::Float(v)) => format!("{v:.2}"),
            (ValueFormat::Fixed2, AttrValue::Int(v)) => format!("{:.2}", *v as f64),
            (ValueFormat::Angle, AttrValue::Float(v)) => format!("{v:.10}"),
            _ => value.to_string(),
        }
    }
}

/// What to do when an attribute has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsetPolicy {
    /// Omit the line entirely.
    Skip,
    /// Print the line with `-` in place of the value.
    Dash,
}

/// One printable attribute of a node kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Attribute name, also used as the line label.
    pub attr: &'static str,
    /// Companion attribute holding the unit string, if any.
    pub unit: Option<&'static str>,
    pub format: ValueFormat,
    pub unset: UnsetPolicy,
}

const fn plain(attr: &'static str) -> FieldSpec {
    FieldSpec {
        attr,
        unit: None,
        format: ValueFormat::Plain,
        unset: UnsetPolicy::Dash,
    }
}

const fn with_unit(attr: &'static str, unit: &'static str) -> FieldSpec {
    FieldSpec {
        attr,
        unit: Some(unit),
        format: ValueFormat::Plain,
        unset: UnsetPolicy::Dash,
    }
}

const fn mjd(attr: &'static str) -> FieldSpec {
    FieldSpec {
        attr,
        unit: None,
        format: ValueFormat::Mjd,
        unset: UnsetPolicy::Skip,
    }
}

const fn duration(attr: &'static str, unit: &'static str) -> FieldSpec {
    FieldSpec {
        attr,
        unit: Some(unit),
        format: ValueFormat::Fixed2,
        unset: UnsetPolicy::Skip,
    }
}

const fn angle(attr: &'static str, unit: &'static str) -> FieldSpec {
    FieldSpec {
        attr,
        unit: Some(unit),
        format: ValueFormat::Angle,
        unset: UnsetPolicy::Skip,
    }
}

/// Root group attributes, in display order.
pub const FILE_FIELDS: &[FieldSpec] = &[
    plain("GROUPTYPE"),
    plain("FILENAME"),
    plain("FILEDATE"),
    plain("FILETYPE"),
    plain("TELESCOPE"),
    plain("PROJECT_ID"),
    plain("PROJECT_TITLE"),
    plain("PROJECT_PI"),
    plain("PROJECT_CO_I"),
    plain("PROJECT_CONTACT"),
    plain("OBSERVATION_ID"),
    plain("OBSERVATION_START_UTC"),
    plain("OBSERVATION_END_UTC"),
    mjd("OBSERVATION_START_MJD"),
    mjd("OBSERVATION_END_MJD"),
    plain("OBSERVATION_NOF_STATIONS"),
    plain("OBSERVATION_STATIONS_LIST"),
    with_unit("OBSERVATION_FREQUENCY_MIN", "OBSERVATION_FREQUENCY_UNIT"),
    with_unit("OBSERVATION_FREQUENCY_CENTER", "OBSERVATION_FREQUENCY_UNIT"),
    with_unit("OBSERVATION_FREQUENCY_MAX", "OBSERVATION_FREQUENCY_UNIT"),
    plain("OBSERVATION_NOF_BITS_PER_SAMPLE"),
    with_unit("CLOCK_FREQUENCY", "CLOCK_FREQUENCY_UNIT"),
    plain("ANTENNA_SET"),
    plain("FILTER_SELECTION"),
    plain("TARGETS"),
    plain("SYSTEM_VERSION"),
    plain("PIPELINE_NAME"),
    plain("PIPELINE_VERSION"),
    plain("DOC_NAME"),
    plain("DOC_VERSION"),
    plain("CREATE_OFFLINE_ONLINE"),
    plain("BF_FORMAT"),
    plain("BF_VERSION"),
    duration("TOTAL_INTEGRATION_TIME", "TOTAL_INTEGRATION_TIME_UNIT"),
    plain("OBSERVATION_DATATYPE"),
    with_unit("SUB_ARRAY_POINTING_DIAMETER", "SUB_ARRAY_POINTING_DIAMETER_UNIT"),
    duration("BANDWIDTH", "BANDWIDTH_UNIT"),
    plain("OBSERVATION_NOF_SUB_ARRAY_POINTINGS"),
    plain("NOF_SUB_ARRAY_POINTINGS"),
];

/// Sub-array pointing group attributes.
pub const SAP_FIELDS: &[FieldSpec] = &[
    plain("GROUPTYPE"),
    plain("EXPTIME_START_UTC"),
    plain("EXPTIME_END_UTC"),
    mjd("EXPTIME_START_MJD"),
    mjd("EXPTIME_END_MJD"),
    duration("TOTAL_INTEGRATION_TIME", "TOTAL_INTEGRATION_TIME_UNIT"),
    angle("POINT_RA", "POINT_RA_UNIT"),
    angle("POINT_DEC", "POINT_DEC_UNIT"),
    with_unit("POINT_ALTITUDE", "POINT_ALTITUDE_UNIT"),
    with_unit("POINT_AZIMUTH", "POINT_AZIMUTH_UNIT"),
    plain("OBSERVATION_NOF_BEAMS"),
    plain("NOF_BEAMS"),
];

/// Beam group attributes.
pub const BEAM_FIELDS: &[FieldSpec] = &[
    plain("GROUPTYPE"),
    plain("TARGETS"),
    plain("NOF_STATIONS"),
    plain("STATIONS_LIST"),
    plain("NOF_SAMPLES"),
    with_unit("SAMPLING_RATE", "SAMPLING_RATE_UNIT"),
    with_unit("SAMPLING_TIME", "SAMPLING_TIME_UNIT"),
    plain("CHANNELS_PER_SUBBAND"),
    with_unit("SUBBAND_WIDTH", "SUBBAND_WIDTH_UNIT"),
    with_unit("CHANNEL_WIDTH", "CHANNEL_WIDTH_UNIT"),
    plain("TRACKING"),
    with_unit("POINT_RA", "POINT_RA_UNIT"),
    with_unit("POINT_DEC", "POINT_DEC_UNIT"),
    with_unit("POINT_OFFSET_RA", "POINT_OFFSET_RA_UNIT"),
    with_unit("POINT_OFFSET_DEC", "POINT_OFFSET_DEC_UNIT"),
    with_unit("BEAM_DIAMETER_RA", "BEAM_DIAMETER_RA_UNIT"),
    with_unit("BEAM_DIAMETER_DEC", "BEAM_DIAMETER_DEC_UNIT"),
    with_unit("BEAM_FREQUENCY_CENTER", "BEAM_FREQUENCY_CENTER_UNIT"),
    plain("FOLDED_DATA"),
    with_unit("FOLD_PERIOD", "FOLD_PERIOD_UNIT"),
    plain("DEDISPERSION"),
    with_unit("DISPERSION_MEASURE", "DISPERSION_MEASURE_UNIT"),
    plain("BARYCENTERED"),
    plain("OBSERVATION_NOF_STOKES"),
    plain("NOF_STOKES"),
    plain("STOKES_COMPONENTS"),
    plain("COMPLEX_VOLTAGE"),
    plain("SIGNAL_SUM"),
];

/// Stokes dataset attributes.
pub const STOKES_FIELDS: &[FieldSpec] = &[
    plain("STOKES_COMPONENT"),
    plain("DATATYPE"),
    plain("NOF_SAMPLES"),
    plain("NOF_SUBBANDS"),
    plain("NOF_CHANNELS"),
];

/// Coordinate group attributes.
pub const COORDINATES_FIELDS: &[FieldSpec] = &[
    plain("GROUPTYPE"),
    with_unit("REF_LOCATION_VALUE", "REF_LOCATION_UNIT"),
    plain("REF_LOCATION_FRAME"),
    with_unit("REF_TIME_VALUE", "REF_TIME_UNIT"),
    plain("REF_TIME_FRAME"),
    plain("NOF_COORDINATES"),
    plain("NOF_AXES"),
    plain("COORDINATE_TYPES"),
];

/// Attributes common to every coordinate variant.
pub const COORDINATE_COMMON_FIELDS: &[FieldSpec] = &[
    plain("GROUPTYPE"),
    plain("COORDINATE_TYPE"),
    plain("STORAGE_TYPE"),
    plain("NOF_AXES"),
    plain("AXIS_NAMES"),
    plain("AXIS_UNITS"),
];

/// Extra attributes of the Time and Spectral coordinate variants.
pub const COORDINATE_AXIS_FIELDS: &[FieldSpec] = &[
    plain("REFERENCE_VALUE"),
    plain("REFERENCE_PIXEL"),
    plain("INCREMENT"),
    plain("PC"),
    plain("AXIS_VALUES_PIXEL"),
    plain("AXIS_VALUES_WORLD"),
];

/// Reference-frame block of a spectral coordinate. Not part of the main
/// traversal; see [`crate::output::MetaFormatter::format_spectral_frame`].
pub const SPECTRAL_FRAME_FIELDS: &[FieldSpec] = &[
    plain("REFERENCE_FRAME"),
    with_unit("REST_FREQUENCY", "REST_FREQUENCY_UNIT"),
    with_unit("REST_WAVELENGTH", "REST_WAVELENGTH_UNIT"),
];

/// Width of the label column on attribute lines. Fits the longest attribute
/// name (`OBSERVATION_NOF_SUB_ARRAY_POINTINGS`).
pub const LABEL_WIDTH: usize = 36;
