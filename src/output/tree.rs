//! Level-gated renderer for the metadata tree.
//!
//! `MetaFormatter` walks the six schema levels of a beamformed file. At each
//! node it either prints a two-line placeholder (node absent, not selected,
//! or deeper than the verbosity level) or the node's full attribute block,
//! then recurses. Collapsed nodes still recurse so the tree skeleton stays
//! visible; absent and unselected nodes do not.

use std::io::{self, Write};

use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

use crate::schema::{self, FieldSpec, UnsetPolicy, LABEL_WIDTH};
use crate::selector::{StokesSelector, Visit};
use crate::source::{
    AttrValue, BeamMeta, CoordinateKind, CoordinateMeta, CoordinatesMeta, FileMeta, MetaNode,
    SapMeta, StokesMeta,
};
use crate::style::Style;

use super::config::DisplayConfig;

const SEPARATOR: &str = "------------------------------------";

/// Indentation depth and active style of the block being rendered.
///
/// Passed by value down the recursion; a child derives its own context and
/// the caller's stays untouched, so siblings never inherit a stale prefix or
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub indent: usize,
    pub style: Style,
}

impl RenderContext {
    pub fn root() -> Self {
        RenderContext {
            indent: 0,
            style: Style::Plain,
        }
    }

    pub fn level(indent: usize, style: Style) -> Self {
        RenderContext { indent, style }
    }

    pub fn with_style(self, style: Style) -> Self {
        RenderContext { style, ..self }
    }
}

/// Formatter for the metadata tree of one beamformed file.
pub struct MetaFormatter {
    config: DisplayConfig,
}

impl MetaFormatter {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Print the tree to stdout, colorized per the configuration.
    pub fn print<F: FileMeta>(&self, file: &F) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_tree(file, &mut stdout)?;
        stdout.reset()
    }

    /// Render the tree to a plain string. Identical inputs produce
    /// byte-identical output.
    pub fn format<F: FileMeta>(&self, file: &F) -> String {
        let mut buf = NoColor::new(Vec::new());
        self.write_tree(file, &mut buf)
            .expect("writing to an in-memory buffer cannot fail");
        String::from_utf8(buf.into_inner()).expect("rendered output is UTF-8")
    }

    /// Render the tree into any color-capable writer.
    pub fn write_tree<F: FileMeta, W: WriteColor>(&self, file: &F, out: &mut W) -> io::Result<()> {
        let ctx = RenderContext::root();
        if self.config.level < 1 {
            self.line(out, ctx, "ROOT")?;
        } else {
            for field in schema::FILE_FIELDS {
                self.field(out, ctx, file, field)?;
            }
            self.line(out, ctx, SEPARATOR)?;
        }
        for visit in self.config.sap.visits(file.nof_sub_array_pointings()) {
            self.write_sap(out, &file.sub_array_pointing(visit.nr), visit)?;
        }
        Ok(())
    }

    fn write_sap<S: SapMeta, W: WriteColor>(
        &self,
        out: &mut W,
        sap: &S,
        visit: Visit,
    ) -> io::Result<()> {
        let ctx = RenderContext::level(0, Style::Sap);
        if !sap.exists() {
            return self.absent(out, ctx, &format!("{} doesn't exist.", sap.name()));
        }
        if !visit.selected {
            return self.placeholder(out, ctx, &format!("{} not selected.", sap.name()));
        }
        if self.config.level < 2 {
            self.placeholder(out, ctx, &format!("SAP_{:03}", visit.nr))?;
        } else {
            self.line(out, ctx, SEPARATOR)?;
            self.line(out, ctx, &sap.name())?;
            for field in schema::SAP_FIELDS {
                self.field(out, ctx, sap, field)?;
            }
            self.line(out, ctx, SEPARATOR)?;
        }
        let sap_name = sap.name();
        for visit in self.config.beam.visits(sap.nof_beams()) {
            self.write_beam(out, &sap_name, &sap.beam(visit.nr), visit)?;
        }
        if self.config.level >= 2 {
            self.blank(out)?;
        }
        Ok(())
    }

    fn write_beam<B: BeamMeta, W: WriteColor>(
        &self,
        out: &mut W,
        sap_name: &str,
        beam: &B,
        visit: Visit,
    ) -> io::Result<()> {
        let ctx = RenderContext::level(1, Style::Beam);
        if !beam.exists() {
            return self.absent(
                out,
                ctx,
                &format!("{} doesn't exist in {}", beam.name(), sap_name),
            );
        }
        if !visit.selected {
            return self.placeholder(out, ctx, &format!("{} not selected.", beam.name()));
        }
        if self.config.level < 3 {
            self.placeholder(out, ctx, &beam.name())?;
            for nr in 0..beam.nof_stokes() {
                self.write_stokes(out, beam, nr)?;
            }
            self.write_coordinates(out, &beam.coordinates())?;
            return Ok(());
        }
        self.line(out, ctx, SEPARATOR)?;
        self.line(out, ctx, &beam.name())?;
        for field in schema::BEAM_FIELDS {
            self.field(out, ctx, beam, field)?;
        }
        self.line(out, ctx, SEPARATOR)?;

        // A beam whose component set has no overlap with the requested
        // components gets one skip line in place of its datasets; the
        // coordinate group still prints so the tree shape survives.
        let components = beam.stokes_components();
        if !self.config.stokes.any_present(&components) {
            let ctx = RenderContext::level(2, Style::Dataset);
            self.absent(
                out,
                ctx,
                &format!(
                    "STOKES_COMPONENT_{} doesn't exist in {}",
                    self.config.stokes.requested(),
                    beam.name()
                ),
            )?;
        } else {
            for nr in 0..beam.nof_stokes() {
                self.write_stokes(out, beam, nr)?;
            }
        }
        self.write_coordinates(out, &beam.coordinates())?;
        self.blank(out)
    }

    fn write_stokes<B: BeamMeta, W: WriteColor>(
        &self,
        out: &mut W,
        beam: &B,
        nr: usize,
    ) -> io::Result<()> {
        let ctx = RenderContext::level(2, Style::Dataset);
        let stokes = beam.stokes(nr);
        if !stokes.exists() {
            return self.absent(
                out,
                ctx,
                &format!("STOKES_{nr:03} doesn't exist in {}", beam.name()),
            );
        }
        if self.config.level < 4 {
            return self.placeholder(out, ctx, &format!("STOKES_{nr:03}"));
        }
        let selected = match stokes.component() {
            Some(component) => self.config.stokes.selects(&component),
            None => matches!(self.config.stokes, StokesSelector::All),
        };
        if !selected {
            return self.placeholder(out, ctx, &format!("STOKES_{nr:03} not selected."));
        }
        self.line(out, ctx, SEPARATOR)?;
        for field in schema::STOKES_FIELDS {
            self.field(out, ctx, &stokes, field)?;
        }
        self.blank(out)
    }

    fn write_coordinates<C: CoordinatesMeta, W: WriteColor>(
        &self,
        out: &mut W,
        coords: &C,
    ) -> io::Result<()> {
        let ctx = RenderContext::level(3, Style::Coord);
        if !coords.exists() {
            return self.absent(out, ctx, "COORDINATES doesn't exist.");
        }
        if self.config.level < 5 {
            self.placeholder(out, ctx, "COORDINATES")?;
            for nr in 0..coords.nof_coordinates() {
                self.write_coordinate(out, coords, nr)?;
            }
            return Ok(());
        }
        self.line(out, ctx, SEPARATOR)?;
        self.line(out, ctx, "COORDINATES")?;
        for field in schema::COORDINATES_FIELDS {
            self.field(out, ctx, coords, field)?;
        }
        self.line(out, ctx, SEPARATOR)?;
        for nr in 0..coords.nof_coordinates() {
            self.write_coordinate(out, coords, nr)?;
        }
        self.blank(out)
    }

    fn write_coordinate<C: CoordinatesMeta, W: WriteColor>(
        &self,
        out: &mut W,
        coords: &C,
        nr: usize,
    ) -> io::Result<()> {
        let ctx = RenderContext::level(3, Style::Coord);
        if self.config.level < 6 {
            return self.placeholder(out, ctx, &format!("COORDINATE_{nr}"));
        }
        self.line(out, ctx, SEPARATOR)?;
        self.line(out, ctx, &format!("COORDINATE_{nr}"))?;
        let coordinate = coords.coordinate(nr);
        if !coordinate.exists() {
            return self.line(
                out,
                ctx.with_style(Style::Fail),
                &format!("COORDINATE_{nr} doesn't exist."),
            );
        }
        for field in schema::COORDINATE_COMMON_FIELDS {
            self.field(out, ctx, &coordinate, field)?;
        }
        match coordinate.kind() {
            CoordinateKind::Time | CoordinateKind::Spectral => {
                for field in schema::COORDINATE_AXIS_FIELDS {
                    self.field(out, ctx, &coordinate, field)?;
                }
            }
            CoordinateKind::Other(tag) => {
                self.line(out, ctx, &format!("COORDINATE_{nr} is of type {tag}"))?;
            }
        }
        Ok(())
    }

    /// Reference-frame block of a spectral coordinate. Not part of the main
    /// traversal; callers that want the frame details render it separately.
    pub fn format_spectral_frame<C: CoordinateMeta>(&self, coordinate: &C) -> String {
        let mut buf = NoColor::new(Vec::new());
        let ctx = RenderContext::level(3, Style::Coord);
        for field in schema::SPECTRAL_FRAME_FIELDS {
            self.field(&mut buf, ctx, coordinate, field)
                .expect("writing to an in-memory buffer cannot fail");
        }
        String::from_utf8(buf.into_inner()).expect("rendered output is UTF-8")
    }

    /// One `NAME = value unit` line, honoring the field's format and unset
    /// policy.
    fn field<N: MetaNode, W: WriteColor>(
        &self,
        out: &mut W,
        ctx: RenderContext,
        node: &N,
        field: &FieldSpec,
    ) -> io::Result<()> {
        let value = node.attr(field.attr);
        if value.is_none() && field.unset == UnsetPolicy::Skip {
            return Ok(());
        }
        let rendered = match &value {
            Some(value) => field.format.apply(value),
            None => "-".to_string(),
        };
        let mut text = format!("{:<width$} = {rendered}", field.attr, width = LABEL_WIDTH);
        if let Some(unit_attr) = field.unit {
            if let Some(AttrValue::Str(unit)) = node.attr(unit_attr) {
                text.push(' ');
                text.push_str(&unit);
            }
        }
        self.line(out, ctx, &text)
    }

    /// The two-line placeholder: connector plus label.
    fn placeholder<W: WriteColor>(
        &self,
        out: &mut W,
        ctx: RenderContext,
        label: &str,
    ) -> io::Result<()> {
        self.line(out, ctx, "   |")?;
        self.line(out, ctx, &format!("   {label}"))
    }

    /// Placeholder for a node that is not in the file, in the failure style,
    /// closed with a blank line.
    fn absent<W: WriteColor>(
        &self,
        out: &mut W,
        ctx: RenderContext,
        message: &str,
    ) -> io::Result<()> {
        self.placeholder(out, ctx.with_style(Style::Fail), message)?;
        self.blank(out)
    }

    fn line<W: WriteColor>(&self, out: &mut W, ctx: RenderContext, text: &str) -> io::Result<()> {
        let colored = self.config.use_color && ctx.style != Style::Plain;
        if colored {
            out.set_color(&self.config.theme.spec(ctx.style))?;
        }
        write!(out, "{}{}", self.indent(ctx.indent), text)?;
        if colored {
            out.reset()?;
        }
        writeln!(out)
    }

    fn indent(&self, units: usize) -> String {
        let unit = if self.config.use_tabs { "\t" } else { "    " };
        unit.repeat(units)
    }

    fn blank<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::{FakeBeam, FakeFile, FakeSap};

    fn formatter(level: u8) -> MetaFormatter {
        MetaFormatter::new(DisplayConfig {
            level,
            use_tabs: false,
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn level_zero_prints_root_only_for_the_file() {
        let file = FakeFile::new().with_attr("TELESCOPE", AttrValue::Str("LOFAR".into()));
        let output = formatter(0).format(&file);
        assert!(output.starts_with("ROOT\n"));
        assert!(!output.contains("TELESCOPE"));
    }

    #[test]
    fn collapsed_saps_still_show_the_skeleton() {
        let file = FakeFile::new().with_sap(FakeSap::new(0).with_beam(FakeBeam::new(0)));
        let output = formatter(0).format(&file);
        assert!(output.contains("SAP_000"));
        assert!(output.contains("BEAM_000"));
    }

    #[test]
    fn file_fields_print_in_schema_order() {
        let file = FakeFile::new()
            .with_attr("TELESCOPE", AttrValue::Str("LOFAR".into()))
            .with_attr("FILETYPE", AttrValue::Str("bf".into()));
        let output = formatter(6).format(&file);
        let filetype = output.find("FILETYPE").expect("FILETYPE line");
        let telescope = output.find("TELESCOPE").expect("TELESCOPE line");
        assert!(filetype < telescope);
    }

    #[test]
    fn unset_always_printed_fields_render_a_dash() {
        let file = FakeFile::new();
        let output = formatter(6).format(&file);
        let expected = format!("{:<width$} = -", "GROUPTYPE", width = LABEL_WIDTH);
        assert!(output.contains(&expected));
    }

    #[test]
    fn rendering_is_deterministic() {
        let file = FakeFile::new()
            .with_attr("TELESCOPE", AttrValue::Str("LOFAR".into()))
            .with_sap(FakeSap::new(0).with_beam(FakeBeam::new(0).with_components(&["I"])));
        let formatter = formatter(6);
        assert_eq!(formatter.format(&file), formatter.format(&file));
    }

    #[test]
    fn tabs_and_spaces_indent_the_same_depth() {
        let file = FakeFile::new().with_sap(FakeSap::new(0).with_beam(FakeBeam::new(0)));
        let tabs = MetaFormatter::new(DisplayConfig {
            level: 3,
            ..DisplayConfig::default()
        })
        .format(&file);
        assert!(tabs.contains("\tBEAM_000"));
        let spaces = formatter(3).format(&file);
        assert!(spaces.contains("    BEAM_000"));
    }
}
