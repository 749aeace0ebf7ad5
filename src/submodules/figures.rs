use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use super::{
    errors::DataResult,
    func_lib::finite_bounds,
    observable::{Observable, ObservableSeries},
    sources::{CurveSource, LoadContext, SeriesSource},
    type_lib::NumericData,
};

/// Stroke colour: an entry of the palette cycle, black, or a grey level
/// (0 black, 1 white).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ink {
    Cycle(usize),
    Black,
    Gray(NumericData),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dash {
    Solid,
    /// Long dashes.
    Dashed,
    /// Dots.
    Dotted,
    /// On/off lengths in units of the line width.
    Pattern(NumericData, NumericData),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub ink: Ink,
    pub width: NumericData,
    pub dash: Dash,
}

impl LineStyle {
    pub fn new(ink: Ink, width: NumericData, dash: Dash) -> Self {
        LineStyle { ink, width, dash }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub source: CurveSource,
    pub style: LineStyle,
    pub label: Option<String>,
}

impl Curve {
    pub fn new(source: impl Into<CurveSource>, style: LineStyle) -> Self {
        Curve { source: source.into(), style, label: None }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Vertical extent of a guide line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    Data(NumericData, NumericData),
    AxisFraction(NumericData, NumericData),
}

/// Thick vertical marker, used to show where the free-streaming fronts sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub x: NumericData,
    pub extent: Extent,
    pub gray: NumericData,
    pub width: NumericData,
}

/// Text placed in figure-fraction coordinates, right-aligned when `align_right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub at: (NumericData, NumericData),
    pub align_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperCenter,
    LowerLeft,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub name: String,
    pub observable: Observable,
    pub x_range: Range<NumericData>,
    /// `None` fits the loaded data.
    pub y_range: Option<Range<NumericData>>,
    pub x_labels: usize,
    pub curves: Vec<Curve>,
    pub guides: Vec<Guide>,
    pub annotations: Vec<Annotation>,
    pub legend: LegendPosition,
}

impl FigureSpec {
    pub fn new(name: impl Into<String>, observable: Observable) -> Self {
        FigureSpec {
            name: name.into(),
            observable,
            x_range: -75.0..75.0,
            y_range: None,
            x_labels: 7,
            curves: Vec::new(),
            guides: Vec::new(),
            annotations: Vec::new(),
            legend: LegendPosition::LowerLeft,
        }
    }

    pub fn x_range(mut self, range: Range<NumericData>) -> Self {
        self.x_range = range;
        self
    }

    pub fn y_range(mut self, range: Range<NumericData>) -> Self {
        self.y_range = Some(range);
        self
    }

    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curves.push(curve);
        self
    }

    pub fn guide(mut self, guide: Guide) -> Self {
        self.guides.push(guide);
        self
    }

    /// Right-aligned note in figure-fraction coordinates.
    pub fn annotate(mut self, text: impl Into<String>, at: (NumericData, NumericData)) -> Self {
        self.annotations.push(Annotation { text: text.into(), at, align_right: true });
        self
    }

    pub fn note(mut self, text: impl Into<String>, at: (NumericData, NumericData)) -> Self {
        self.annotations.push(Annotation { text: text.into(), at, align_right: false });
        self
    }

    /// Loads every curve, stopping at the first failure.
    pub fn load(&self, ctx: &LoadContext) -> DataResult<Vec<ObservableSeries>> {
        self.curves
            .iter()
            .map(|curve| {
                debug!(figure = %self.name, source = %curve.source.describe(), "loading curve");
                curve.source.load(ctx)
            })
            .collect()
    }
}

/// Immutable rendering settings handed to every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub size: (u32, u32),
    pub font_family: String,
    pub font_size: u32,
    pub margin: u32,
    /// Pixels per point of line width.
    pub line_scale: NumericData,
    pub palette: Vec<RGBColor>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: (1050, 788),
            font_family: "sans-serif".to_string(),
            font_size: 28,
            margin: 20,
            line_scale: 2.5,
            palette: vec![
                RGBColor(0x00, 0x85, 0xCA),
                RGBColor(0x00, 0x8F, 0x00),
                RGBColor(0xFF, 0x95, 0x00),
                RGBColor(0xFF, 0x2C, 0x00),
                RGBColor(0x84, 0x5B, 0x97),
                RGBColor(0x47, 0x47, 0x47),
                RGBColor(0x9E, 0x9E, 0x9E),
                RGBColor(0xFA, 0x80, 0x72),
            ],
        }
    }
}

impl RenderConfig {
    pub fn color(&self, ink: Ink) -> RGBColor {
        match ink {
            Ink::Cycle(i) if !self.palette.is_empty() => self.palette[i % self.palette.len()],
            Ink::Cycle(_) | Ink::Black => BLACK,
            Ink::Gray(level) => {
                let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
                RGBColor(v, v, v)
            }
        }
    }

    fn stroke(&self, width: NumericData) -> u32 {
        ((width * self.line_scale).round() as u32).max(1)
    }

    fn dash_lengths(&self, style: &LineStyle) -> Option<(u32, u32)> {
        let (on, off) = match style.dash {
            Dash::Solid => return None,
            Dash::Dashed => (3.7, 1.6),
            Dash::Dotted => (1.0, 1.65),
            Dash::Pattern(on, off) => (on, off),
        };
        let unit = style.width.max(0.5) * self.line_scale;
        Some((((on * unit).round() as u32).max(1), ((off * unit).round() as u32).max(1)))
    }
}

fn data_y_range(series: &[ObservableSeries]) -> Range<NumericData> {
    match finite_bounds(series.iter().flat_map(|s| s.values.iter())) {
        Some((lo, hi)) if hi > lo => {
            let pad = 0.05 * (hi - lo);
            (lo - pad)..(hi + pad)
        }
        Some((lo, _)) => (lo - 1.0)..(lo + 1.0),
        None => 0.0..1.0,
    }
}

/// Loads and draws one figure into `out_dir/{name}.png`.
pub fn render_figure(
    spec: &FigureSpec,
    ctx: &LoadContext,
    config: &RenderConfig,
    out_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let series = spec.load(ctx)?;
    let path = out_dir.join(format!("{}.png", spec.name));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let x_spec = spec.x_range.clone();
    let y_spec = spec.y_range.clone().unwrap_or_else(|| data_y_range(&series));

    let root = BitMapBackend::new(&path, config.size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(config.margin)
        .x_label_area_size(config.font_size * 2)
        .y_label_area_size(config.font_size * 3)
        .build_cartesian_2d(x_spec.clone(), y_spec.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(spec.x_labels)
        .x_desc("x")
        .y_desc(spec.observable.label())
        .label_style((config.font_family.as_str(), config.font_size))
        .draw()?;

    for guide in &spec.guides {
        let (lo, hi) = match guide.extent {
            Extent::Data(lo, hi) => (lo, hi),
            Extent::AxisFraction(lo, hi) => {
                let span = y_spec.end - y_spec.start;
                (y_spec.start + lo * span, y_spec.start + hi * span)
            }
        };
        let style = config.color(Ink::Gray(guide.gray)).stroke_width(config.stroke(guide.width));
        chart.draw_series(std::iter::once(PathElement::new(vec![(guide.x, lo), (guide.x, hi)], style)))?;
    }

    for (curve, data) in spec.curves.iter().zip(series.iter()) {
        let style = config.color(curve.style.ink).stroke_width(config.stroke(curve.style.width));
        let points = data.points().filter(|(x, y)| x.is_finite() && y.is_finite());
        let anno = match config.dash_lengths(&curve.style) {
            None => chart.draw_series(LineSeries::new(points, style))?,
            Some((on, off)) => chart.draw_series(DashedLineSeries::new(points, on, off, style))?,
        };
        if let Some(label) = &curve.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], style));
        }
    }

    let has_labels = spec.curves.iter().any(|curve| curve.label.is_some());
    let legend_position = match spec.legend {
        LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
        LegendPosition::UpperCenter => Some(SeriesLabelPosition::UpperMiddle),
        LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
        LegendPosition::Hidden => None,
    };
    if let (true, Some(position)) = (has_labels, legend_position) {
        chart
            .configure_series_labels()
            .position(position)
            .label_font((config.font_family.as_str(), config.font_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&WHITE)
            .draw()?;
    }

    let (width, height) = config.size;
    for annotation in &spec.annotations {
        let h_pos = if annotation.align_right { HPos::Right } else { HPos::Left };
        let font = TextStyle::from((config.font_family.as_str(), config.font_size).into_font())
            .pos(Pos::new(h_pos, VPos::Center));
        let x = (annotation.at.0 * width as NumericData).round() as i32;
        let y0 = ((1.0 - annotation.at.1) * height as NumericData).round() as i32;
        let line_height = (config.font_size as NumericData * 1.5) as i32;
        for (i, line) in annotation.text.lines().enumerate() {
            root.draw(&Text::new(line.to_string(), (x, y0 + i as i32 * line_height), font.clone()))?;
        }
    }

    root.present()?;
    drop(chart);
    drop(root);
    info!(figure = %spec.name, path = %path.display(), "figure written");
    Ok(path)
}
