use std::error::Error;
use std::path::PathBuf;

use tracing::error;

use crate::submodules::{
    figures::{render_figure, FigureSpec, RenderConfig},
    input_params::PhysicalRun,
    layout::RunSet,
    observable::Observable,
    sources::{DensityFrameSource, LoadContext, RunComponent},
    type_lib::NumericData,
};

pub mod fig1;
pub mod test2;
pub mod tests12;

/// A figure script: a fixed list of figures written to `out_dir/{name}/`.
pub struct Script {
    pub name: &'static str,
    pub figures: fn() -> Vec<FigureSpec>,
}

pub const SCRIPTS: [Script; 3] = [
    Script { name: "fig1", figures: fig1::figures },
    Script { name: "tests12", figures: tests12::figures },
    Script { name: "test2", figures: test2::figures },
];

/// Hydrodynamic scheme shown against kinetic theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    DensityFrame,
    Bdnk,
    Music,
}

impl Scheme {
    pub fn tag(&self) -> &'static str {
        match self {
            Scheme::DensityFrame => "DF",
            Scheme::Bdnk => "BDNK",
            Scheme::Music => "MUSIC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scheme::DensityFrame => "density frame",
            Scheme::Bdnk => "BDNK",
            Scheme::Music => "MUSIC",
        }
    }
}

pub(crate) fn run_component(
    run_set: RunSet,
    run: PhysicalRun,
    observable: Observable,
    component: RunComponent,
) -> DensityFrameSource {
    DensityFrameSource { run_set, run, observable, component }
}

pub(crate) fn eta_label(four_pi_eta_over_s: NumericData) -> String {
    format!("4πη/s={:.1}", four_pi_eta_over_s)
}

/// Figures selected by name, grouped by script.
///
/// A request matches a whole script (`fig1`), a qualified figure
/// (`test2/KTPlot2`) or a bare figure name in any script (`KTPlot2`). No
/// requests selects everything.
pub fn select(requests: &[String]) -> Result<Vec<(&'static str, Vec<FigureSpec>)>, Box<dyn Error>> {
    let mut matched = vec![false; requests.len()];
    let mut selection = Vec::new();
    for script in &SCRIPTS {
        let chosen: Vec<FigureSpec> = (script.figures)()
            .into_iter()
            .filter(|figure| {
                let qualified = format!("{}/{}", script.name, figure.name);
                let mut hit = requests.is_empty();
                for (request, seen) in requests.iter().zip(matched.iter_mut()) {
                    if request == script.name || *request == qualified || *request == figure.name {
                        *seen = true;
                        hit = true;
                    }
                }
                hit
            })
            .collect();
        if !chosen.is_empty() {
            selection.push((script.name, chosen));
        }
    }
    if let Some(unknown) = requests.iter().zip(&matched).find(|(_, seen)| !**seen) {
        return Err(format!("no figure or script named `{}`", unknown.0).into());
    }
    Ok(selection)
}

/// Outcome of one script: written files and the figures that could not be drawn.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Renders every figure into `out_dir/{script}/`. A figure that fails is
/// logged and skipped; the rest are still drawn.
pub fn render_all(script: &str, figures: &[FigureSpec], ctx: &LoadContext, config: &RenderConfig) -> RenderSummary {
    let out_dir = ctx.layout.out_dir.join(script);
    let mut summary = RenderSummary::default();
    for spec in figures {
        match render_figure(spec, ctx, config, &out_dir) {
            Ok(path) => summary.written.push(path),
            Err(err) => {
                error!(script, figure = %spec.name, %err, "figure skipped");
                summary.failed.push(format!("{}/{}", script, spec.name));
            }
        }
    }
    summary
}
