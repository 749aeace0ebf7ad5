use crate::submodules::{
    figures::{Curve, Dash, FigureSpec, Ink, LegendPosition, LineStyle},
    input_params::{Coupling, PhysicalRun, SpatialGrid, TestCase},
    layout::RunSet,
    observable::Observable,
    sources::{FreeStreamingSource, KineticSource, RunComponent},
    type_lib::NumericData,
};

use super::{eta_label, run_component, Scheme};

const FREE_STREAMING_TIME: NumericData = 47.5;
const INITIAL_TIME: NumericData = 1e-6;

fn scheme_component(scheme: Scheme) -> RunComponent {
    match scheme {
        Scheme::Bdnk => RunComponent::Bdnk,
        _ => RunComponent::DensityFrame,
    }
}

fn hydro(coupling: Coupling, component: RunComponent, style: LineStyle) -> Curve {
    Curve::new(
        run_component(
            RunSet::KineticComparison,
            PhysicalRun::for_case(coupling, TestCase::Test1),
            Observable::Ttt,
            component,
        ),
        style,
    )
}

fn kinetic(coupling: Coupling, style: LineStyle) -> Curve {
    Curve::new(KineticSource::ttt(coupling, TestCase::Test1), style)
}

fn free_streaming() -> Curve {
    Curve::new(
        FreeStreamingSource::ttt(TestCase::Test1.params().profile, FREE_STREAMING_TIME),
        LineStyle::new(Ink::Black, 0.5, Dash::Dashed),
    )
}

/// Initial energy density, on a grid narrowed around the perturbation.
pub fn initial_conditions() -> FigureSpec {
    let profile = TestCase::Test1.params().profile;
    let source = FreeStreamingSource {
        grid: SpatialGrid::new_equally_spaced(-15.1, 15.1, 500),
        ..FreeStreamingSource::ttt(profile, INITIAL_TIME)
    };
    FigureSpec::new("test1_ic", Observable::Ttt)
        .x_range(-15.0..15.0)
        .y_range(-0.1..0.65)
        .curve(Curve::new(source.clone(), LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid)).labelled("density frame"))
        .curve(
            Curve::new(source, LineStyle::new(Ink::Cycle(3), 1.2, Dash::Pattern(3.0, 2.0)))
                .labelled("QCD kinetics"),
        )
        .annotate("initial conditions", (0.85, 0.25))
        .note("A = 0.48 GeV\nδ = 0.12 GeV\nL = 5 GeV⁻¹", (0.7, 0.7))
}

/// One scheme at one coupling with every reference curve.
pub fn stress(scheme: Scheme, coupling: Coupling) -> FigureSpec {
    FigureSpec::new(format!("test1_{}_{}", scheme.tag(), coupling.index()), Observable::Ttt)
        .y_range(0.0..0.5)
        .legend(LegendPosition::Hidden)
        .curve(
            hydro(coupling, scheme_component(scheme), LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid))
                .labelled(scheme.label()),
        )
        .curve(
            kinetic(coupling, LineStyle::new(Ink::Cycle(3), 1.2, Dash::Pattern(3.0, 2.0)))
                .labelled("QCD kinetics"),
        )
        .curve(
            hydro(coupling, RunComponent::Ideal, LineStyle::new(Ink::Black, 0.5, Dash::Dashed))
                .labelled("η/s=0 and ∞"),
        )
        .curve(free_streaming())
        .annotate(eta_label(coupling.four_pi_eta_over_s()), (0.85, 0.25))
}

/// The two stronger couplings overlaid.
pub fn kt_plot1(scheme: Scheme) -> FigureSpec {
    let mut spec = FigureSpec::new(format!("KTPlot1_{}", scheme.tag()), Observable::Ttt)
        .y_range(0.0..0.32)
        .legend(LegendPosition::LowerLeft);
    for (i, coupling) in [Coupling::L20, Coupling::L10].into_iter().enumerate() {
        let mut hydro_curve = hydro(coupling, scheme_component(scheme), LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid));
        let mut kinetic_curve = kinetic(coupling, LineStyle::new(Ink::Cycle(3), 1.2, Dash::Dashed));
        if i == 0 {
            hydro_curve = hydro_curve.labelled(scheme.label());
            kinetic_curve = kinetic_curve.labelled("QCD kinetics");
        }
        spec = spec.curve(hydro_curve).curve(kinetic_curve);
    }
    spec.curve(
        hydro(Coupling::L10, RunComponent::Ideal, LineStyle::new(Ink::Black, 1.0, Dash::Dotted))
            .labelled("ideal hydro"),
    )
    .annotate("4πη/s=0, 2.3, 6.4", (0.85, 0.25))
}

/// The weakest coupling against free streaming.
pub fn kt_plot1b(scheme: Scheme) -> FigureSpec {
    let coupling = Coupling::L5;
    FigureSpec::new(format!("KTPlot1b_{}", scheme.tag()), Observable::Ttt)
        .y_range(0.0..0.32)
        .legend(LegendPosition::LowerLeft)
        .curve(
            hydro(coupling, scheme_component(scheme), LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid))
                .labelled(scheme.label()),
        )
        .curve(kinetic(coupling, LineStyle::new(Ink::Cycle(3), 1.2, Dash::Dashed)).labelled("QCD kinetics"))
        .curve(free_streaming().labelled("free streaming"))
        .annotate(eta_label(coupling.four_pi_eta_over_s()), (0.85, 0.25))
}

pub fn figures() -> Vec<FigureSpec> {
    let mut figures = vec![initial_conditions()];
    for scheme in [Scheme::DensityFrame, Scheme::Bdnk] {
        figures.extend(Coupling::ALL.iter().map(|&coupling| stress(scheme, coupling)));
        figures.push(kt_plot1(scheme));
        figures.push(kt_plot1b(scheme));
    }
    figures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::{layout::DataLayout, sources::LoadContext};

    #[test]
    fn stress_figure_is_named_after_scheme_and_coupling() {
        let spec = stress(Scheme::Bdnk, Coupling::L10);
        assert_eq!(spec.name, "test1_BDNK_10");
        assert_eq!(spec.curves.len(), 4);
        assert_eq!(spec.legend, LegendPosition::Hidden);
    }

    #[test]
    fn initial_conditions_need_no_data() {
        let ctx = LoadContext::new(DataLayout::with_root("/nonexistent"));
        let series = initial_conditions().load(&ctx).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series[0].position.iter().all(|x| x.abs() <= 15.1 + 1e-12));
    }

    #[test]
    fn every_coupling_is_covered() {
        assert_eq!(figures().len(), 1 + 2 * (Coupling::ALL.len() + 2));
    }
}
