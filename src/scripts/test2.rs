use crate::submodules::{
    figures::{Curve, Dash, FigureSpec, Ink, LegendPosition, LineStyle},
    input_params::{Coupling, PhysicalRun, TestCase},
    layout::RunSet,
    observable::Observable,
    sources::{FreeStreamingSource, KineticSource, ReferenceSource, RunComponent},
};

use super::{eta_label, run_component, Scheme};

fn density_frame(coupling: Coupling, case: TestCase, component: RunComponent, style: LineStyle) -> Curve {
    Curve::new(
        run_component(
            RunSet::KineticComparison,
            PhysicalRun::for_case(coupling, case),
            Observable::Ttt,
            component,
        ),
        style,
    )
}

/// Hydro curve of `scheme`, MUSIC drawn in its own colour.
fn hydro(scheme: Scheme, coupling: Coupling, case: TestCase, width: f64) -> Curve {
    match scheme {
        Scheme::Music => Curve::new(ReferenceSource::ttt(coupling, case), LineStyle::new(Ink::Cycle(6), width, Dash::Solid)),
        Scheme::Bdnk => density_frame(coupling, case, RunComponent::Bdnk, LineStyle::new(Ink::Cycle(0), width, Dash::Solid)),
        Scheme::DensityFrame => density_frame(coupling, case, RunComponent::DensityFrame, LineStyle::new(Ink::Cycle(0), width, Dash::Solid)),
    }
}

fn kinetic(coupling: Coupling, case: TestCase, ink: Ink, width: f64) -> Curve {
    Curve::new(KineticSource::ttt(coupling, case), LineStyle::new(ink, width, Dash::Dashed))
}

fn ideal(coupling: Coupling, case: TestCase, dash: Dash) -> Curve {
    density_frame(coupling, case, RunComponent::Ideal, LineStyle::new(Ink::Black, 0.5, dash))
}

fn free_streaming(case: TestCase, width: f64, dash: Dash) -> Curve {
    Curve::new(FreeStreamingSource::for_case(case), LineStyle::new(Ink::Black, width, dash))
}

fn case_number(case: TestCase) -> u32 {
    match case {
        TestCase::Test1 => 1,
        TestCase::Test2 => 2,
    }
}

/// Comparison panel y-limits, legend corner and annotation height per case.
fn panel(case: TestCase) -> (std::ops::Range<f64>, LegendPosition, f64) {
    match case {
        TestCase::Test1 => (0.0..0.32, LegendPosition::LowerLeft, 0.25),
        TestCase::Test2 => (0.0..3.7, LegendPosition::UpperLeft, 0.80),
    }
}

fn scheme_suffix(scheme: Scheme) -> &'static str {
    match scheme {
        Scheme::Music => "_MUSIC",
        _ => "",
    }
}

/// One scheme at one coupling for test 1.
pub fn stress(scheme: Scheme, coupling: Coupling) -> FigureSpec {
    let case = TestCase::Test1;
    FigureSpec::new(format!("test1_{}_{}", scheme.tag(), coupling.index()), Observable::Ttt)
        .y_range(0.0..0.5)
        .legend(LegendPosition::Hidden)
        .curve(hydro(scheme, coupling, case, 1.2).labelled(scheme.label()))
        .curve(kinetic(coupling, case, Ink::Cycle(3), 1.2).labelled("QCD kinetics"))
        .curve(ideal(coupling, case, Dash::Dashed).labelled("η/s=0 and ∞"))
        .curve(free_streaming(case, 0.5, Dash::Dashed))
        .annotate(eta_label(coupling.four_pi_eta_over_s()), (0.85, 0.25))
}

/// The two stronger couplings overlaid.
pub fn kt_plot(case: TestCase, scheme: Scheme) -> FigureSpec {
    let (y_range, legend, note_height) = panel(case);
    let mut spec = FigureSpec::new(
        format!("KTPlot{}{}", case_number(case), scheme_suffix(scheme)),
        Observable::Ttt,
    )
    .y_range(y_range)
    .legend(legend);
    let pairs = [(Coupling::L20, Ink::Cycle(3)), (Coupling::L10, Ink::Cycle(2))];
    for (i, (coupling, kinetic_ink)) in pairs.into_iter().enumerate() {
        let mut hydro_curve = hydro(scheme, coupling, case, 1.0);
        let mut kinetic_curve = kinetic(coupling, case, kinetic_ink, 1.0);
        if i == 0 {
            hydro_curve = hydro_curve.labelled(scheme.label());
            kinetic_curve = kinetic_curve.labelled("QCD kinetics");
        }
        spec = spec.curve(hydro_curve).curve(kinetic_curve);
    }
    spec.curve(ideal(Coupling::L10, case, Dash::Dashed).labelled("ideal hydro"))
        .annotate(
            format!(
                "4πη/s={:.1} and {:.1}",
                Coupling::L20.four_pi_eta_over_s(),
                Coupling::L10.four_pi_eta_over_s()
            ),
            (0.85, note_height),
        )
}

/// The weakest coupling against free streaming.
pub fn kt_plot_b(case: TestCase, scheme: Scheme) -> FigureSpec {
    let (y_range, legend, note_height) = panel(case);
    let coupling = Coupling::L5;
    FigureSpec::new(
        format!("KTPlot{}b{}", case_number(case), scheme_suffix(scheme)),
        Observable::Ttt,
    )
    .y_range(y_range)
    .legend(legend)
    .curve(hydro(scheme, coupling, case, 1.2).labelled(scheme.label()))
    .curve(kinetic(coupling, case, Ink::Cycle(7), 1.2).labelled("QCD kinetics"))
    .curve(free_streaming(case, 0.5, Dash::Dashed).labelled("free streaming"))
    .annotate(eta_label(coupling.four_pi_eta_over_s()), (0.85, note_height))
}

/// Kinetic theory alone at every coupling, bracketed by the two limits.
pub fn kinetic_only(case: TestCase) -> FigureSpec {
    let (y_range, stream_width) = match case {
        TestCase::Test1 => (0.0..0.35, 0.8),
        TestCase::Test2 => (0.0..4.0, 0.7),
    };
    let inks = [Ink::Cycle(3), Ink::Cycle(2), Ink::Cycle(7)];
    let mut spec = FigureSpec::new(format!("KineticOnlyT{}", case_number(case)), Observable::Ttt)
        .y_range(y_range)
        .legend(LegendPosition::UpperCenter);
    for (coupling, ink) in Coupling::ALL.into_iter().zip(inks) {
        spec = spec.curve(
            kinetic(coupling, case, ink, 1.0).labelled(eta_label(coupling.four_pi_eta_over_s())),
        );
    }
    spec.curve(ideal(Coupling::L20, case, Dash::Dashed).labelled("ideal hydro"))
        .curve(free_streaming(case, stream_width, Dash::Dotted).labelled("free stream"))
}

pub fn figures() -> Vec<FigureSpec> {
    let mut figures = Vec::new();
    for scheme in [Scheme::DensityFrame, Scheme::Bdnk, Scheme::Music] {
        figures.extend(Coupling::ALL.iter().map(|&coupling| stress(scheme, coupling)));
    }
    for case in TestCase::ALL {
        for scheme in [Scheme::DensityFrame, Scheme::Music] {
            figures.push(kt_plot(case, scheme));
            figures.push(kt_plot_b(case, scheme));
        }
        figures.push(kinetic_only(case));
    }
    figures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::sources::CurveSource;

    #[test]
    fn music_variant_reads_the_reference_solver() {
        let spec = kt_plot(TestCase::Test2, Scheme::Music);
        assert_eq!(spec.name, "KTPlot2_MUSIC");
        assert!(matches!(spec.curves[0].source, CurveSource::ReferenceSource(_)));
        assert_eq!(spec.legend, LegendPosition::UpperLeft);
        assert_eq!(spec.annotations[0].text, "4πη/s=2.3 and 6.4");
    }

    #[test]
    fn free_streaming_uses_catalog_final_time() {
        let spec = kt_plot_b(TestCase::Test1, Scheme::DensityFrame);
        let CurveSource::FreeStreamingSource(source) = &spec.curves[2].source else {
            panic!("expected free streaming as third curve");
        };
        assert_eq!(source.final_time, 50.0);
    }

    #[test]
    fn kinetic_only_labels_each_coupling() {
        let spec = kinetic_only(TestCase::Test1);
        let labels: Vec<_> = spec.curves.iter().filter_map(|c| c.label.clone()).collect();
        assert_eq!(labels[..3], ["4πη/s=2.3", "4πη/s=6.4", "4πη/s=18.6"]);
    }
}
