use crate::submodules::{
    figures::{Curve, Dash, Extent, FigureSpec, Guide, Ink, LegendPosition, LineStyle},
    input_params::{PhysicalRun, TestCase},
    layout::RunSet,
    observable::Observable,
    sources::{FreeStreamingSource, RunComponent},
    type_lib::NumericData,
};

use super::run_component;

const FINAL_TIME: NumericData = 47.5;

fn run(four_pi_eta_over_s: NumericData, case: TestCase) -> PhysicalRun {
    PhysicalRun::new(four_pi_eta_over_s, case.params().profile).with_final_time(FINAL_TIME)
}

fn curve(
    four_pi_eta_over_s: NumericData,
    case: TestCase,
    observable: Observable,
    component: RunComponent,
    style: LineStyle,
) -> Curve {
    Curve::new(
        run_component(RunSet::SmoothTests, run(four_pi_eta_over_s, case), observable, component),
        style,
    )
}

fn front_guides(spec: FigureSpec, x: NumericData, extent: Extent, gray: NumericData) -> FigureSpec {
    spec.guide(Guide { x, extent, gray, width: 4.0 })
        .guide(Guide { x: -x, extent, gray, width: 4.0 })
}

pub fn smooth_test1() -> FigureSpec {
    let mut spec = FigureSpec::new("smoothtest1", Observable::Ttt)
        .y_range(0.0..0.325)
        .legend(LegendPosition::LowerLeft);
    for (i, &coupling) in [1.0, 3.0, 6.0].iter().enumerate() {
        let width = if i == 0 { 1.2 } else { 1.0 };
        let df_style = LineStyle::new(Ink::Cycle(0), width, Dash::Solid);
        let bdnk_style = LineStyle::new(Ink::Cycle(3), width, Dash::Dashed);
        let mut df = curve(coupling, TestCase::Test1, Observable::Ttt, RunComponent::DensityFrame, df_style);
        let mut bdnk = curve(coupling, TestCase::Test1, Observable::Ttt, RunComponent::Bdnk, bdnk_style);
        if i == 0 {
            df = df.labelled("density frame");
            bdnk = bdnk.labelled("BDNK");
        }
        spec = spec.curve(df).curve(bdnk);
        if i == 0 {
            let ideal_style = LineStyle::new(Ink::Black, 0.5, Dash::Dashed);
            spec = spec.curve(curve(coupling, TestCase::Test1, Observable::Ttt, RunComponent::Ideal, ideal_style).labelled("ideal hydro"));
        }
    }
    spec.annotate("4πη/s = 0, 1, 3, 6", (0.9, 0.25))
}

pub fn smooth_test1b() -> FigureSpec {
    let profile = TestCase::Test1.params().profile;
    // Free-streaming fronts sit at t plus 2.5 widths of the initial Gaussian.
    let front = FINAL_TIME + 2.5 * profile.width.sqrt();
    let spec = FigureSpec::new("smoothtest1b", Observable::Ttt)
        .y_range(0.0..0.325)
        .legend(LegendPosition::UpperLeft);
    let df_style = LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid);
    let bdnk_style = LineStyle::new(Ink::Cycle(3), 1.2, Dash::Dashed);
    let stream_style = LineStyle::new(Ink::Black, 0.5, Dash::Dashed);
    front_guides(spec, front, Extent::Data(0.12 - 0.025, 0.12 + 0.025), 0.8)
        .curve(curve(20.0, TestCase::Test1, Observable::Ttt, RunComponent::DensityFrame, df_style))
        .curve(curve(20.0, TestCase::Test1, Observable::Ttt, RunComponent::Bdnk, bdnk_style))
        .curve(Curve::new(FreeStreamingSource::ttt(profile, FINAL_TIME), stream_style).labelled("free streaming"))
        .annotate("4πη/s = 20", (0.9, 0.25))
}

pub fn smooth_test2() -> FigureSpec {
    let bdnk_style = LineStyle::new(Ink::Cycle(3), 1.0, Dash::Pattern(2.0, 1.0));
    let df_style = LineStyle::new(Ink::Cycle(0), 1.0, Dash::Solid);
    FigureSpec::new("smoothtest2", Observable::Ttt)
        .legend(LegendPosition::UpperCenter)
        .curve(curve(1.0, TestCase::Test2, Observable::Ttt, RunComponent::Bdnk, bdnk_style).labelled("BDNK"))
        .curve(curve(3.0, TestCase::Test2, Observable::Ttt, RunComponent::DensityFrame, df_style))
        .curve(curve(3.0, TestCase::Test2, Observable::Ttt, RunComponent::Bdnk, bdnk_style))
        .curve(curve(6.0, TestCase::Test2, Observable::Ttt, RunComponent::DensityFrame, df_style))
        .curve(curve(6.0, TestCase::Test2, Observable::Ttt, RunComponent::Bdnk, bdnk_style))
        .annotate("4πη/s = 0, 1, 3, 6", (0.9, 0.85))
}

fn test2_at_coupling_10(name: &str, observable: Observable) -> FigureSpec {
    let df_style = LineStyle::new(Ink::Cycle(0), 1.2, Dash::Solid);
    let bdnk_style = LineStyle::new(Ink::Cycle(3), 1.2, Dash::Dashed);
    FigureSpec::new(name, observable)
        .legend(LegendPosition::UpperLeft)
        .curve(curve(10.0, TestCase::Test2, observable, RunComponent::DensityFrame, df_style).labelled("density frame"))
        .curve(curve(10.0, TestCase::Test2, observable, RunComponent::Bdnk, bdnk_style).labelled("BDNK"))
        .annotate("4πη/s = 10", (0.9, 0.85))
}

/// Fluid velocity of test 2.
pub fn smooth_test2b() -> FigureSpec {
    let spec = test2_at_coupling_10("smoothtest2b", Observable::Ux).y_range(-1.4..1.4);
    front_guides(spec, 60.0, Extent::AxisFraction(0.43, 0.57), 0.7)
}

/// Energy flux of test 2.
pub fn smooth_test2c() -> FigureSpec {
    let spec = test2_at_coupling_10("smoothtest2c", Observable::Ttx);
    front_guides(spec, 60.0, Extent::AxisFraction(0.43, 0.57), 0.7)
}

pub fn figures() -> Vec<FigureSpec> {
    vec![smooth_test1(), smooth_test1b(), smooth_test2(), smooth_test2b(), smooth_test2c()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_test1_overlays_three_couplings_and_ideal() {
        let spec = smooth_test1();
        assert_eq!(spec.curves.len(), 7);
        assert_eq!(spec.curves.iter().filter(|c| c.label.is_some()).count(), 3);
    }

    #[test]
    fn fronts_are_symmetric() {
        let spec = smooth_test1b();
        assert_eq!(spec.guides.len(), 2);
        assert_eq!(spec.guides[0].x, 60.0);
        assert_eq!(spec.guides[1].x, -60.0);
    }
}
