use enum_dispatch::enum_dispatch;
use tracing::debug;

use super::{
    container::{default_store, ContainerStore},
    density_frame::load_density_frame_run,
    errors::{DataError, DataResult},
    free_streaming::free_streaming_profile_on,
    input_params::{Coupling, GaussianProfile, PhysicalRun, SpatialGrid, TestCase},
    kinetic::{load_kinetic_theory, TimeStep},
    layout::{DataLayout, RunSet, ShearRelaxFactor},
    observable::{Observable, ObservableSeries},
    reference_solver::{load_reference_solver, DEFAULT_FINAL_TIME},
    type_lib::NumericData,
};

/// Everything a curve needs to find its data.
pub struct LoadContext {
    pub layout: DataLayout,
    pub store: Box<dyn ContainerStore>,
}

impl LoadContext {
    pub fn new(layout: DataLayout) -> Self {
        LoadContext { layout, store: default_store() }
    }

    pub fn with_store(layout: DataLayout, store: Box<dyn ContainerStore>) -> Self {
        LoadContext { layout, store }
    }
}

#[enum_dispatch]
pub trait SeriesSource {
    fn load(&self, ctx: &LoadContext) -> DataResult<ObservableSeries>;
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct KineticSource {
    pub coupling: Coupling,
    pub case: TestCase,
    pub observable: Observable,
    pub step: TimeStep,
}

impl KineticSource {
    pub fn ttt(coupling: Coupling, case: TestCase) -> Self {
        KineticSource { coupling, case, observable: Observable::Ttt, step: TimeStep::Last }
    }
}

impl SeriesSource for KineticSource {
    fn load(&self, ctx: &LoadContext) -> DataResult<ObservableSeries> {
        load_kinetic_theory(&ctx.layout, self.coupling, self.case, self.observable, self.step)
    }

    fn describe(&self) -> String {
        format!("kinetic theory {} L{} {}", self.case, self.coupling.index(), self.observable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSource {
    pub eta_over_s: NumericData,
    pub case: TestCase,
    pub final_time: i64,
    pub factor: ShearRelaxFactor,
    pub observable: Observable,
}

impl ReferenceSource {
    pub fn ttt(coupling: Coupling, case: TestCase) -> Self {
        ReferenceSource {
            eta_over_s: coupling.eta_over_s(),
            case,
            final_time: DEFAULT_FINAL_TIME,
            factor: ShearRelaxFactor::default(),
            observable: Observable::Ttt,
        }
    }
}

impl SeriesSource for ReferenceSource {
    fn load(&self, ctx: &LoadContext) -> DataResult<ObservableSeries> {
        load_reference_solver(
            &ctx.layout,
            self.eta_over_s,
            self.case,
            self.final_time,
            self.factor,
            self.observable,
        )
    }

    fn describe(&self) -> String {
        format!("reference solver {} eta/s={} {}", self.case, self.eta_over_s, self.observable)
    }
}

/// Which of the arrays stored with a density-frame run to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunComponent {
    DensityFrame,
    Bdnk,
    Ideal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityFrameSource {
    pub run_set: RunSet,
    pub run: PhysicalRun,
    pub observable: Observable,
    pub component: RunComponent,
}

impl SeriesSource for DensityFrameSource {
    fn load(&self, ctx: &LoadContext) -> DataResult<ObservableSeries> {
        let base_dir = ctx.layout.run_base(self.run_set);
        let run = load_density_frame_run(&base_dir, ctx.store.as_ref(), &self.run, self.observable)?;
        debug!(metadata = %run.metadata, "density-frame run metadata");
        Ok(match self.component {
            RunComponent::DensityFrame => run.density_frame_series(),
            RunComponent::Bdnk => run.solver_series(),
            RunComponent::Ideal => run.ideal_series(),
        })
    }

    fn describe(&self) -> String {
        format!(
            "{:?} 4pi eta/s={} {}",
            self.component, self.run.four_pi_eta_over_s, self.observable
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeStreamingSource {
    pub profile: GaussianProfile,
    pub final_time: NumericData,
    pub grid: SpatialGrid,
    pub observable: Observable,
}

impl FreeStreamingSource {
    pub fn ttt(profile: GaussianProfile, final_time: NumericData) -> Self {
        FreeStreamingSource { profile, final_time, grid: SpatialGrid::default(), observable: Observable::Ttt }
    }

    /// Ttt of a catalogued test case at its catalogued final time.
    pub fn for_case(case: TestCase) -> Self {
        let params = case.params();
        FreeStreamingSource::ttt(params.profile, params.final_time)
    }
}

impl SeriesSource for FreeStreamingSource {
    fn load(&self, _ctx: &LoadContext) -> DataResult<ObservableSeries> {
        free_streaming_profile_on(&self.grid, self.final_time, &self.profile)
            .series(self.observable)
            .ok_or(DataError::UnsupportedObservable {
                observable: self.observable.to_str(),
                source_kind: "free-streaming",
            })
    }

    fn describe(&self) -> String {
        format!("free streaming t={} {}", self.final_time, self.observable)
    }
}

#[enum_dispatch(SeriesSource)]
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSource {
    KineticSource,
    ReferenceSource,
    DensityFrameSource,
    FreeStreamingSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_streaming_needs_no_files() {
        let ctx = LoadContext::new(DataLayout::with_root("/nonexistent"));
        let source: CurveSource = FreeStreamingSource::ttt(TestCase::Test1.params().profile, 47.5).into();
        let series = source.load(&ctx).unwrap();
        assert_eq!(series.len(), 500);
        assert!(source.describe().contains("47.5"));
    }

    #[test]
    fn catalogued_free_streaming_matches_closed_form() {
        let ctx = LoadContext::new(DataLayout::with_root("/nonexistent"));
        let source = FreeStreamingSource::for_case(TestCase::Test2);
        assert_eq!(source.final_time, 50.0);
        let series = source.load(&ctx).unwrap();
        let profile = TestCase::Test2.params().profile;
        let centre = series.len() / 2;
        let x = series.position[centre];
        let expected = crate::submodules::free_streaming::free_streaming_ttt(x, 50.0, &profile);
        assert!((series.values[centre] - expected).abs() < 1e-12);
    }

    #[test]
    fn missing_kinetic_file_is_not_found() {
        let ctx = LoadContext::new(DataLayout::with_root("/nonexistent"));
        let source: CurveSource = KineticSource::ttt(Coupling::L5, TestCase::Test2).into();
        assert!(matches!(source.load(&ctx), Err(DataError::DatasetNotFound { .. })));
    }
}
