use std::path::Path;

use ndarray::Array1;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    container::{final_column, last_time_column, ContainerStore, Lookup},
    dataset_id::DatasetId,
    errors::{DataError, DataResult},
    input_params::{GaussianProfile, PhysicalRun},
    observable::{Observable, ObservableSeries},
    table_io::{read_json, read_last_row, read_vector},
    type_lib::NumericData,
};

pub const FINAL_TABLE: &str = "finaldata";
pub const SOLUTION_TABLE: &str = "solution";

/// Where the ideal-hydro profile of a run was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdealSource {
    /// Last time of the `solution` history in the zero-coupling container.
    Solution(DatasetId),
    /// `finaldata` of a zero-coupling container found on the fallback path.
    FinalData(DatasetId),
}

#[derive(Debug, Clone)]
pub struct DensityFrameRun {
    pub observable: Observable,
    pub position: Array1<NumericData>,
    pub density_frame: Array1<NumericData>,
    pub solver: Array1<NumericData>,
    pub ideal: Array1<NumericData>,
    pub ideal_source: IdealSource,
    pub metadata: Value,
}

impl DensityFrameRun {
    pub fn density_frame_series(&self) -> ObservableSeries {
        ObservableSeries::new(self.observable, self.position.clone(), self.density_frame.clone())
    }

    pub fn solver_series(&self) -> ObservableSeries {
        ObservableSeries::new(self.observable, self.position.clone(), self.solver.clone())
    }

    pub fn ideal_series(&self) -> ObservableSeries {
        ObservableSeries::new(self.observable, self.position.clone(), self.ideal.clone())
    }
}

fn read_required(store: &dyn ContainerStore, path: &Path, table: &str, column: usize) -> DataResult<Array1<NumericData>> {
    let container = store.open(path)?.found().ok_or_else(|| DataError::not_found(path, "file"))?;
    let data = container.read_table(table)?.found().ok_or_else(|| DataError::not_found(path, table))?;
    final_column(data, column, path, table)
}

fn lookup_solution(store: &dyn ContainerStore, id: &DatasetId, column: usize) -> DataResult<Lookup<Array1<NumericData>>> {
    let path = id.container_path();
    let container = match store.open(&path)? {
        Lookup::Found(container) => container,
        Lookup::NotFound => return Ok(Lookup::NotFound),
    };
    match container.read_table(SOLUTION_TABLE)? {
        Lookup::Found(history) => last_time_column(history, column, &path, SOLUTION_TABLE).map(Lookup::Found),
        Lookup::NotFound => Ok(Lookup::NotFound),
    }
}

fn lookup_final(store: &dyn ContainerStore, id: &DatasetId, column: usize) -> DataResult<Lookup<Array1<NumericData>>> {
    let path = id.container_path();
    let container = match store.open(&path)? {
        Lookup::Found(container) => container,
        Lookup::NotFound => return Ok(Lookup::NotFound),
    };
    match container.read_table(FINAL_TABLE)? {
        Lookup::Found(table) => final_column(table, column, &path, FINAL_TABLE).map(Lookup::Found),
        Lookup::NotFound => Ok(Lookup::NotFound),
    }
}

/// Ideal-hydro profile for an initial condition.
///
/// The `solution` history of the zero-coupling run is tried first. Only when
/// it is absent are the zero-coupling identities rebuilt from the initial
/// condition and searched for a `finaldata` table, the integer-named legacy
/// run first.
pub fn load_ideal_reference(
    store: &dyn ContainerStore,
    base_dir: &Path,
    profile: &GaussianProfile,
    observable: Observable,
) -> DataResult<(Array1<NumericData>, IdealSource)> {
    let column = observable.density_frame_column();
    let ideal_id = DatasetId::ideal(base_dir, profile);
    debug!(ideal = %ideal_id, "looking up ideal reference");

    if let Lookup::Found(values) = lookup_solution(store, &ideal_id, column)? {
        return Ok((values, IdealSource::Solution(ideal_id)));
    }

    let candidates = [DatasetId::ideal_legacy(base_dir, profile), ideal_id];
    for candidate in candidates {
        if let Lookup::Found(values) = lookup_final(store, &candidate, column)? {
            warn!(ideal = %candidate, "no `solution` history, using `finaldata`");
            return Ok((values, IdealSource::FinalData(candidate)));
        }
    }
    Err(DataError::not_found(&DatasetId::ideal_legacy(base_dir, profile).container_path(), FINAL_TABLE))
}

/// Loads one density-frame/BDNK run together with its ideal-hydro reference.
pub fn load_density_frame_run(
    base_dir: &Path,
    store: &dyn ContainerStore,
    run: &PhysicalRun,
    observable: Observable,
) -> DataResult<DensityFrameRun> {
    let id = DatasetId::for_run(base_dir, run);
    debug!(run = %id, observable = %observable, "loading density-frame run");

    let metadata: Value = read_json(&id.json_path())?;

    let density_frame = read_required(
        store,
        &id.container_path(),
        FINAL_TABLE,
        observable.density_frame_column(),
    )?;

    let (ideal, ideal_source) = load_ideal_reference(store, base_dir, &run.profile, observable)?;

    let out_dir = id.output_dir();
    let solver = read_last_row(&out_dir.join(format!("{}.txt", observable.to_str())))?;
    let position = read_vector(&out_dir.join("x.txt"))?;

    Ok(DensityFrameRun {
        observable,
        position,
        density_frame,
        solver,
        ideal,
        ideal_source,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::container::{MemoryContainer, MemoryStore};
    use crate::submodules::input_params::TestCase;
    use ndarray::{Array2, Array3};

    fn profile() -> GaussianProfile {
        TestCase::Test2.params().profile
    }

    fn final_table(value: f64) -> ndarray::ArrayD<f64> {
        Array2::from_shape_fn((5, 4), |(_, field)| value + field as f64).into_dyn()
    }

    #[test]
    fn solution_history_is_preferred() {
        let base = Path::new("runs");
        let history = Array3::from_shape_fn((3, 5, 4), |(t, _, f)| (10 * t + f) as f64).into_dyn();
        let mut store = MemoryStore::new();
        store.insert(
            DatasetId::ideal(base, &profile()).container_path(),
            MemoryContainer::new().with_table(SOLUTION_TABLE, history).with_table(FINAL_TABLE, final_table(-1.0)),
        );
        let (values, source) = load_ideal_reference(&store, base, &profile(), Observable::Ttx).unwrap();
        assert_eq!(values.to_vec(), vec![21.0; 5]);
        assert!(matches!(source, IdealSource::Solution(_)));
    }

    #[test]
    fn legacy_final_table_is_the_fallback() {
        let base = Path::new("runs");
        let legacy = DatasetId::ideal_legacy(base, &profile());
        let mut store = MemoryStore::new();
        store.insert(DatasetId::ideal(base, &profile()).container_path(), MemoryContainer::new());
        store.insert(legacy.container_path(), MemoryContainer::new().with_table(FINAL_TABLE, final_table(0.5)));
        let (values, source) = load_ideal_reference(&store, base, &profile(), Observable::Eps).unwrap();
        assert_eq!(values.to_vec(), vec![2.5; 5]);
        assert_eq!(source, IdealSource::FinalData(legacy));
    }

    #[test]
    fn zero_coupling_final_table_closes_the_fallback() {
        let base = Path::new("runs");
        let ideal = DatasetId::ideal(base, &profile());
        let mut store = MemoryStore::new();
        store.insert(ideal.container_path(), MemoryContainer::new().with_table(FINAL_TABLE, final_table(1.0)));
        let (values, source) = load_ideal_reference(&store, base, &profile(), Observable::Ttt).unwrap();
        assert_eq!(values.to_vec(), vec![1.0; 5]);
        assert_eq!(source, IdealSource::FinalData(ideal));
    }

    #[test]
    fn missing_reference_is_reported() {
        let store = MemoryStore::new();
        let err = load_ideal_reference(&store, Path::new("runs"), &profile(), Observable::Ttt).unwrap_err();
        assert!(matches!(err, DataError::DatasetNotFound { ref table, .. } if table == FINAL_TABLE));
    }
}
