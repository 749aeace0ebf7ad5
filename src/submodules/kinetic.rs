use std::path::{Path, PathBuf};

use ndarray::{s, Array2, Array3};
use tracing::debug;

use super::{
    errors::{DataError, DataResult},
    input_params::{Coupling, TestCase},
    layout::DataLayout,
    observable::{Observable, ObservableSeries},
    table_io::read_table,
    type_lib::{NumericData, CELLS_PER_STEP, GLUON_DEGENERACY},
};

const POSITION_COLUMN: usize = 18;

/// Which output time to slice out of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStep {
    #[default]
    Last,
    /// Counted back from the end, `FromEnd(1)` being the last step.
    FromEnd(usize),
    Index(usize),
}

impl TimeStep {
    fn resolve(&self, steps: usize) -> Option<usize> {
        match *self {
            TimeStep::Last => steps.checked_sub(1),
            TimeStep::FromEnd(n) if n >= 1 => steps.checked_sub(n),
            TimeStep::FromEnd(_) => None,
            TimeStep::Index(i) => (i < steps).then_some(i),
        }
    }
}

pub struct KineticTheoryDataset {
    pub path: PathBuf,
    pub data: Array3<NumericData>,
}

impl KineticTheoryDataset {
    pub fn read(path: &Path) -> DataResult<Self> {
        KineticTheoryDataset::from_table(path, read_table(path, 0)?)
    }

    pub fn from_table(path: &Path, table: Array2<NumericData>) -> DataResult<Self> {
        let (n_rows, n_cols) = table.dim();
        if n_rows == 0 || n_rows % CELLS_PER_STEP != 0 {
            return Err(DataError::malformed(
                path,
                format!("{n_rows} rows is not a multiple of {CELLS_PER_STEP} cells per step"),
            ));
        }
        if n_cols <= POSITION_COLUMN {
            return Err(DataError::malformed(
                path,
                format!("{n_cols} columns, position column {POSITION_COLUMN} missing"),
            ));
        }
        let steps = n_rows / CELLS_PER_STEP;
        let data = table
            .into_shape_with_order((steps, CELLS_PER_STEP, n_cols))
            .map_err(|err| DataError::malformed(path, err.to_string()))?;
        debug!(path = %path.display(), steps, columns = n_cols, "kinetic-theory dataset");
        Ok(KineticTheoryDataset { path: path.to_path_buf(), data })
    }

    pub fn step_count(&self) -> usize {
        self.data.dim().0
    }

    pub fn series(&self, observable: Observable, step: TimeStep) -> DataResult<ObservableSeries> {
        let column = observable.kinetic_column()?;
        if column >= self.data.dim().2 {
            return Err(DataError::malformed(&self.path, format!("column {column} missing")));
        }
        let index = step.resolve(self.step_count()).ok_or_else(|| {
            DataError::malformed(
                &self.path,
                format!("time step {step:?} outside {} stored steps", self.step_count()),
            )
        })?;
        let position = self.data.slice(s![0, .., POSITION_COLUMN]).to_owned();
        let values = self.data.slice(s![index, .., column]).mapv(|v| v * GLUON_DEGENERACY);
        Ok(ObservableSeries::new(observable, position, values))
    }
}

/// Reads the kinetic-theory output of one coupling and slices one time step.
/// The file is re-read on every call.
pub fn load_kinetic_theory(
    layout: &DataLayout,
    coupling: Coupling,
    case: TestCase,
    observable: Observable,
    step: TimeStep,
) -> DataResult<ObservableSeries> {
    let path = layout.kinetic_path(case, coupling);
    KineticTheoryDataset::read(&path)?.series(observable, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_table(steps: usize, extra_rows: usize) -> Array2<NumericData> {
        let rows = steps * CELLS_PER_STEP + extra_rows;
        Array2::from_shape_fn((rows, 20), |(row, col)| {
            let step = (row / CELLS_PER_STEP) as NumericData;
            let cell = (row % CELLS_PER_STEP) as NumericData;
            match col {
                POSITION_COLUMN => cell - 75.0,
                8 => 0.01 * (step + 1.0),
                11 => -0.001 * cell,
                _ => 0.0,
            }
        })
    }

    #[test]
    fn last_step_yields_one_full_profile() {
        let dataset = KineticTheoryDataset::from_table(Path::new("ekt"), synthetic_table(3, 0)).unwrap();
        let series = dataset.series(Observable::Ttt, TimeStep::Last).unwrap();
        assert_eq!(series.len(), CELLS_PER_STEP);
        assert_eq!(series.position[0], -75.0);
        assert!((series.values[10] - 16.0 * 0.03).abs() < 1e-12);
    }

    #[test]
    fn earlier_steps_are_selectable() {
        let dataset = KineticTheoryDataset::from_table(Path::new("ekt"), synthetic_table(6, 0)).unwrap();
        let first = dataset.series(Observable::Ttt, TimeStep::Index(0)).unwrap();
        let sixth_from_end = dataset.series(Observable::Ttt, TimeStep::FromEnd(6)).unwrap();
        assert_eq!(first, sixth_from_end);
        assert!(dataset.series(Observable::Ttt, TimeStep::Index(6)).is_err());
        assert!(dataset.series(Observable::Ttt, TimeStep::FromEnd(0)).is_err());
    }

    #[test]
    fn flux_column_is_scaled() {
        let dataset = KineticTheoryDataset::from_table(Path::new("ekt"), synthetic_table(1, 0)).unwrap();
        let series = dataset.series(Observable::Ttx, TimeStep::Last).unwrap();
        assert!((series.values[2] + 16.0 * 0.002).abs() < 1e-12);
    }

    #[test]
    fn partial_step_is_malformed() {
        let result = KineticTheoryDataset::from_table(Path::new("ekt"), synthetic_table(2, 1));
        assert!(matches!(result, Err(DataError::MalformedDataset { .. })));
    }

    #[test]
    fn velocity_is_not_stored() {
        let dataset = KineticTheoryDataset::from_table(Path::new("ekt"), synthetic_table(1, 0)).unwrap();
        assert!(matches!(
            dataset.series(Observable::Ux, TimeStep::Last),
            Err(DataError::UnsupportedObservable { .. })
        ));
    }
}
