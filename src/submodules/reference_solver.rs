use ndarray::s;

use super::{
    errors::{DataError, DataResult},
    input_params::TestCase,
    layout::{DataLayout, ShearRelaxFactor},
    observable::{Observable, ObservableSeries},
    table_io::read_table,
    type_lib::NumericData,
};

const POSITION_COLUMN: usize = 1;

/// Default output time of the reference runs.
pub const DEFAULT_FINAL_TIME: i64 = 50;

pub fn load_reference_solver(
    layout: &DataLayout,
    eta_over_s: NumericData,
    case: TestCase,
    final_time: i64,
    factor: ShearRelaxFactor,
    observable: Observable,
) -> DataResult<ObservableSeries> {
    let column = observable.reference_solver_column()?;
    let path = layout.reference_path(eta_over_s, case, final_time, factor);
    let table = read_table(&path, 1)?;
    let n_cols = table.ncols();
    if n_cols <= column.max(POSITION_COLUMN) {
        return Err(DataError::malformed(&path, format!("{n_cols} columns, expected column {column}")));
    }
    Ok(ObservableSeries::new(
        observable,
        table.slice(s![.., POSITION_COLUMN]).to_owned(),
        table.slice(s![.., column]).to_owned(),
    ))
}
