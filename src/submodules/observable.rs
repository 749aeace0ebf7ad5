use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{errors::{DataError, DataResult}, type_lib::NumericData};

/// Physical field a curve shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observable {
    Ttt,
    Ttx,
    Eps,
    Ux,
}

impl Observable {
    pub fn to_str(&self) -> &'static str {
        match self {
            Observable::Ttt => "Ttt",
            Observable::Ttx => "Ttx",
            Observable::Eps => "eps",
            Observable::Ux => "ux",
        }
    }

    /// Axis label in the notation of the paper.
    pub fn label(&self) -> &'static str {
        match self {
            Observable::Ttt => "T^tt",
            Observable::Ttx => "T^tx",
            Observable::Eps => "e",
            Observable::Ux => "u^x",
        }
    }

    pub fn kinetic_column(&self) -> DataResult<usize> {
        match self {
            Observable::Ttt => Ok(8),
            Observable::Ttx => Ok(11),
            Observable::Eps | Observable::Ux => Err(self.unsupported("kinetic-theory")),
        }
    }

    pub fn reference_solver_column(&self) -> DataResult<usize> {
        match self {
            Observable::Ttt => Ok(4),
            Observable::Ttx => Ok(5),
            Observable::Eps | Observable::Ux => Err(self.unsupported("reference-solver")),
        }
    }

    pub fn density_frame_column(&self) -> usize {
        match self {
            Observable::Ttt => 0,
            Observable::Ttx => 1,
            Observable::Eps => 2,
            Observable::Ux => 3,
        }
    }

    fn unsupported(&self, source_kind: &'static str) -> DataError {
        DataError::UnsupportedObservable { observable: self.to_str(), source_kind }
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// One spatial profile of an observable at a fixed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservableSeries {
    pub observable: Observable,
    pub position: Array1<NumericData>,
    pub values: Array1<NumericData>,
}

impl ObservableSeries {
    pub fn new(observable: Observable, position: Array1<NumericData>, values: Array1<NumericData>) -> Self {
        ObservableSeries { observable, position, values }
    }

    pub fn len(&self) -> usize {
        self.position.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = (NumericData, NumericData)> + Clone + '_ {
        self.position.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_tables() {
        assert_eq!(Observable::Ttx.kinetic_column().unwrap(), 11);
        assert_eq!(Observable::Ttt.reference_solver_column().unwrap(), 4);
        assert_eq!(Observable::Ux.density_frame_column(), 3);
        assert!(matches!(
            Observable::Eps.kinetic_column(),
            Err(DataError::UnsupportedObservable { observable: "eps", .. })
        ));
    }

    #[test]
    fn points_pair_up_position_and_value() {
        let series = ObservableSeries::new(
            Observable::Ttt,
            Array1::from(vec![-1.0, 0.0, 1.0]),
            Array1::from(vec![0.1, 0.2, 0.3]),
        );
        assert_eq!(series.points().nth(1), Some((0.0, 0.2)));
        assert_eq!(series.len(), 3);
    }
}
