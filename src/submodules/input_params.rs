use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{errors::{DataError, DataResult}, type_lib::NumericData};

/// Gaussian initial condition `const + amplitude * exp(-x^2 / width)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianProfile {
    #[serde(rename = "const")]
    pub constant: NumericData,
    pub amplitude: NumericData,
    pub width: NumericData,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseParams {
    #[serde(flatten)]
    pub profile: GaussianProfile,
    #[serde(rename = "finaltime")]
    pub final_time: NumericData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestCase {
    Test1,
    Test2,
}

impl TestCase {
    pub const ALL: [TestCase; 2] = [TestCase::Test1, TestCase::Test2];

    pub fn to_str(&self) -> &'static str {
        match self {
            TestCase::Test1 => "test1",
            TestCase::Test2 => "test2",
        }
    }

    pub fn params(&self) -> CaseParams {
        match self {
            TestCase::Test1 => CaseParams {
                profile: GaussianProfile { constant: 0.12, amplitude: 0.48, width: 25.0 },
                final_time: 50.0,
            },
            TestCase::Test2 => CaseParams {
                profile: GaussianProfile { constant: 0.06, amplitude: 9.6, width: 25.0 },
                final_time: 50.0,
            },
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for TestCase {
    type Err = DataError;

    fn from_str(s: &str) -> DataResult<Self> {
        match s {
            "test1" => Ok(TestCase::Test1),
            "test2" => Ok(TestCase::Test2),
            other => Err(DataError::UnknownCase(other.to_string())),
        }
    }
}

/// Looks a test case up by name.
pub fn lookup_case(name: &str) -> DataResult<CaseParams> {
    name.parse::<TestCase>().map(|case| case.params())
}

/// Kinetic-theory coupling index (the `lambda` of the solver output names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coupling {
    L20,
    L10,
    L5,
}

impl Coupling {
    /// Strong to weak coupling, the order the figures iterate in.
    pub const ALL: [Coupling; 3] = [Coupling::L20, Coupling::L10, Coupling::L5];

    pub fn from_index(lambda: u32) -> DataResult<Self> {
        match lambda {
            20 => Ok(Coupling::L20),
            10 => Ok(Coupling::L10),
            5 => Ok(Coupling::L5),
            other => Err(DataError::UnknownCoupling(other)),
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Coupling::L20 => 20,
            Coupling::L10 => 10,
            Coupling::L5 => 5,
        }
    }

    pub fn eta_over_s(&self) -> NumericData {
        match self {
            Coupling::L20 => 0.180,
            Coupling::L10 => 0.513,
            Coupling::L5 => 1.48,
        }
    }

    pub fn four_pi_eta_over_s(&self) -> NumericData {
        4.0 * PI * self.eta_over_s()
    }
}

/// Viscosity ratio for a coupling index.
pub fn lookup_eta_over_s(lambda: u32) -> DataResult<NumericData> {
    Coupling::from_index(lambda).map(|coupling| coupling.eta_over_s())
}

/// One density-frame/BDNK run: a coupling plus the initial condition it evolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalRun {
    pub four_pi_eta_over_s: NumericData,
    pub profile: GaussianProfile,
    pub final_time: Option<NumericData>,
}

impl PhysicalRun {
    pub fn new(four_pi_eta_over_s: NumericData, profile: GaussianProfile) -> Self {
        PhysicalRun { four_pi_eta_over_s, profile, final_time: None }
    }

    pub fn for_case(coupling: Coupling, case: TestCase) -> Self {
        let params = case.params();
        PhysicalRun {
            four_pi_eta_over_s: coupling.four_pi_eta_over_s(),
            profile: params.profile,
            final_time: Some(params.final_time),
        }
    }

    pub fn with_final_time(mut self, final_time: NumericData) -> Self {
        self.final_time = Some(final_time);
        self
    }
}

/// Evenly spaced positions, end points included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialGrid {
    pub x_min: NumericData,
    pub x_max: NumericData,
    pub n_points: usize,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        SpatialGrid { x_min: -75.1, x_max: 75.1, n_points: 500 }
    }
}

impl SpatialGrid {
    pub fn new_equally_spaced(x_min: NumericData, x_max: NumericData, n_points: usize) -> Self {
        SpatialGrid { x_min, x_max, n_points }
    }

    pub fn points(&self) -> Array1<NumericData> {
        match self.n_points {
            0 => Array1::zeros(0),
            1 => Array1::from_elem(1, self.x_min),
            n => {
                let delta = (self.x_max - self.x_min) / (n - 1) as NumericData;
                (0..n).map(|i| self.x_min + i as NumericData * delta).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookups() {
        let test2 = lookup_case("test2").unwrap();
        assert_eq!(test2.profile.amplitude, 9.6);
        assert_eq!(test2.final_time, 50.0);
        assert_eq!(lookup_eta_over_s(10).unwrap(), 0.513);
    }

    #[test]
    fn unknown_entries_are_rejected() {
        assert!(matches!(lookup_case("test3"), Err(DataError::UnknownCase(name)) if name == "test3"));
        assert!(matches!(lookup_eta_over_s(7), Err(DataError::UnknownCoupling(7))));
    }

    #[test]
    fn coupling_round_trips_through_index() {
        for coupling in Coupling::ALL {
            assert_eq!(Coupling::from_index(coupling.index()).unwrap(), coupling);
        }
    }

    #[test]
    fn grid_includes_end_points() {
        let x = SpatialGrid::default().points();
        assert_eq!(x.len(), 500);
        assert_eq!(x[0], -75.1);
        assert!((x[499] - 75.1).abs() < 1e-12);
    }

    #[test]
    fn case_params_deserialize_from_catalog_keys() {
        let params: CaseParams = serde_json::from_str(
            r#"{"const": 0.12, "amplitude": 0.48, "width": 25.0, "finaltime": 50.0}"#,
        )
        .unwrap();
        assert_eq!(params, TestCase::Test1.params());
    }
}
