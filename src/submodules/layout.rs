use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    dataset_id::NumberRepr,
    errors::{DataError, DataResult},
    input_params::{Coupling, TestCase},
    type_lib::NumericData,
};

/// Shear relaxation time multiplier of the reference-solver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShearRelaxFactor {
    #[default]
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "0p5")]
    PointFive,
}

impl ShearRelaxFactor {
    pub fn to_str(&self) -> &'static str {
        match self {
            ShearRelaxFactor::Five => "5",
            ShearRelaxFactor::PointFive => "0p5",
        }
    }
}

/// Directory a density-frame/BDNK run lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunSet {
    /// Runs matched to the kinetic-theory couplings.
    KineticComparison,
    /// Smooth-profile runs of the first paper figures.
    SmoothTests,
}

/// Where the upstream solvers left their output, and where figures go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLayout {
    pub data_root: PathBuf,
    pub kinetic_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub density_frame_dir: PathBuf,
    pub smooth_tests_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        DataLayout {
            data_root: PathBuf::from("."),
            kinetic_dir: PathBuf::from("new_EKT"),
            reference_dir: PathBuf::from("music_data"),
            density_frame_dir: PathBuf::from("DFAndBDNK"),
            smooth_tests_dir: PathBuf::from("figure12_data"),
            out_dir: PathBuf::from("figures"),
        }
    }
}

impl DataLayout {
    pub fn with_root(data_root: impl Into<PathBuf>) -> Self {
        DataLayout { data_root: data_root.into(), ..DataLayout::default() }
    }

    pub fn from_toml_file(path: &Path) -> DataResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|err| DataError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn kinetic_path(&self, case: TestCase, coupling: Coupling) -> PathBuf {
        self.data_root
            .join(&self.kinetic_dir)
            .join(format!("{}_L{}_gluon_Tmunu_vs_time.out", case, coupling.index()))
    }

    pub fn reference_path(
        &self,
        eta_over_s: NumericData,
        case: TestCase,
        final_time: i64,
        factor: ShearRelaxFactor,
    ) -> PathBuf {
        self.data_root
            .join(&self.reference_dir)
            .join(format!("shear_relax_{}", factor.to_str()))
            .join(case.to_str())
            .join(format!("{}_tfinal_{}.dat", NumberRepr::Float(eta_over_s), final_time))
    }

    pub fn run_base(&self, run_set: RunSet) -> PathBuf {
        match run_set {
            RunSet::KineticComparison => self.data_root.join(&self.density_frame_dir),
            RunSet::SmoothTests => self.data_root.join(&self.smooth_tests_dir),
        }
    }
}
