//! Canonical dataset identities for density-frame/BDNK runs.
//!
//! Stored datasets are named after the run parameters printed with the
//! shortest round-trip decimal form (`25.0`, `0.12`, `2.261946710584651`,
//! `1e-05`), with every `.` then replaced by `d`. The identifiers have to
//! match the files on disk byte for byte, so the formatting lives here and
//! nowhere else.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{input_params::{GaussianProfile, PhysicalRun}, type_lib::NumericData};

/// A parameter as it appears inside a file name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberRepr {
    Float(NumericData),
    Int(i64),
}

impl fmt::Display for NumberRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NumberRepr::Int(value) => write!(f, "{value}"),
            NumberRepr::Float(value) => f.write_str(&float_repr(value)),
        }
    }
}

impl From<NumericData> for NumberRepr {
    fn from(value: NumericData) -> Self {
        NumberRepr::Float(value)
    }
}

impl From<i64> for NumberRepr {
    fn from(value: i64) -> Self {
        NumberRepr::Int(value)
    }
}

/// Shortest round-trip representation with an explicit `.0` on integral
/// values and exponent notation below `1e-4` and from `1e16` upwards.
pub fn float_repr(value: NumericData) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` already yields the shortest digits that round-trip.
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (lead, tail) = digits.split_at(1);
        let mut out = format!("{sign}{lead}");
        if !tail.is_empty() {
            out.push('.');
            out.push_str(tail);
        }
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{exp_sign}{:02}", exponent.abs()));
        return out;
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{sign}{digits}{zeros}.0")
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// File-system safe stem identifying one run, relative to its base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetId {
    stem: PathBuf,
}

impl DatasetId {
    pub fn new(
        base_dir: &Path,
        four_pi_eta_over_s: impl Into<NumberRepr>,
        profile: &GaussianProfile,
    ) -> Self {
        let name = format!(
            "nbys_{}_d_{}_A_{}_w_{}",
            four_pi_eta_over_s.into(),
            NumberRepr::Float(profile.constant),
            NumberRepr::Float(profile.amplitude),
            NumberRepr::Float(profile.width),
        )
        .replace('.', "d");
        DatasetId { stem: base_dir.join(name) }
    }

    pub fn for_run(base_dir: &Path, run: &PhysicalRun) -> Self {
        DatasetId::new(base_dir, run.four_pi_eta_over_s, &run.profile)
    }

    /// Zero-coupling reference shared by all runs with this initial condition.
    pub fn ideal(base_dir: &Path, profile: &GaussianProfile) -> Self {
        DatasetId::new(base_dir, 0.0, profile)
    }

    /// Zero-coupling reference as written by the older runs, with the
    /// coupling stored as the integer `0`.
    pub fn ideal_legacy(base_dir: &Path, profile: &GaussianProfile) -> Self {
        DatasetId::new(base_dir, 0_i64, profile)
    }

    pub fn stem(&self) -> &Path {
        &self.stem
    }

    pub fn name(&self) -> String {
        self.stem
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut path = self.stem.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    pub fn json_path(&self) -> PathBuf {
        self.with_suffix(".json")
    }

    pub fn container_path(&self) -> PathBuf {
        self.with_suffix(".h5")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.with_suffix("_out")
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submodules::input_params::{Coupling, TestCase};
    use proptest::prelude::*;

    fn test1() -> GaussianProfile {
        TestCase::Test1.params().profile
    }

    #[test]
    fn float_repr_matches_stored_names() {
        assert_eq!(float_repr(25.0), "25.0");
        assert_eq!(float_repr(0.12), "0.12");
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(-0.0), "-0.0");
        assert_eq!(float_repr(9.6), "9.6");
        assert_eq!(float_repr(0.180), "0.18");
        assert_eq!(float_repr(1e-5), "1e-05");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1234567890123456.0), "1234567890123456.0");
        assert_eq!(float_repr(-47.5), "-47.5");
    }

    #[test]
    fn identifier_template() {
        let id = DatasetId::new(Path::new("DFAndBDNK"), 1.0, &test1());
        assert_eq!(id.name(), "nbys_1d0_d_0d12_A_0d48_w_25d0");
        assert_eq!(id.json_path(), Path::new("DFAndBDNK/nbys_1d0_d_0d12_A_0d48_w_25d0.json"));
        assert_eq!(id.output_dir(), Path::new("DFAndBDNK/nbys_1d0_d_0d12_A_0d48_w_25d0_out"));
    }

    #[test]
    fn coupling_identifiers_use_full_precision() {
        let id = DatasetId::new(Path::new(""), Coupling::L20.four_pi_eta_over_s(), &test1());
        assert_eq!(id.name(), "nbys_2d261946710584651_d_0d12_A_0d48_w_25d0");
    }

    #[test]
    fn ideal_and_legacy_ideal_differ() {
        let base = Path::new("runs");
        assert_eq!(DatasetId::ideal(base, &test1()).name(), "nbys_0d0_d_0d12_A_0d48_w_25d0");
        assert_eq!(DatasetId::ideal_legacy(base, &test1()).name(), "nbys_0_d_0d12_A_0d48_w_25d0");
    }

    proptest! {
        #[test]
        fn float_repr_round_trips(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let text = float_repr(value);
            prop_assert_eq!(text.parse::<f64>().unwrap(), value);
            prop_assert!(text.contains('.') || text.contains('e'));
        }

        #[test]
        fn identifiers_are_deterministic_and_injective(a in 0.0f64..100.0, b in 0.0f64..100.0) {
            let profile = test1();
            let base = Path::new("runs");
            prop_assert_eq!(DatasetId::new(base, a, &profile), DatasetId::new(base, a, &profile));
            if a != b {
                prop_assert_ne!(DatasetId::new(base, a, &profile), DatasetId::new(base, b, &profile));
            }
        }
    }
}
