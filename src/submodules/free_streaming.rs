//! Closed-form free-streaming evolution of the Gaussian initial condition.
//!
//! With `w = sqrt(width)` and final time `t`:
//!
//! ```text
//! Ttt(x) = c + sqrt(pi)/2 * A w / (2 t) * [erf((x+t)/w) - erf((x-t)/w)]
//! Ttx(x) = A w / (4 t^2) * { w [e^{-(t+x)^2/w^2} - e^{-(t-x)^2/w^2}]
//!                            + sqrt(pi) x [erf((x+t)/w) - erf((x-t)/w)] }
//! ```
//!
//! `t` must be positive; zero is not guarded.

use std::f64::consts::PI;

use ndarray::Array1;

use super::{
    func_lib::{erf_window, gaussian_difference},
    input_params::{GaussianProfile, SpatialGrid},
    observable::{Observable, ObservableSeries},
    type_lib::NumericData,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FreeStreamingProfile {
    pub position: Array1<NumericData>,
    pub ttt: Array1<NumericData>,
    pub ttx: Array1<NumericData>,
}

impl FreeStreamingProfile {
    pub fn series(&self, observable: Observable) -> Option<ObservableSeries> {
        let values = match observable {
            Observable::Ttt => self.ttt.clone(),
            Observable::Ttx => self.ttx.clone(),
            Observable::Eps | Observable::Ux => return None,
        };
        Some(ObservableSeries::new(observable, self.position.clone(), values))
    }
}

pub fn free_streaming_ttt(x: NumericData, final_time: NumericData, profile: &GaussianProfile) -> NumericData {
    let w = profile.width.sqrt();
    let tc = final_time;
    profile.constant + PI.sqrt() / 2.0 * profile.amplitude * w / (2.0 * tc) * erf_window(x, tc, w)
}

pub fn free_streaming_ttx(x: NumericData, final_time: NumericData, profile: &GaussianProfile) -> NumericData {
    let w = profile.width.sqrt();
    let tc = final_time;
    profile.amplitude * w / (4.0 * tc * tc)
        * (w * gaussian_difference(x, tc, w) + PI.sqrt() * x * erf_window(x, tc, w))
}

pub fn free_streaming_profile_on(grid: &SpatialGrid, final_time: NumericData, profile: &GaussianProfile) -> FreeStreamingProfile {
    let position = grid.points();
    let ttt = position.mapv(|x| free_streaming_ttt(x, final_time, profile));
    let ttx = position.mapv(|x| free_streaming_ttx(x, final_time, profile));
    FreeStreamingProfile { position, ttt, ttx }
}

/// Profile on the default 500-point grid over [-75.1, 75.1].
pub fn free_streaming_profile(
    final_time: NumericData,
    constant: NumericData,
    amplitude: NumericData,
    width: NumericData,
) -> FreeStreamingProfile {
    let profile = GaussianProfile { constant, amplitude, width };
    free_streaming_profile_on(&SpatialGrid::default(), final_time, &profile)
}
