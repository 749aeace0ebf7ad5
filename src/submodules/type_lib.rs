pub type NumericData = f64;

/// Number of spatial cells written per time-step by the kinetic-theory solver.
pub const CELLS_PER_STEP: usize = 150;

/// Gluon degeneracy factor applied to kinetic-theory stress components.
pub const GLUON_DEGENERACY: NumericData = 16.0;
