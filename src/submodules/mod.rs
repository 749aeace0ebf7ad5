pub mod container;
pub mod dataset_id;
pub mod density_frame;
pub mod errors;
pub mod figures;
pub mod free_streaming;
pub mod func_lib;
pub mod input_params;
pub mod kinetic;
pub mod layout;
pub mod observable;
pub mod reference_solver;
pub mod sources;
pub mod table_io;
pub mod type_lib;
