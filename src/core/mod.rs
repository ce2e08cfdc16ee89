pub mod error;
pub mod fourier;
pub mod matrix_profile;
