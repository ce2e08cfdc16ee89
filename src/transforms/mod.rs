pub mod direct_dft;
pub mod real_fft;
