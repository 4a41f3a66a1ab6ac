//! Ready-made game setups.

pub mod classic;
