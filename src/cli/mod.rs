//! Command line workflow, independent of argument parsing

pub mod orchestration;
