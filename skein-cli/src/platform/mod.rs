//! 平台相关的输出

pub mod cli;

pub use cli::{print_build_error, source_context};
