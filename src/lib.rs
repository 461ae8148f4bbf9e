pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod linear;
pub mod policy;
pub mod resolver;
pub mod ui;

pub use error::{FixVersionError, Result};
pub use resolver::{resolve, Resolver};
