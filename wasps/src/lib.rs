pub mod app;
pub mod cli;
pub mod configs;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod merge;
pub mod render;
pub mod seed;
pub mod store;

pub use domain::{KeyPolicy, ParameterMap, ParameterPath};
pub use error::WaspsError;
pub use merge::merge_parameters;
