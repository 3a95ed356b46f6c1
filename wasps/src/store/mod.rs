pub mod adapters;
pub mod repository;

pub use adapters::{local_store::LocalParameterStore, ssm_store::SsmParameterStore};
pub use repository::{ParameterSink, ParameterSource, StoreError};
