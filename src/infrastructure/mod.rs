pub mod dataset;
pub mod model_store;

pub use dataset::Dataset;
