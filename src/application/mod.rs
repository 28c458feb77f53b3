// Feature pipeline and regression model
pub mod ml;

// Training and evaluation
pub mod trainer;

// Multi-year depreciation projection
pub mod simulator;

// Per-(brand, model) default input derivation
pub mod defaults;
