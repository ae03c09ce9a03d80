//! Diagnostic-reasoning trainer: simulated patients drawn from disease
//! templates, Bayesian updating as tests come back.

pub use application;
pub use domain;
pub use dx_template as template;
pub use infrastructure;
