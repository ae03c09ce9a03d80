pub mod categorical;
pub mod gaussian;
