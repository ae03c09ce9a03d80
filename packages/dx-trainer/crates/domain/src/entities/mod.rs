pub mod case;
pub mod catalog;
