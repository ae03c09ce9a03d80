pub mod catalog;
pub mod diagnose;
pub mod new;
pub mod order;
pub mod posterior;
pub mod reset;
pub mod schema;
pub mod show;
pub mod tests;
