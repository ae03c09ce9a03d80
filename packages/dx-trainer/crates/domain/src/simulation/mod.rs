pub mod generator;
pub mod test_runner;
