pub mod case_store;
