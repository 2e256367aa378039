pub mod file;
pub mod market;
