pub mod operations;
pub mod record;

pub use operations::NucleotideCounts;
pub use record::*;
