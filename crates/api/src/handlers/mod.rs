pub mod downloads;
pub mod versions;
