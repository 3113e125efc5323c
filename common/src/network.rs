pub mod extract;
pub mod range;
