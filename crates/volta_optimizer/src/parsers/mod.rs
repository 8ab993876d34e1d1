pub mod parser;
pub mod schneider;
