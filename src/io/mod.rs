pub mod board;
pub mod reporting;
