pub mod month;
pub mod pdf;
pub mod recap;
