pub mod enrichment;
pub mod health;
pub mod operations;
pub mod pronunciation;
