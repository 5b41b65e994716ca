pub mod audit;
pub mod enrichment;
pub mod pronunciation;
