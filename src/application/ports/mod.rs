pub mod enrichment;
pub mod security;
pub mod time;
