pub mod enrich;
pub mod export;
pub mod matcher;
pub mod metric;
pub mod net;
pub mod persist;
pub mod rank;
pub mod score;
pub mod scouting_fetch;
pub mod sources;
pub mod state;
pub mod stratify;
pub mod valuation_fetch;
