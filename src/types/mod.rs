pub mod market;
pub mod overlap_pair;
