pub mod delivery;
pub mod scenario;
