pub mod alert_key;
pub mod alert_pass;
pub mod alert_state;
pub mod messages;
pub mod state_store;
