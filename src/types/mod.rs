pub mod activity;
pub mod analysis;
pub mod channels;
