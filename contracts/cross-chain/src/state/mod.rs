pub mod channel;
pub mod config;
pub mod light_client;
pub mod sequence;
