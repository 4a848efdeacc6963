pub mod recording;
pub mod server;
