pub mod chat;
pub mod http;
pub mod resources;
pub mod storage;
