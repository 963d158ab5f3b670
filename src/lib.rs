pub mod common;
pub mod encryption;
pub mod processing;
pub mod server;
pub mod utils;

pub use processing::{decode, encode, StegoError};
pub use server::ServerCore;
