mod client;
mod discovery;
mod error;
mod portal;
mod scrape;
mod types;

pub use client::{OneClient, OneClientBuilder};
pub use discovery::{DISCOVERY_PORT, discover};
pub use error::{Error, Result};
pub use types::*;
