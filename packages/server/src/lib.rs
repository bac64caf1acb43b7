// Company Directory Search - API Core
//
// Serves the company directory over HTTP and resolves free-text queries into
// structured filters. Resolution itself lives in the company-search crate;
// this crate handles configuration, loading the directory and the HTTP surface.

pub mod companies;
pub mod config;
pub mod server;

pub use config::*;
