pub mod cache;
pub mod http;
#[cfg(not(target_arch = "wasm32"))]
pub mod refresher;
pub mod service;
pub mod source;
