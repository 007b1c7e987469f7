pub mod main_middleware;

pub use main_middleware::*;
