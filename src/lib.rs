// Library target shared by the binary, the integration tests and the criterion
// benchmarks. The terminal front end lives in main.rs and ui/.

pub mod app;
pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod session;
pub mod state;
pub mod store;
