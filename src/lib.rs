// The binary entry point is main.rs; the library exposes the module tree to
// integration tests and criterion benchmarks.

pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod lexicon;
pub mod session;
pub mod store;
pub mod ui;
