//! Benchmarks for full engine render scenarios.

mod engine;

pub use engine::bench_engine;
