//! Benchmark utilities for the cooperative scheduler.
//!
//! This crate provides the entities and systems shared by the scheduler
//! benchmarks: steady-state motion workloads, and churn workloads where
//! entities keep expiring and being respawned.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p coop_bench
//!
//! # Run a specific benchmark group
//! cargo bench -p coop_bench -- tick
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for
//! visualization.

pub mod fixtures;
