// Library module for sweep
// Re-exports modules for use in integration tests and external crates

pub mod cleaner;
