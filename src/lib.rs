// Library module for depclean
// Re-exports modules for use in integration tests and the binary

pub mod cleaner;
pub mod output;
pub mod ui;
