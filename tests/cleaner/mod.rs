// Test module entry point for cleaner tests
// Scanner, deleter and error tests organized here

mod common;
mod delete_tests;
mod error_tests;
