pub mod select;

pub use select::{run_selector, SelectList, SelectOutcome};
