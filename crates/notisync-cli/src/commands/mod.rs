pub mod common;
pub mod completions;
pub mod diff;
pub mod replay;
