pub mod browse;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod pipeline;
pub mod report;
pub mod tui;
