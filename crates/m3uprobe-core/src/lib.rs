pub mod batch;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod playlist;
pub mod probe;
pub mod report;
pub mod targets;
