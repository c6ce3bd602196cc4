pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod pickers;
pub mod record;
pub mod render;
pub mod source;
pub mod status;
