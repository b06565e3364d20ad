pub mod backup;
pub mod calculator;
pub mod cause;
pub mod config;
pub mod del;
pub mod log;
pub mod machine;
pub mod record;
pub mod report;
