pub mod cause;
pub mod filter;
pub mod machine;
pub mod production;
pub mod report;
pub mod shift;
