#![forbid(unsafe_code)]

pub mod compute;
pub mod config;
pub mod fleet;
pub mod pricing;
pub mod subnets;
