//! Infrastructure - external dependency implementations (ports + adapters).

pub mod config;
pub mod ports;
pub mod random;
