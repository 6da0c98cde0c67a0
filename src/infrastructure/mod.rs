//! Infrastructure layer - store implementations, services and runtime setup

pub mod account;
pub mod logging;
pub mod storage;
