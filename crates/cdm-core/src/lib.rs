pub mod config;
pub mod logging;

// Core modules
pub mod checksum;
pub mod directory;
pub mod penalty;
pub mod pool;
pub mod stores;
