//! CLI command handlers, one file per command.

mod checksum;
mod keys;
mod names;
mod servers;

pub use checksum::run_checksum;
pub use keys::{run_key_get, run_key_set};
pub use names::{run_name_get, run_name_set};
pub use servers::run_servers;
