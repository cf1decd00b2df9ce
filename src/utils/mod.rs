pub mod config_loader;

#[cfg(test)]
pub mod test_utils;

pub use config_loader::*;
