pub mod config;
pub mod identity;
pub mod telemetry;

#[cfg(test)]
mod test_utils;
