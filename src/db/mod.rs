pub mod alerts;
pub mod attendance;
pub mod convert;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod reports;
pub mod shifts;
pub mod staff;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
