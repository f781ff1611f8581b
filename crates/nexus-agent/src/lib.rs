pub mod longcat;
pub mod provider;
