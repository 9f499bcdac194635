//! Usage cost estimation

mod pricing;

pub use pricing::{ModelPrice, PriceTable};
