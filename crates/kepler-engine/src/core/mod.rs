pub mod attributes;
pub mod filter;
pub mod lifecycle;
pub mod projection;
pub mod rng;
pub mod time;
