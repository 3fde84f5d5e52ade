pub mod counter;
pub mod counters;
pub mod harness;
pub mod strategy;
