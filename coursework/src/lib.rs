//! Small self-contained helpers: arithmetic and string operators, boolean
//! gates, control-flow exercises, a discount calculator, injected book and
//! student stores, word counting and HTTP probes.

pub mod arith;
pub mod control;
pub mod discount;
pub mod fetch;
pub mod library;
pub mod words;
