pub mod accumulator;
pub mod alphabet;
pub mod classify;
pub mod driver;
pub mod error;
pub mod io;
pub mod kernel;
pub mod run;
pub mod sink;
pub mod stats;
pub mod strategy;
pub mod text;
