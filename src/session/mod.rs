//! Session driver module

pub mod driver;

pub use driver::SessionDriver;
