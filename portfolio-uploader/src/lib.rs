#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod api;
pub mod client;
pub mod common;
pub mod context;
pub mod logging;
