#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod atoms;
pub mod control;
pub mod display_context;
pub mod errors;
pub mod ewmh;
pub mod geometry;
pub mod identity;
pub mod list;
pub mod prelude;
pub mod props;
