#![doc = include_str!("../README.md")]

pub mod args;
pub mod filter;
pub mod models;
pub mod plugin;

pub use args::{FilterArgs, Resolution, ResolvedParams};
pub use filter::{create, CuganFilter, FilterOutput};
