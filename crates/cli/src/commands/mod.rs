//! CLI subcommands.

pub mod cart;
pub mod catalog;
