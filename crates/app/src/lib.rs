//! Tiffin application: a persistent shopping session over the `tiffin` ordering rules.

pub mod clock;
pub mod config;
pub mod context;
pub mod observability;
pub mod orders;
pub mod session;
pub mod shopping;

#[cfg(test)]
mod test;
