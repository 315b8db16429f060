//! hostadm application - terminal front end
//!
//! Thin layers over `hostadm_core`: the page registry, the built-in
//! administration pages, and plain-text rendering and input parsing
//! for driving pages from a command line.

pub mod input;
pub mod pages;
pub mod registry;
pub mod render;
