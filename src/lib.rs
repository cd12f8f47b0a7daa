//! guaxiang: client for a six-line hexagram (六爻) divination service
//!
//! Validates a cast entry, fetches the result from the generation endpoint,
//! renders it into a display tree coloured by the five elements (五行) and
//! emits that tree as terminal text, HTML, JSON or an outline.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
