//! Clean reading copies of Project Gutenberg books.
//!
//! [`normalizer::process`] is the pure core: boilerplate stripping, a reading
//! time estimate and heuristic chapter detection. The remaining modules fetch
//! raw text and write the results for the command-line tool.

pub mod cli;
pub mod converter;
pub mod error;
pub mod gutendex;
pub mod normalizer;
pub mod source;
