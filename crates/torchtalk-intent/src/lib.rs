//! # torchtalk-intent
//!
//! Per-turn intent synthesis. Deterministic fast paths cover the shapes
//! the regexes can prove; the generator fallback is advisory only and
//! every decision passes the hard rule ladder before leaving this crate.

pub mod parse;
pub mod rules;
pub mod synthesizer;

pub use parse::{extract_json_block, parse_generator_output, GeneratorGuess};
pub use synthesizer::IntentSynthesizer;
