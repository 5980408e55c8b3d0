//! Fuzz target for the loader.
//!
//! The parser must never panic on malformed input, and whatever it loads
//! must survive the rock-songs pipeline and a summary.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wrangle::pipeline::{CleaningPipeline, CleaningStep};
use wrangle::{describe, Parser};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(table) = Parser::new().parse_str(text) else {
        return;
    };

    let pipeline = CleaningPipeline::new(vec![CleaningStep::CoerceNumeric { column: None }]);
    if let Ok((cleaned, _)) = pipeline.run(table) {
        let _ = describe(&cleaned.numeric_only());
    }
});
