//! Fuzz target for number and date coercion.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wrangle::clean::{coerce_numeric, normalize_name, parse_date, parse_number};
use wrangle::Column;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = parse_number(text);
    let _ = parse_date(text, None);

    let _ = normalize_name(text);

    let column = Column::from_strs("fuzz", &[text]);
    let coerced = coerce_numeric(&column);
    assert!(coerced.is_identical(&coerce_numeric(&coerced)));
});
