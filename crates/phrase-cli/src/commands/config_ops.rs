use std::fs;

use super::die;

pub fn settings_export() {
    print!("{}", phrase_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        phrase_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: tokenizer.boundary_pattern={}, cache.capacity={}, lookup.max_results={}",
        s.tokenizer.boundary_pattern, s.cache.capacity, s.lookup.max_results
    );
}
