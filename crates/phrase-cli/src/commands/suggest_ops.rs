use std::fmt::Write as _;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};

use serde::Serialize;
use tracing::debug;

use phrase_core::paths::enumerate;
use phrase_core::tree::render;
use phrase_core::{LookupError, SuggestionEngine, Term};

use super::{die, load_engine, load_settings};

#[derive(Serialize)]
struct BatchRecord<'a> {
    input: &'a str,
    suggestions: Vec<Vec<String>>,
}

fn as_strings(suggestions: Vec<Vec<Term>>) -> Vec<Vec<String>> {
    suggestions
        .into_iter()
        .map(|terms| terms.into_iter().map(|t| t.value).collect())
        .collect()
}

/// One suggestion per line, terms separated by ` | `.
pub fn format_suggestions(suggestions: &[Vec<Term>]) -> String {
    let mut out = String::new();
    for terms in suggestions {
        let line: Vec<&str> = terms.iter().map(|t| t.value.as_str()).collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }
    out
}

/// Tokens, match tree, and every path with its coverage verdict.
pub fn explain_report(engine: &SuggestionEngine, text: &str) -> Result<String, LookupError> {
    let tokens = engine.tokenize(text);
    let mut out = String::new();
    let _ = writeln!(out, "input:  {text:?}");
    let _ = writeln!(out, "tokens: {tokens:?}");

    let root = engine.match_tree(text)?;
    let _ = writeln!(out, "\n--- match tree ---");
    if root.is_leaf() {
        let _ = writeln!(out, "(no candidates)");
    } else {
        out.push_str(&render(&root));
    }

    let _ = writeln!(out, "\n--- paths ---");
    for (i, path) in enumerate(&root).iter().enumerate() {
        let spans: Vec<String> = path
            .nodes()
            .iter()
            .map(|n| format!("[{}, {}) {}", n.start, n.end, n.term))
            .collect();
        let verdict = if path.covers(tokens.len()) {
            "covers"
        } else {
            "partial"
        };
        let _ = writeln!(out, "#{:<3} {:<8} {}", i + 1, verdict, spans.join(" -> "));
    }
    Ok(out)
}

pub fn suggest(
    terms_file: &str,
    text: &str,
    json: bool,
    max_results: Option<usize>,
    settings_file: Option<&str>,
) {
    let settings = die!(load_settings(settings_file), "Error: {}");
    let engine = die!(load_engine(terms_file, &settings, max_results), "Error: {}");
    let suggestions = die!(engine.suggestions_for(text), "Lookup failed: {}");
    if json {
        let json = die!(
            serde_json::to_string_pretty(&as_strings(suggestions)),
            "Error: {}"
        );
        println!("{json}");
    } else if suggestions.is_empty() {
        eprintln!("(no suggestions)");
    } else {
        print!("{}", format_suggestions(&suggestions));
    }
}

pub fn explain(terms_file: &str, text: &str, settings_file: Option<&str>) {
    let settings = die!(load_settings(settings_file), "Error: {}");
    let engine = die!(load_engine(terms_file, &settings, None), "Error: {}");
    let report = die!(explain_report(&engine, text), "Lookup failed: {}");
    print!("{report}");
}

/// Run every non-empty line of `input_file`, writing JSONL records.
pub fn batch(
    terms_file: &str,
    input_file: &str,
    output_file: &str,
    settings_file: Option<&str>,
) {
    let settings = die!(load_settings(settings_file), "Error: {}");
    let engine = die!(load_engine(terms_file, &settings, None), "Error: {}");
    let count = die!(
        run_batch(&engine, input_file, output_file),
        "Batch failed: {}"
    );
    eprintln!("Wrote {count} records to {output_file}");
}

/// Returns the number of records written.
pub fn run_batch(
    engine: &SuggestionEngine,
    input_file: &str,
    output_file: &str,
) -> Result<usize, super::CliError> {
    let read_err = |source| super::CliError::Read {
        path: input_file.to_string(),
        source,
    };
    let reader = BufReader::new(fs::File::open(input_file).map_err(read_err)?);
    let write_err = |source| super::CliError::Write {
        path: output_file.to_string(),
        source,
    };
    let mut writer = BufWriter::new(fs::File::create(output_file).map_err(write_err)?);

    let mut count = 0;
    for line in reader.lines() {
        let line = line.map_err(read_err)?;
        let input = line.trim_end_matches(['\r', '\n']);
        if input.trim().is_empty() {
            continue;
        }
        let suggestions = as_strings(engine.suggestions_for(input)?);
        debug!(input, suggestions = suggestions.len(), "batch record");
        let record = BatchRecord { input, suggestions };
        let json = serde_json::to_string(&record)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        writeln!(writer, "{json}").map_err(write_err)?;
        count += 1;
    }
    writer.flush().map_err(write_err)?;
    Ok(count)
}
