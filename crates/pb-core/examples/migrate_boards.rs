//! Rewrite saved-board JSON files into the current record layout.
//!
//! Accepts either a single record or a local-store array per file. Legacy
//! bare-number labels become `{number, name}` and `date` becomes
//! `updatedAt`. Files already in the current layout are left untouched.
//!
//! Usage: `cargo run -p pb-core --example migrate_boards -- boards/*.json`

use pb_core::record::{BoardRecord, records_from_json, records_to_json};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;

fn migrate(input: &str) -> Result<String, serde_json::Error> {
    if input.trim_start().starts_with('[') {
        records_to_json(&records_from_json(input)?)
    } else {
        BoardRecord::from_json(input)?.to_json()
    }
}

/// A record needs rewriting when it still carries `date`, lacks
/// `updatedAt`, or has any bare-number label.
fn record_is_legacy(record: &Value) -> bool {
    let bare_labels = record
        .get("playerNumbers")
        .and_then(Value::as_object)
        .is_some_and(|labels| labels.values().any(|l| !l.is_object()));
    record.get("date").is_some() || record.get("updatedAt").is_none() || bare_labels
}

/// Undecodable input counts as legacy so `migrate` reports the error.
fn is_legacy(input: &str) -> bool {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(records)) => records.iter().any(record_is_legacy),
        Ok(record) => record_is_legacy(&record),
        Err(_) => true,
    }
}

fn main() {
    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: migrate_boards <file.json>...");
        return;
    }

    let mut migrated = 0;
    let mut skipped = 0;

    for path in &paths {
        let input = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("SKIP {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        if !is_legacy(&input) {
            skipped += 1;
            continue;
        }

        match migrate(&input) {
            Ok(output) => {
                if let Err(e) = fs::write(path, &output) {
                    eprintln!("ERROR writing {}: {}", path.display(), e);
                } else {
                    migrated += 1;
                    println!("✓ {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("DECODE ERROR {}: {}", path.display(), e);
                skipped += 1;
            }
        }
    }

    println!("\nMigrated: {}, Skipped: {}", migrated, skipped);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_labels_are_legacy_even_with_updated_at() {
        let input = r#"{"name":"A","updatedAt":"2024-03-05T18:30:00Z","shapes":[],"players":[],"playerNumbers":{"player-3":9}}"#;
        assert!(is_legacy(input));
        let output = migrate(input).unwrap();
        assert!(!is_legacy(&output));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["playerNumbers"]["player-3"]["number"], 9);
    }

    #[test]
    fn current_files_are_left_alone() {
        let current = r#"[{"name":"A","updatedAt":"2024-03-05T18:30:00Z","shapes":[],"players":[],"playerNumbers":{"player-3":{"number":9,"name":"Kane"}}}]"#;
        assert!(!is_legacy(current));
        assert!(is_legacy(r#"[{"name":"B","date":"2024-03-05T18:30:00Z"}]"#));
    }
}
