//! Deterministic text rendering of a `CompressedDispatchTable`.

use std::fmt::Write as _;

use super::CompressedDispatchTable;

pub fn render(table: &CompressedDispatchTable) -> String {
    let mut out = String::new();

    writeln!(out, "[summary]").unwrap();
    writeln!(out, "entries = {}", table.entry_count()).unwrap();
    writeln!(out, "original_bytes = {}", table.original_size_bytes()).unwrap();
    writeln!(out, "compressed_bytes = {}", table.compressed_size_bytes()).unwrap();
    writeln!(out, "ratio = {:.3}", table.compression_ratio()).unwrap();
    out.push('\n');

    writeln!(out, "[entries]").unwrap();
    for i in 0..table.entry_count() {
        let entry = table.entry(i);
        let pattern = table.decompress_pattern(i);
        let pattern_str: Vec<String> = pattern.iter().map(|t| t.as_u32().to_string()).collect();
        writeln!(
            out,
            "#{i} pattern=[{}] specificity={} freq={} hot={}",
            pattern_str.join(", "),
            entry.specificity_score,
            entry.call_frequency,
            entry.hot_path,
        )
        .unwrap();
    }

    out
}
