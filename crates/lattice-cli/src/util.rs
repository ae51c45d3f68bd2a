use std::fs;
use std::path::Path;

pub fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("error: failed to read {}: {err}", path.display());
        std::process::exit(1);
    })
}
