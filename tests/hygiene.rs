//! Hygiene: enforces coding standards at test time
//!
//! Scans production sources of this crate and the `gateway` crate for
//! antipatterns. Each pattern has a budget (ideally zero). If you must add an
//! occurrence, remove an existing one first; budgets never grow.

use std::fs;
use std::path::Path;

const SOURCE_ROOTS: [&str; 2] = ["src", "gateway/src"];

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: these take down the whole page.
    Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "explicit panic" },
    Budget { pattern: "unreachable!(", max: 0, why: "explicit panic" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    // Silent loss: discards errors without inspecting.
    Budget { pattern: "let _ =", max: 0, why: "discarded result" },
    // The one hit is gloo's `Response::ok()` status check in util/style.rs.
    Budget { pattern: ".ok()", max: 1, why: "error converted to None" },
    // Browser resources.
    Budget { pattern: ".forget()", max: 0, why: "leaked JS closure; own it instead" },
    Budget { pattern: "thread_local!", max: 0, why: "hidden global; pass state through context" },
    // Style / structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "dead code" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files, excluding `_test.rs` modules.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in SOURCE_ROOTS {
        collect_rs_files(Path::new(root), &mut files);
    }
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (file.path.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(
        files.iter().any(|f| f.path.ends_with("lib.rs")),
        "no sources found; run tests from the crate root"
    );
}

#[test]
fn antipattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "{} ({}): found {count}, max {}\n{detail}",
                budget.pattern, budget.why, budget.max
            ));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}
