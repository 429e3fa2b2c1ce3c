//! Performance benchmarks for parsing and flattening.
//!
//! Run with: `cargo bench -p hyde-config`

use std::fmt::Write as _;
use std::path::Path;

use divan::Bencher;
use hyde_config::{Document, DocumentLoader, EnvFlattener, FileFormat, HyprFlattener};

fn main() {
    divan::main();
}

/// A HyDE-shaped document with `sections` plain tables and as many
/// Hyprland tables, ten keys each.
fn generate_toml(sections: usize) -> String {
    let mut out = String::new();

    for s in 0..sections {
        let _ = writeln!(out, "[section{s}]");
        for k in 0..10 {
            let _ = writeln!(out, "key{k} = \"value {s}-{k}\"");
        }
        let _ = writeln!(out, "list = [1, 2, 3]\n");

        let _ = writeln!(out, "[hyprland.group{s}]");
        for k in 0..10 {
            let _ = writeln!(out, "gaps_{k} = {k}");
        }
        out.push('\n');
    }

    out
}

fn generate_document(sections: usize) -> Document {
    DocumentLoader::parse_str(
        &generate_toml(sections),
        FileFormat::Toml,
        Path::new("bench.toml"),
    )
    .unwrap()
}

// ============================================================================
// Parsing
// ============================================================================

#[divan::bench(args = [1, 10, 100])]
fn parse_toml(bencher: Bencher, sections: usize) {
    let content = generate_toml(sections);

    bencher.bench(|| {
        DocumentLoader::parse_str(
            divan::black_box(&content),
            FileFormat::Toml,
            Path::new("bench.toml"),
        )
        .unwrap()
    });
}

// ============================================================================
// Flattening
// ============================================================================

#[divan::bench(args = [1, 10, 100])]
fn flatten_env(bencher: Bencher, sections: usize) {
    let document = generate_document(sections);
    let flattener = EnvFlattener::new(true);

    bencher.bench(|| flattener.flatten(divan::black_box(&document)).unwrap());
}

#[divan::bench(args = [1, 10, 100])]
fn flatten_hypr(bencher: Bencher, sections: usize) {
    let document = generate_document(sections);
    let flattener = HyprFlattener::new();

    bencher.bench(|| flattener.flatten(divan::black_box(&document)).unwrap());
}

#[divan::bench(args = [10, 100])]
fn flatten_both_parallel(bencher: Bencher, sections: usize) {
    let document = generate_document(sections);
    let env = EnvFlattener::new(true);
    let hypr = HyprFlattener::new();

    bencher.bench(|| {
        rayon::join(
            || env.flatten(divan::black_box(&document)).unwrap(),
            || hypr.flatten(divan::black_box(&document)).unwrap(),
        )
    });
}
