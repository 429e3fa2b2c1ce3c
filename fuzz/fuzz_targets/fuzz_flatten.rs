#![no_main]

use std::path::Path;

use hyde_config::{DocumentLoader, EnvFlattener, FileFormat, HyprFlattener};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(document) = DocumentLoader::parse_str(data, FileFormat::Toml, Path::new("fuzz.toml"))
    else {
        return;
    };

    let env = EnvFlattener::new(true).flatten(&document);
    let hypr = HyprFlattener::new().flatten(&document);

    // === Export mode prefixes every line, and flattening is deterministic ===
    if let Ok(lines) = &env {
        assert!(lines.iter().all(|line| line.starts_with("export ")));
        assert_eq!(
            env.as_ref().ok().map(|l| l.contents()),
            EnvFlattener::new(true).flatten(&document).ok().map(|l| l.contents())
        );
    }

    if let Ok(lines) = &hypr {
        assert!(lines.iter().all(|line| line.contains('=')));
    }
});
