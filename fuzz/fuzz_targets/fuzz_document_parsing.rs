#![no_main]

use std::path::Path;

use hyde_config::{DocumentLoader, FileFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Every format must reject garbage with an error, never a panic ===
    for format in [FileFormat::Toml, FileFormat::Json, FileFormat::Yaml] {
        let path = Path::new("fuzz").with_extension(format.name().to_lowercase());

        if let Ok(document) = DocumentLoader::parse_str(data, format, &path) {
            // Parsed documents always have at least one key
            assert!(!document.is_empty());

            // Rendering never panics
            for value in document.values() {
                let _ = value.to_string();
            }
        }
    }
});
