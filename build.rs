// Build script that generates the error taxonomy from `metadata/errors.json`.
// Build scripts never run inside the codec, so expect() and panic() are fine here.
#![allow(clippy::expect_used)]
//
// Consumes `metadata/errors.json` and generates `$OUT_DIR/error_generated.rs`
// holding the `ErrorCode` enum with its numeric codes, names and messages.

use serde::Deserialize;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Metadata {
    version: String,
    errors: Vec<ErrorInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorInfo {
    name: String,
    code: u32,
    message: String,
}

fn main() {
    println!("cargo:rerun-if-changed=metadata/errors.json");
    println!("cargo:rerun-if-changed=build.rs");

    let metadata_path = Path::new("metadata/errors.json");
    let content = fs::read_to_string(metadata_path).expect("Failed to read metadata/errors.json");
    let metadata: Metadata =
        serde_json::from_str(&content).expect("Failed to parse metadata/errors.json");

    if metadata.version != "1" {
        panic!(
            "Unexpected metadata version '{}', expected '1'",
            metadata.version
        );
    }

    for (i, error) in metadata.errors.iter().enumerate() {
        assert_eq!(
            error.code as usize, i,
            "error codes must be dense and ordered ({})",
            error.name
        );
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    generate_error_rs(Path::new(&out_dir), &metadata.errors);
}

/// `MISS_COMMA_OR_SQUARE_BRACKET` -> `MissCommaOrSquareBracket`
fn variant_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn generate_error_rs(out_path: &Path, errors: &[ErrorInfo]) {
    let mut code = String::new();

    code.push_str(
        r#"// Error codes generated from metadata/errors.json.
//
// DO NOT EDIT - This file is generated by build.rs

use thiserror::Error;

/// Every way a parse can fail, plus `Ok` for the code table.
///
/// The `Display` form is the fixed human-readable lookup string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(u32)]
pub enum ErrorCode {
"#,
    );

    for error in errors {
        let _ = write!(
            code,
            "    /// {} (code {})\n    #[error(\"{}\")]\n    {} = {},\n\n",
            error.name,
            error.code,
            error.message,
            variant_name(&error.name),
            error.code
        );
    }
    code.push_str("}\n\n");

    let _ = write!(
        code,
        "impl ErrorCode {{\n    /// All codes in numeric order.\n    pub const ALL: [ErrorCode; {}] = [\n",
        errors.len()
    );
    for error in errors {
        let _ = writeln!(code, "        ErrorCode::{},", variant_name(&error.name));
    }
    code.push_str(
        r#"    ];

    /// Get the numeric error code.
    pub const fn code(&self) -> u32 {
        *self as u32
    }

    /// Get the error name, e.g. `MISS_COLON`.
    pub const fn name(&self) -> &'static str {
        match self {
"#,
    );
    for error in errors {
        let _ = writeln!(
            code,
            "            ErrorCode::{} => \"{}\",",
            variant_name(&error.name),
            error.name
        );
    }
    code.push_str(
        r#"        }
    }

    /// Get the fixed lookup string, e.g. `miss colon`.
    pub const fn message(&self) -> &'static str {
        match self {
"#,
    );
    for error in errors {
        let _ = writeln!(
            code,
            "            ErrorCode::{} => \"{}\",",
            variant_name(&error.name),
            error.message
        );
    }
    code.push_str(
        r#"        }
    }

    /// Look up a code by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.name() == name)
    }
}
"#,
    );

    fs::write(out_path.join("error_generated.rs"), code)
        .expect("Failed to write error_generated.rs");
}
