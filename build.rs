use std::{env, path::PathBuf};

/// Bake `.env` entries into the binary so `option_env!` can serve as a
/// fallback when the runtime environment does not carry them.
fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let env_path = PathBuf::from(&manifest_dir).join(".env");

    println!("cargo:rerun-if-changed={}", env_path.display());

    if !env_path.exists() {
        println!("cargo:warning=no .env at {}, GEMINI_API_KEY must come from the runtime environment", env_path.display());
        return;
    }

    let entries = dotenvy::from_path_iter(&env_path).expect("Failed to read .env file");
    for item in entries {
        let (key, val) = item.expect("Failed to parse .env entry");
        if matches!(key.as_str(), "GEMINI_API_KEY" | "LOG_ANALYZER_MODEL" | "GEMINI_BASE_URL") {
            println!("cargo:rustc-env={}={}", key, val);
        }
    }
}
