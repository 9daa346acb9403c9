use std::env;
use std::fs;

const MODEL_FILES: [&str; 3] = [
    "crop_random_model.json",
    "crop_tree_model.json",
    "crop_knn_model.json",
];

fn main() {
    println!("cargo:rerun-if-env-changed=SOWSMART_VERSION");
    println!("cargo:rerun-if-changed=models");

    // Release builds set SOWSMART_VERSION; local builds report the crate version.
    let version = env::var("SOWSMART_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .unwrap_or_else(|| "dev".to_string());
    println!("cargo:rustc-env=SOWSMART_VERSION={version}");

    // The bundle ships models/ as a resource; flag a checkout without artifacts.
    let bundled: Vec<String> = fs::read_dir("models")
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    for file in MODEL_FILES {
        if !bundled.iter().any(|name| name == file) {
            println!("cargo:warning=models/{file} is missing; prediction will be unavailable");
        }
    }
}
