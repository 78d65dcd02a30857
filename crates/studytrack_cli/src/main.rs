//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `studytrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("studytrack_core ping={}", studytrack_core::ping());
    println!("studytrack_core version={}", studytrack_core::core_version());
}
