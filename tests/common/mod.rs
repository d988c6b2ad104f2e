use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use microreef::Simulation;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Unique path in the system temp directory
#[allow(dead_code)]
pub fn temp_path(name: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("microreef-{}-{n}-{name}", std::process::id()))
}

/// Write `text` to a fresh temp file
#[allow(dead_code)]
pub fn write_temp(name: &str, text: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, text).expect("write temp file");
    path
}

/// Simulation loaded from `text`, panicking if the load fails
#[allow(dead_code)]
pub fn loaded(text: &str) -> Simulation {
    let path = write_temp("input.txt", text);
    let mut sim = Simulation::new();
    sim.start(&path).expect("load simulation file");
    let _ = std::fs::remove_file(&path);
    sim
}
