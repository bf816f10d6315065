#![allow(dead_code)]

use std::sync::Once;

use topolis::geometry::{LinearRing, Polygon};

/// Installs a test-writer subscriber once per test binary.
///
/// Defaults to WARN everywhere and INFO for topolis; override with
/// `RUST_LOG` (e.g. `RUST_LOG=topolis=trace`).
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
            .add_directive("topolis=info".parse().unwrap_or_default());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}

pub fn ring(coords: &[(f64, f64)]) -> LinearRing {
    coords.iter().copied().collect()
}

pub fn square(min: f64, max: f64) -> LinearRing {
    ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)])
}

pub fn polygon(shell: LinearRing, holes: Vec<LinearRing>) -> Polygon {
    Polygon::new(shell, holes)
}
