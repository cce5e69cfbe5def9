//! # Observability & Tracing
//!
//! Shared subscriber setup for binaries built on the store.
//!
//! The format is compact and hides the module path (`with_target(false)`); the store tags
//! its own events with `record_type` instead. Levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and mutations
//! RUST_LOG=debug cargo run    # every request, with payloads
//! ```
//!
//! With `RUST_LOG=info` a panel session against the in-memory platform reads like:
//!
//! ```text
//! INFO Store started record_type="ProductRecord"
//! INFO Inserted record_type="LineItemRecord" id=00k1 size=1
//! INFO panel status changed from=Loading to=Ready
//! INFO Deleted record_type="LineItemRecord" id=00k1 size=0
//! ```

/// Installs the global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once per process. Later calls are ignored, so tests may call it freely.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
