//! Optional counters emitted through the `metrics` facade.
//!
//! Every helper compiles to nothing unless the `metrics` feature is enabled.

use crate::roster::Resolution;

/// Counter incremented once per reporting-manager resolution.
pub const MANAGER_RESOLUTIONS_TOTAL: &str = "orgtree_manager_resolutions_total";
/// Counter incremented when a fuzzy lookup is answered from the cache.
pub const FUZZY_CACHE_HITS_TOTAL: &str = "orgtree_fuzzy_cache_hits_total";
/// Counter incremented once per hierarchy assembly.
pub const ASSEMBLIES_TOTAL: &str = "orgtree_assemblies_total";

#[cfg(feature = "metrics")]
pub(crate) fn record_resolution(resolution: Resolution) {
    metrics::counter!(MANAGER_RESOLUTIONS_TOTAL, "kind" => resolution.as_str()).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_resolution(_resolution: Resolution) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_cache_hit() {
    metrics::counter!(FUZZY_CACHE_HITS_TOTAL).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_cache_hit() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_assembly(mode: &'static str) {
    metrics::counter!(ASSEMBLIES_TOTAL, "mode" => mode).increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) const fn record_assembly(_mode: &'static str) {}
