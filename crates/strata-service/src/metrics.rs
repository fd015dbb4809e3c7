//! Prometheus metrics for the cache-aside protocol.

use metrics::{counter, describe_counter};

/// Metric names for the profile service.
pub mod names {
    /// Reads answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "strata_cache_hits_total";
    /// Reads that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "strata_cache_misses_total";
    /// Cache operations that failed.
    pub const CACHE_ERRORS_TOTAL: &str = "strata_cache_errors_total";
    /// Store point reads.
    pub const STORE_READS_TOTAL: &str = "strata_store_reads_total";
    /// Store point writes.
    pub const STORE_WRITES_TOTAL: &str = "strata_store_writes_total";
    /// Cache entries rewritten after a store hit.
    pub const CACHE_REPOPULATIONS_TOTAL: &str = "strata_cache_repopulations_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of reads served by the cache");
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of reads that fell through to the durable store"
    );
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of failed cache operations, by operation"
    );
    describe_counter!(
        names::STORE_READS_TOTAL,
        "Total number of durable store reads, by outcome"
    );
    describe_counter!(
        names::STORE_WRITES_TOTAL,
        "Total number of durable store writes, by outcome"
    );
    describe_counter!(
        names::CACHE_REPOPULATIONS_TOTAL,
        "Total number of cache repopulations after a store hit, by outcome"
    );
}

/// Profile service metrics recorder.
#[derive(Clone)]
pub struct ProfileMetrics;

impl ProfileMetrics {
    pub fn cache_hit() {
        counter!(names::CACHE_HITS_TOTAL).increment(1);
    }

    pub fn cache_miss() {
        counter!(names::CACHE_MISSES_TOTAL).increment(1);
    }

    /// Record a failed cache operation (`get`, `set`, `delete`).
    pub fn cache_error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a store read with outcome `hit`, `miss` or `error`.
    pub fn store_read(outcome: &'static str) {
        counter!(names::STORE_READS_TOTAL, "outcome" => outcome).increment(1);
    }

    /// Record a store write with outcome `ok` or `error`.
    pub fn store_write(outcome: &'static str) {
        counter!(names::STORE_WRITES_TOTAL, "outcome" => outcome).increment(1);
    }

    /// Record a cache repopulation with outcome `ok` or `error`.
    pub fn cache_repopulated(outcome: &'static str) {
        counter!(names::CACHE_REPOPULATIONS_TOTAL, "outcome" => outcome).increment(1);
    }
}
