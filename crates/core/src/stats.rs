//! Cache statistics collection and table rendering.
//!
//! Each policy run produces one [`CacheStats`] record. The renderer emits the
//! markdown table reported on stdout: one header plus one row per policy,
//! with hit rates as percentages. A rate whose denominator is zero renders as
//! `nan%` rather than being suppressed.

/// Per-run cache hit/miss counters.
///
/// Reads advance the access counter of their kind and, on hit, the matching
/// hit counter. Writes advance `data_access` only, so `data_hit` counts read
/// hits exclusively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Instruction fetches issued to the cache.
    pub instr_access: u64,
    /// Instruction fetches that hit a resident line.
    pub instr_hit: u64,
    /// Data reads and writes issued to the cache.
    pub data_access: u64,
    /// Data reads that hit a resident line.
    pub data_hit: u64,
}

impl CacheStats {
    /// Total accesses of both kinds.
    pub fn total_access(&self) -> u64 {
        self.instr_access + self.data_access
    }

    /// Total read hits of both kinds.
    pub fn total_hit(&self) -> u64 {
        self.instr_hit + self.data_hit
    }

    /// Overall hit rate in percent; NaN when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        percentage(self.total_hit(), self.total_access())
    }

    /// Instruction hit rate in percent; NaN when nothing was fetched.
    pub fn instr_hit_rate(&self) -> f64 {
        percentage(self.instr_hit, self.instr_access)
    }

    /// Data hit rate in percent; NaN when no data was accessed.
    pub fn data_hit_rate(&self) -> f64 {
        percentage(self.data_hit, self.data_access)
    }
}

fn percentage(hit: u64, access: u64) -> f64 {
    if access == 0 {
        f64::NAN
    } else {
        100.0 * hit as f64 / access as f64
    }
}

/// Returns the two header lines of the statistics table.
pub fn table_header() -> String {
    let columns = "| replacement | hit_rate | instr_hit_rate | data_hit_rate | instr_access |    instr_hit |  data_access |     data_hit |";
    let rule = "| :---------- | :------: | -------------: | ------------: | -----------: | -----------: | -----------: | -----------: |";
    format!("{columns}\n{rule}")
}

/// Renders one table row for the named policy.
pub fn table_row(name: &str, stats: &CacheStats) -> String {
    format!(
        "| {:<11} | {:>8} | {:>14} | {:>13} | {:>12} | {:>12} | {:>12} | {:>12} |",
        name,
        rate_cell(stats.hit_rate()),
        rate_cell(stats.instr_hit_rate()),
        rate_cell(stats.data_hit_rate()),
        stats.instr_access,
        stats.instr_hit,
        stats.data_access,
        stats.data_hit,
    )
}

// `{}` on f64 prints "NaN"; the table contract wants lowercase "nan%".
fn rate_cell(rate: f64) -> String {
    if rate.is_nan() {
        "nan%".to_owned()
    } else {
        format!("{rate:.4}%")
    }
}
