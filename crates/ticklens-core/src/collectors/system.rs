//! System domain: the engine's own processing metrics.

use ticklens_types::records::SystemRecord;

use crate::collectors::CollectError;

/// Cross-tick timing state owned by the orchestrator.
///
/// Updated after each snapshot is finalized; the system collector
/// reads it at the start of the next tick, so durations always refer
/// to completed work.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimingState {
    /// Snapshots completed so far in this session.
    pub ticks_processed: u64,
    /// Sum of all processing durations, for the running average.
    pub total_duration_nanos: u128,
    /// Duration of the most recently completed tick.
    pub last_duration_nanos: u64,
}

impl TimingState {
    /// Fold one completed tick into the running totals.
    pub fn record(&mut self, duration_nanos: u64) {
        self.ticks_processed = self.ticks_processed.saturating_add(1);
        self.total_duration_nanos = self
            .total_duration_nanos
            .saturating_add(u128::from(duration_nanos));
        self.last_duration_nanos = duration_nanos;
    }

    /// Mean duration per completed tick, zero before the first.
    pub fn average_nanos(&self) -> u64 {
        if self.ticks_processed == 0 {
            return 0;
        }
        let average = self
            .total_duration_nanos
            .checked_div(u128::from(self.ticks_processed))
            .unwrap_or(0);
        u64::try_from(average).unwrap_or(u64::MAX)
    }
}

/// Collect the system sub-record from the orchestrator's timing state
/// and the queue depths observed before this tick's drains. Never
/// fails.
pub fn collect(
    timing: TimingState,
    chat_depth: usize,
    inventory_depth: usize,
) -> Result<SystemRecord, CollectError> {
    Ok(SystemRecord {
        // The tick in flight counts toward the session total.
        ticks_processed: timing.ticks_processed.saturating_add(1),
        last_tick_duration_nanos: timing.last_duration_nanos,
        average_tick_duration_nanos: timing.average_nanos(),
        chat_queue_depth: u32::try_from(chat_depth).unwrap_or(u32::MAX),
        inventory_queue_depth: u32::try_from(inventory_depth).unwrap_or(u32::MAX),
    })
}
