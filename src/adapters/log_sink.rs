//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per cycle event through the
//! `log` facade. The binary routes those records to stderr; a metrics
//! exporter would implement the same trait.

use log::{error, info};

use crate::app::events::CycleEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`CycleEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &CycleEvent) {
        match event {
            CycleEvent::ProfileApplied { readings, level } => {
                info!(
                    "CPU_TEMP:{}|SYS_TEMP:{}|PROFILE:{}",
                    readings.cpu_c, readings.system_c, level
                );
            }
            CycleEvent::FanSpeeds(rpms) => {
                info!("Fan Speeds: {}", format_rpms(rpms));
            }
            CycleEvent::FailSafeActivated { cause } => {
                error!("FAILSAFE | {} | activating profile 7", cause);
            }
            CycleEvent::FailSafeFailed { cause, error } => {
                error!("FAILSAFE | profile 7 could not be applied: {} (after: {})", error, cause);
            }
        }
    }
}

fn format_rpms(rpms: &[u32]) -> String {
    rpms.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
