use crate::encoding::EncodingType;
use serde::{Deserialize, Serialize};

/// One scheduled stimulus presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub encoding: EncodingType,
    /// Percentage the participant is asked to estimate, in 1..=100.
    pub ground_truth: u8,
    /// 1-based position within this encoding's block.
    pub position_in_block: usize,
}

/// Which rendered slot carries the reference (larger) magnitude.
///
/// Slot numbering is variant-specific: band index for aligned bars,
/// segment index for stacked bars, slice index for pies, 0 = left /
/// 1 = right for paired circles, stars and slopes, row-major cell index
/// for the color grids. Informational only; never shown to the
/// participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimulusResult {
    pub larger_index: usize,
}

/// Run-level state machine states.
///
/// `Presenting` is normally transient (a stimulus is drawn synchronously
/// before control returns), but is re-entered when rendering fails so the
/// same trial can be presented again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Presenting,
    AwaitingResponse,
    Finished,
}

/// Immutable per-trial outcome, appended in completion order.
///
/// Field names follow the export column contract consumed by the
/// downstream analysis scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    #[serde(rename = "vizType")]
    pub encoding: EncodingType,
    /// 1-based completion order across the whole run.
    pub trial: usize,
    pub ground_truth: u8,
    /// Slider estimate in [0, 100].
    pub response: f64,
    pub response_time_ms: u64,
}
