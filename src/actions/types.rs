//! Action model and batch-ingestion normalization
//!
//! Decision-makers hand over actions in two shapes: mapping-style JSON
//! (`{"type": "key_press", "key": "A"}`) and attribute-style objects using
//! `action_type`/`key_name` field names. Both are normalized into [`Action`]
//! once, at the batch boundary.

use serde::{Deserialize, Serialize};

/// Default pacing for a swipe when the action does not specify one
const DEFAULT_SWIPE_SECONDS: f64 = 0.5;

/// One concrete input action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    KeyPress { key: String, duration: f64 },
    KeyHold { key: String, duration: f64 },
    ButtonPress { button_id: String },
    SliderMove { slider_id: String, value: f64 },
    Swipe { x1: i64, y1: i64, x2: i64, y2: i64, duration: f64 },
    Wait { duration: f64 },
}

impl Action {
    /// Short tag for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::KeyPress { .. } => "key_press",
            Action::KeyHold { .. } => "key_hold",
            Action::ButtonPress { .. } => "button_press",
            Action::SliderMove { .. } => "slider_move",
            Action::Swipe { .. } => "swipe",
            Action::Wait { .. } => "wait",
        }
    }
}

/// Raw action as received from the decision-maker
///
/// Accepts both mapping-style and attribute-style field names via aliases.
/// Swipe coordinates additionally accept the `x`/`y`/`end_x`/`end_y` names
/// used by device-shell callers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAction {
    #[serde(rename = "type", alias = "action_type")]
    pub action_type: Option<String>,
    #[serde(alias = "key_name")]
    pub key: Option<String>,
    pub button_id: Option<String>,
    pub slider_id: Option<String>,
    pub value: Option<f64>,
    pub duration: Option<f64>,
    #[serde(alias = "x")]
    pub x1: Option<i64>,
    #[serde(alias = "y")]
    pub y1: Option<i64>,
    #[serde(alias = "end_x")]
    pub x2: Option<i64>,
    #[serde(alias = "end_y")]
    pub y2: Option<i64>,
    /// Decision rationale, logged but never acted on
    pub reason: Option<String>,
}

impl RawAction {
    /// Normalize into the internal action form
    ///
    /// `default_tap_seconds` fills in a missing key press duration. Returns
    /// the skip reason for unrecognized tags or missing required fields; the
    /// batch boundary logs it and moves on.
    pub fn normalize(&self, default_tap_seconds: f64) -> std::result::Result<Action, String> {
        let action_type = self
            .action_type
            .as_deref()
            .ok_or_else(|| "action has no type tag".to_string())?;

        match action_type {
            "key_press" => {
                let key = self
                    .key
                    .clone()
                    .ok_or_else(|| "key is required for key_press".to_string())?;
                Ok(Action::KeyPress {
                    key,
                    duration: self.duration.unwrap_or(default_tap_seconds),
                })
            }
            "key_hold" => {
                let key = self
                    .key
                    .clone()
                    .ok_or_else(|| "key is required for key_hold".to_string())?;
                let duration = self
                    .duration
                    .ok_or_else(|| "duration is required for key_hold".to_string())?;
                Ok(Action::KeyHold { key, duration })
            }
            "button_press" => {
                let button_id = self
                    .button_id
                    .clone()
                    .ok_or_else(|| "button_press requires button_id".to_string())?;
                Ok(Action::ButtonPress { button_id })
            }
            "slider_move" => {
                let slider_id = self
                    .slider_id
                    .clone()
                    .ok_or_else(|| "slider_move requires slider_id".to_string())?;
                let value = self
                    .value
                    .ok_or_else(|| "slider_move requires value".to_string())?;
                Ok(Action::SliderMove { slider_id, value })
            }
            "swipe" => {
                let (x1, y1, x2, y2) = match (self.x1, self.y1, self.x2, self.y2) {
                    (Some(x1), Some(y1), Some(x2), Some(y2)) => (x1, y1, x2, y2),
                    _ => return Err("swipe requires x1, y1, x2, y2".to_string()),
                };
                Ok(Action::Swipe {
                    x1,
                    y1,
                    x2,
                    y2,
                    duration: self.duration.unwrap_or(DEFAULT_SWIPE_SECONDS),
                })
            }
            "wait" => {
                let duration = self
                    .duration
                    .ok_or_else(|| "duration is required for wait".to_string())?;
                Ok(Action::Wait { duration })
            }
            other => Err(format!("unknown action type: {}", other)),
        }
    }
}

/// Result of one action inside a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// The action ran to completion
    Completed,
    /// The action ran and failed; siblings were not affected
    Failed(String),
    /// The action never ran (unrecognized or malformed)
    Skipped(String),
}

/// Per-action batch report entry
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    /// Position in the submitted batch
    pub index: usize,
    pub status: BatchStatus,
}

impl ActionOutcome {
    /// Whether the action completed successfully
    pub fn is_completed(&self) -> bool {
        self.status == BatchStatus::Completed
    }
}
