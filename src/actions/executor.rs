//! Action executor module
//!
//! Executes one concrete action against the driver capability: keyboard
//! press/hold, button tap, slider property write, phased swipe, and wait.

use crate::actions::types::Action;
use crate::config::ActionTuning;
use crate::driver::traits::GameDriver;
use crate::elements::cache::ElementCache;
use crate::elements::types::InteractiveElement;
use crate::input::keymap::{resolve_key, KeyCode};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Keys released as a defensive reset, independent of what a batch uses
pub const RESET_KEYS: [KeyCode; 5] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Space,
];

/// Offset of the intermediate swipe nudge, in device pixels
const SWIPE_NUDGE: i64 = 2;

/// Convert a caller-supplied duration into a sleepable value
///
/// Negative or non-finite durations collapse to zero rather than panicking.
fn secs(duration: f64) -> Duration {
    if duration.is_finite() && duration > 0.0 {
        Duration::from_secs_f64(duration)
    } else {
        Duration::ZERO
    }
}

/// Action executor
///
/// Responsible for executing a single action. Batch semantics (ordering,
/// failure containment, key-reset brackets) live in the scheduler.
pub struct ActionExecutor {
    driver: Arc<dyn GameDriver>,
    cache: Arc<ElementCache>,
    tuning: ActionTuning,
}

impl ActionExecutor {
    /// Create a new action executor
    pub fn new(driver: Arc<dyn GameDriver>, cache: Arc<ElementCache>, tuning: ActionTuning) -> Self {
        Self {
            driver,
            cache,
            tuning,
        }
    }

    /// Execution tuning knobs
    pub fn tuning(&self) -> &ActionTuning {
        &self.tuning
    }

    /// Execute one normalized action
    pub async fn dispatch(&self, action: &Action) -> Result<()> {
        match action {
            Action::KeyPress { key, duration } => self.key_press(key, *duration).await,
            Action::KeyHold { key, duration } => self.key_hold(key, *duration).await,
            Action::ButtonPress { button_id } => self.button_press(button_id).await,
            Action::SliderMove { slider_id, value } => self.slider_move(slider_id, *value).await,
            Action::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration,
            } => self.swipe(*x1, *y1, *x2, *y2, *duration).await,
            Action::Wait { duration } => self.wait(*duration).await,
        }
    }

    /// Press a key and release it after `duration` seconds
    #[instrument(skip(self))]
    pub async fn key_press(&self, key: &str, duration: f64) -> Result<()> {
        let code = resolve_key(key)?;
        debug!("KEY_PRESS: {} for {}s", key, duration);
        self.hold(code, duration).await
    }

    /// Hold a key for `duration` seconds
    #[instrument(skip(self))]
    pub async fn key_hold(&self, key: &str, duration: f64) -> Result<()> {
        let code = resolve_key(key)?;
        debug!("KEY_HOLD: {} for {}s", key, duration);
        self.hold(code, duration).await
    }

    async fn hold(&self, code: KeyCode, duration: f64) -> Result<()> {
        self.driver.key_down(code).await?;
        tokio::time::sleep(secs(duration)).await;
        self.driver.key_up(code).await
    }

    /// Tap a button element by id
    #[instrument(skip(self))]
    pub async fn button_press(&self, button_id: &str) -> Result<()> {
        let element = self.lookup_enabled(button_id).await?;

        debug!("BUTTON_PRESS: {} (ID: {})", element.name, button_id);
        element.handle.tap().await
    }

    /// Set a slider element's value by id
    ///
    /// The unqualified component binding is tried first; only when it fails is
    /// the assembly-qualified binding attempted.
    #[instrument(skip(self))]
    pub async fn slider_move(&self, slider_id: &str, value: f64) -> Result<()> {
        let element = self.lookup_enabled(slider_id).await?;

        debug!("SLIDER_MOVE: {} (ID: {}) -> {}", element.name, slider_id, value);

        let raw = value.to_string();
        let short_name = element
            .component_type
            .rsplit('.')
            .next()
            .unwrap_or(&element.component_type);

        let primary = element
            .handle
            .set_component_property(short_name, "value", None, &raw)
            .await;

        let primary_err = match primary {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        debug!(
            "Unqualified binding failed ({}), retrying with assembly",
            primary_err
        );

        element
            .handle
            .set_component_property(
                &element.component_type,
                "value",
                Some(&element.component_assembly),
                &raw,
            )
            .await
            .map_err(|qualified_err| {
                Error::property_set(format!(
                    "value on '{}': unqualified binding: {}; qualified binding: {}",
                    element.name, primary_err, qualified_err
                ))
            })
    }

    /// Swipe between two device points with phased touch events
    ///
    /// Each phase pauses for the configured settle delay so the application's
    /// physics loop registers the intermediate touch positions; the touch is
    /// held at the end point for at least the requested duration.
    #[instrument(skip(self))]
    pub async fn swipe(&self, x1: i64, y1: i64, x2: i64, y2: i64, duration: f64) -> Result<()> {
        let settle = secs(self.tuning.swipe_settle_seconds);

        debug!(
            "SWIPE: ({}, {}) -> ({}, {}) over {}s",
            x1, y1, x2, y2, duration
        );

        let finger = self
            .driver
            .begin_touch(x1, y1)
            .await
            .map_err(|e| Error::swipe_execution(format!("begin phase: {}", e)))?;

        tokio::time::sleep(settle).await;

        self.driver
            .move_touch(finger, x1 + SWIPE_NUDGE, y1 + SWIPE_NUDGE)
            .await
            .map_err(|e| Error::swipe_execution(format!("nudge phase: {}", e)))?;

        tokio::time::sleep(settle).await;

        self.driver
            .move_touch(finger, x2, y2)
            .await
            .map_err(|e| Error::swipe_execution(format!("move phase: {}", e)))?;

        tokio::time::sleep(settle.max(secs(duration))).await;

        self.driver
            .end_touch(finger)
            .await
            .map_err(|e| Error::swipe_execution(format!("end phase: {}", e)))
    }

    /// Pure suspension with no driver interaction
    #[instrument(skip(self))]
    pub async fn wait(&self, duration: f64) -> Result<()> {
        debug!("WAIT: {}s", duration);
        tokio::time::sleep(secs(duration)).await;
        Ok(())
    }

    /// Release every reset key, regardless of what the batch used
    pub async fn release_all_keys(&self) -> Result<()> {
        for key in RESET_KEYS {
            self.driver.key_up(key).await?;
        }
        Ok(())
    }

    /// Ensure a snapshot exists and fetch an enabled element from it
    async fn lookup_enabled(&self, id: &str) -> Result<InteractiveElement> {
        self.cache.extract(false).await?;

        let element = self
            .cache
            .lookup(id)
            .await
            .ok_or_else(|| Error::element_not_found(id))?;

        if !element.enabled {
            return Err(Error::element_disabled(&element.name));
        }

        Ok(element)
    }
}
