//! Frame and time bridge helpers
//!
//! Thin wrappers over the driver's scene-method capability: querying the
//! frame controller the game exposes for pacing, and pausing/resuming the
//! simulation through the engine's time scale.

use crate::driver::traits::GameDriver;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default name of the scene object (and component) driving frame stepping
const DEFAULT_FRAME_CONTROLLER: &str = "FrameController";

/// Assembly holding game scripts
const GAME_ASSEMBLY: &str = "Assembly-CSharp";

/// Bridge to the game's frame controller component
pub struct FrameBridge {
    driver: Arc<dyn GameDriver>,
    controller: String,
}

impl FrameBridge {
    /// Create a bridge against the default controller object
    pub fn new(driver: Arc<dyn GameDriver>) -> Self {
        Self::with_controller(driver, DEFAULT_FRAME_CONTROLLER)
    }

    /// Create a bridge against a custom controller object
    pub fn with_controller<S: Into<String>>(driver: Arc<dyn GameDriver>, controller: S) -> Self {
        Self {
            driver,
            controller: controller.into(),
        }
    }

    /// Current frame count reported by the controller
    #[instrument(skip(self))]
    pub async fn current_frame(&self) -> Result<i64> {
        let raw = self
            .driver
            .call_component_method(
                &self.controller,
                &self.controller,
                "GetCurrentFrame",
                GAME_ASSEMBLY,
                &[],
            )
            .await?;

        raw.trim()
            .parse()
            .map_err(|_| Error::driver(format!("non-numeric frame count: {}", raw)))
    }

    /// Resume a game paused by the controller
    #[instrument(skip(self))]
    pub async fn resume(&self) -> Result<()> {
        debug!("Resuming via {}", self.controller);
        self.driver
            .call_component_method(&self.controller, &self.controller, "Resume", GAME_ASSEMBLY, &[])
            .await
            .map(|_| ())
    }
}

/// Pause/resume control through the engine time scale
pub struct TimeControl {
    driver: Arc<dyn GameDriver>,
}

impl TimeControl {
    /// Create a new time control
    pub fn new(driver: Arc<dyn GameDriver>) -> Self {
        Self { driver }
    }

    /// Pause the game by zeroing the time scale
    pub async fn pause(&self) -> Result<()> {
        self.set_time_scale(0.0).await
    }

    /// Resume the game at normal speed
    pub async fn resume(&self) -> Result<()> {
        self.set_time_scale(1.0).await
    }

    /// Set the engine time scale (0 = paused, 1 = normal, >1 = faster)
    #[instrument(skip(self))]
    pub async fn set_time_scale(&self, scale: f64) -> Result<()> {
        self.driver
            .call_static_method(
                "UnityEngine.Time",
                "set_timeScale",
                "UnityEngine.CoreModule",
                &[scale.to_string()],
            )
            .await
            .map(|_| ())
    }
}
