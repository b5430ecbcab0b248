//! Game driver layer traits
//!
//! This module defines the abstract interfaces for communicating with a live
//! game instance. The core consumes these capabilities; the concrete transport
//! lives outside this crate.

use crate::input::keymap::KeyCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A component type to query during object discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Fully qualified component type name (e.g. "UnityEngine.UI.Button")
    pub component_name: String,
    /// Assembly the component lives in
    pub assembly: String,
}

impl ComponentDescriptor {
    /// Create a new component descriptor
    pub fn new<S: Into<String>>(component_name: S, assembly: S) -> Self {
        Self {
            component_name: component_name.into(),
            assembly: assembly.into(),
        }
    }
}

/// Device rotation code
///
/// Codes follow the device convention: 0 = portrait, 1 = 90°, 2 = 180°,
/// 3 = 270°. Unknown codes resolve to [`Rotation::Portrait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Portrait,
    Landscape,
    PortraitFlipped,
    LandscapeFlipped,
}

impl Rotation {
    /// Resolve a raw rotation code; anything outside 0..=3 is treated as 0
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Rotation::Landscape,
            2 => Rotation::PortraitFlipped,
            3 => Rotation::LandscapeFlipped,
            _ => Rotation::Portrait,
        }
    }

    /// Resolve a rotation reported in degrees; unknown values are treated as 0
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            90 => Rotation::Landscape,
            180 => Rotation::PortraitFlipped,
            270 => Rotation::LandscapeFlipped,
            _ => Rotation::Portrait,
        }
    }

    /// The numeric rotation code
    pub fn code(&self) -> i32 {
        match self {
            Rotation::Portrait => 0,
            Rotation::Landscape => 1,
            Rotation::PortraitFlipped => 2,
            Rotation::LandscapeFlipped => 3,
        }
    }
}

/// The application's on-screen rectangle plus rotation
///
/// A snapshot fetched per need, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub width: i64,
    pub height: i64,
    pub offset_x: i64,
    pub offset_y: i64,
    pub rotation: Rotation,
}

impl Bounds {
    /// Build bounds from the raw device rectangle, deriving size and offsets
    pub fn from_rect(left: i64, top: i64, right: i64, bottom: i64, rotation: Rotation) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
            offset_x: left,
            offset_y: top,
            rotation,
        }
    }
}

/// Game driver trait
///
/// The abstract capability the core issues commands through: object discovery,
/// keyboard and touch primitives, and scene component method calls.
#[async_trait]
pub trait GameDriver: Send + Sync + std::fmt::Debug {
    /// Find all scene objects carrying the given component type
    async fn find_objects(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> Result<Vec<Arc<dyn ElementHandle>>, crate::Error>;

    /// Press a key down
    async fn key_down(&self, key: KeyCode) -> Result<(), crate::Error>;

    /// Release a key
    async fn key_up(&self, key: KeyCode) -> Result<(), crate::Error>;

    /// Begin a touch at device coordinates, returning a finger id
    async fn begin_touch(&self, x: i64, y: i64) -> Result<i32, crate::Error>;

    /// Move an active touch to new device coordinates
    async fn move_touch(&self, finger: i32, x: i64, y: i64) -> Result<(), crate::Error>;

    /// End an active touch
    async fn end_touch(&self, finger: i32) -> Result<(), crate::Error>;

    /// Call a method on a component of a named scene object
    async fn call_component_method(
        &self,
        object: &str,
        component: &str,
        method: &str,
        assembly: &str,
        parameters: &[String],
    ) -> Result<String, crate::Error>;

    /// Call a static method on an engine type
    async fn call_static_method(
        &self,
        type_name: &str,
        method: &str,
        assembly: &str,
        parameters: &[String],
    ) -> Result<String, crate::Error>;
}

/// Element handle trait
///
/// A capability reference to one discovered scene object. Handles are owned by
/// the cache snapshot that discovered them and must not be used after that
/// snapshot is invalidated.
#[async_trait]
pub trait ElementHandle: Send + Sync + std::fmt::Debug {
    /// Unique object id within one extraction
    fn id(&self) -> &str;

    /// Object name
    async fn name(&self) -> Result<String, crate::Error>;

    /// Application-space position
    async fn position(&self) -> Result<(f64, f64), crate::Error>;

    /// Alternate (device-reported) vertical coordinate
    async fn alt_y(&self) -> Result<f64, crate::Error>;

    /// Whether the object is enabled
    async fn enabled(&self) -> Result<bool, crate::Error>;

    /// Visible text, if the object carries any
    async fn text(&self) -> Result<String, crate::Error>;

    /// Read a component property; `assembly` of `None` uses the unqualified binding
    async fn get_component_property(
        &self,
        component: &str,
        property: &str,
        assembly: Option<&str>,
    ) -> Result<String, crate::Error>;

    /// Set a component property; `assembly` of `None` uses the unqualified binding
    async fn set_component_property(
        &self,
        component: &str,
        property: &str,
        assembly: Option<&str>,
        value: &str,
    ) -> Result<(), crate::Error>;

    /// Tap the object
    async fn tap(&self) -> Result<(), crate::Error>;
}

/// Bounds provider trait
///
/// Reports the device rotation and the application's on-screen rectangle.
/// May legitimately have nothing to report (e.g. no device attached).
#[async_trait]
pub trait BoundsProvider: Send + Sync {
    /// Fetch the current bounds, or `None` when unavailable
    async fn current_bounds(&self) -> Result<Option<Bounds>, crate::Error>;
}
