//! Interactive element data types and component classification

use crate::driver::traits::{Bounds, ElementHandle};
use crate::input::translate::translate;
use phf::phf_map;
use serde::Serialize;
use std::sync::Arc;

/// Category an element is offered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Buttons,
    Sliders,
    Interactable2d,
}

/// Static component classification using a compile-time hash map for O(1)
/// lookup without runtime allocation
static COMPONENT_CATEGORY: phf::Map<&'static str, ElementCategory> = phf_map! {
    "UnityEngine.UI.Button" => ElementCategory::Buttons,
    "UnityEngine.UI.Toggle" => ElementCategory::Buttons,
    "UnityEngine.EventSystems.EventTrigger" => ElementCategory::Buttons,
    "UnityEngine.UI.Slider" => ElementCategory::Sliders,
    "UnityEngine.BoxCollider2D" => ElementCategory::Interactable2d,
    "UnityEngine.CircleCollider2D" => ElementCategory::Interactable2d,
    "UnityEngine.PolygonCollider2D" => ElementCategory::Interactable2d,
};

/// Category for component types absent from the table, kept for backward
/// compatibility with callers that predate sliders and 2D interactables
const FALLBACK_CATEGORY: ElementCategory = ElementCategory::Buttons;

impl ElementCategory {
    /// Classify a component type name
    pub fn classify(component_type: &str) -> ElementCategory {
        COMPONENT_CATEGORY
            .get(component_type)
            .copied()
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

/// Value range of a slider element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub current: f64,
}

/// One discovered interactable element
///
/// The `handle` is a capability reference owned by the cache snapshot that
/// discovered it; it becomes invalid when that snapshot is replaced.
#[derive(Debug, Clone)]
pub struct InteractiveElement {
    /// Unique id within one extraction snapshot
    pub id: String,
    /// Object name
    pub name: String,
    /// Component type the element was discovered through
    pub component_type: String,
    /// Assembly of that component type, for qualified property bindings
    pub component_assembly: String,
    /// Application-space position, if readable
    pub app_position: Option<(f64, f64)>,
    /// Alternate (device-reported) vertical coordinate, if readable
    pub alt_y: Option<f64>,
    /// Device screen position; only set when a bounds context was available
    pub screen_position: Option<(i64, i64)>,
    /// Visible text, if any
    pub text: Option<String>,
    /// Whether the element accepts interaction
    pub enabled: bool,
    /// Populated for slider-typed elements only
    pub slider_range: Option<SliderRange>,
    /// Capability reference for issuing commands against this exact element
    pub handle: Arc<dyn ElementHandle>,
}

impl InteractiveElement {
    /// The category this element is offered under
    pub fn category(&self) -> ElementCategory {
        ElementCategory::classify(&self.component_type)
    }

    /// Serializable view of the element, enriched with a screen position when
    /// a bounds context and both coordinates are available
    pub fn summarize(&self, bounds: Option<&Bounds>) -> ElementSummary {
        let screen_position = match (bounds, self.app_position, self.alt_y) {
            (Some(bounds), Some((x, y)), Some(alt_y)) => Some(translate(x, y, alt_y, bounds)),
            _ => self.screen_position,
        };

        ElementSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            component_type: self.component_type.clone(),
            app_position: self.app_position,
            screen_position,
            text: self.text.clone(),
            enabled: self.enabled,
            slider_range: self.slider_range,
        }
    }
}

/// Serializable element view without the capability handle
#[derive(Debug, Clone, Serialize)]
pub struct ElementSummary {
    pub id: String,
    pub name: String,
    pub component_type: String,
    pub app_position: Option<(f64, f64)>,
    pub screen_position: Option<(i64, i64)>,
    pub text: Option<String>,
    pub enabled: bool,
    pub slider_range: Option<SliderRange>,
}

/// Keyboard availability, passed through from configuration
#[derive(Debug, Clone, Serialize)]
pub struct KeyboardActions {
    pub available_keys: Vec<String>,
}

/// Categorized view of everything the agent can currently do
#[derive(Debug, Clone, Serialize)]
pub struct AvailableActions {
    /// Present when keyboard input is enabled in configuration
    pub keyboard: Option<KeyboardActions>,
    pub buttons: Vec<ElementSummary>,
    pub sliders: Vec<ElementSummary>,
    pub interactable_2d: Vec<ElementSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_types() {
        assert_eq!(
            ElementCategory::classify("UnityEngine.UI.Button"),
            ElementCategory::Buttons
        );
        assert_eq!(
            ElementCategory::classify("UnityEngine.UI.Slider"),
            ElementCategory::Sliders
        );
        assert_eq!(
            ElementCategory::classify("UnityEngine.CircleCollider2D"),
            ElementCategory::Interactable2d
        );
    }

    #[test]
    fn test_classify_unknown_type_falls_back_to_buttons() {
        assert_eq!(
            ElementCategory::classify("Custom.Gameplay.LeverComponent"),
            ElementCategory::Buttons
        );
    }
}
