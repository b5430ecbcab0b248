//! Element cache module
//!
//! Discovers interactable elements through the game driver and serves them
//! with TTL-based reuse. The snapshot and its id index are always replaced
//! together, never patched in place.

use crate::config::Config;
use crate::driver::traits::{Bounds, ComponentDescriptor, ElementHandle, GameDriver};
use crate::elements::types::{
    AvailableActions, ElementCategory, InteractiveElement, KeyboardActions, SliderRange,
};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// One extraction result, replaced wholesale on refresh
struct Snapshot {
    elements: Vec<InteractiveElement>,
    by_id: HashMap<String, usize>,
    fetched_at: Instant,
}

impl Snapshot {
    fn new(elements: Vec<InteractiveElement>) -> Self {
        let by_id = elements
            .iter()
            .enumerate()
            .map(|(index, element)| (element.id.clone(), index))
            .collect();

        Self {
            elements,
            by_id,
            fetched_at: Instant::now(),
        }
    }
}

/// Element cache
///
/// Owns element discovery and lookup for the executor. All mutation goes
/// through `extract` and `invalidate`.
pub struct ElementCache {
    driver: Arc<dyn GameDriver>,
    config: Config,
    snapshot: RwLock<Option<Snapshot>>,
}

impl ElementCache {
    /// Create a new element cache
    pub fn new(driver: Arc<dyn GameDriver>, config: Config) -> Self {
        Self {
            driver,
            config,
            snapshot: RwLock::new(None),
        }
    }

    /// Extract interactable elements, reusing the cached snapshot within the TTL
    ///
    /// A failing component query skips that component type only; extraction
    /// always yields whatever the remaining descriptors produced.
    #[instrument(skip(self))]
    pub async fn extract(&self, force_refresh: bool) -> Result<Vec<InteractiveElement>> {
        if !force_refresh {
            let ttl = self.config.input_types.buttons.cache_ttl_seconds;
            let guard = self.snapshot.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.fetched_at.elapsed().as_secs_f64() < ttl {
                    debug!("Using cached elements ({} elements)", snapshot.elements.len());
                    return Ok(snapshot.elements.clone());
                }
            }
        }

        debug!("Extracting interactive elements from game");

        let mut elements = Vec::new();
        for entry in &self.config.element_extraction.components {
            let descriptor =
                ComponentDescriptor::new(entry.component_name.clone(), entry.assembly.clone());

            let handles = match self.driver.find_objects(&descriptor).await {
                Ok(handles) => handles,
                Err(e) => {
                    warn!(
                        "Error searching for {}: {}",
                        descriptor.component_name, e
                    );
                    continue;
                }
            };

            debug!(
                "Found {} {} element(s)",
                handles.len(),
                descriptor.component_name
            );

            for handle in handles {
                elements.push(self.build_element(handle, &descriptor).await);
            }
        }

        // Deduplicate by id, first occurrence wins
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for element in elements {
            if seen.insert(element.id.clone()) {
                unique.push(element);
            }
        }

        debug!("Extracted {} unique interactive elements", unique.len());

        let mut guard = self.snapshot.write().await;
        *guard = Some(Snapshot::new(unique.clone()));

        Ok(unique)
    }

    /// Read one element by reading each attribute defensively
    ///
    /// Unreadable attributes are left absent; an element is never dropped for
    /// a missing field.
    async fn build_element(
        &self,
        handle: Arc<dyn ElementHandle>,
        descriptor: &ComponentDescriptor,
    ) -> InteractiveElement {
        let id = handle.id().to_string();
        let name = handle.name().await.unwrap_or_else(|_| "Unknown".to_string());
        let app_position = handle.position().await.ok();
        let alt_y = handle.alt_y().await.ok();
        let text = handle.text().await.ok();
        let enabled = handle.enabled().await.unwrap_or(true);

        let slider_range =
            if ElementCategory::classify(&descriptor.component_name) == ElementCategory::Sliders {
                self.read_slider_range(handle.as_ref(), descriptor).await
            } else {
                None
            };

        InteractiveElement {
            id,
            name,
            component_type: descriptor.component_name.clone(),
            component_assembly: descriptor.assembly.clone(),
            app_position,
            alt_y,
            screen_position: None,
            text,
            enabled,
            slider_range,
            handle,
        }
    }

    /// Read min/max/current from the slider component, all-or-absent
    ///
    /// Probes the unqualified short binding first and retries with the
    /// assembly-qualified one, the same order property writes use.
    async fn read_slider_range(
        &self,
        handle: &dyn ElementHandle,
        descriptor: &ComponentDescriptor,
    ) -> Option<SliderRange> {
        let short_name = descriptor
            .component_name
            .rsplit('.')
            .next()
            .unwrap_or(&descriptor.component_name);

        let mut values = [0.0f64; 3];
        for (slot, property) in values.iter_mut().zip(["minValue", "maxValue", "value"]) {
            let raw = match handle.get_component_property(short_name, property, None).await {
                Ok(raw) => raw,
                Err(_) => handle
                    .get_component_property(
                        &descriptor.component_name,
                        property,
                        Some(&descriptor.assembly),
                    )
                    .await
                    .ok()?,
            };
            *slot = raw.parse().ok()?;
        }

        Some(SliderRange {
            min: values[0],
            max: values[1],
            current: values[2],
        })
    }

    /// Look up a cached element by id
    pub async fn lookup(&self, id: &str) -> Option<InteractiveElement> {
        let guard = self.snapshot.read().await;
        let snapshot = guard.as_ref()?;
        snapshot
            .by_id
            .get(id)
            .map(|&index| snapshot.elements[index].clone())
    }

    /// Whether a snapshot currently exists
    pub async fn has_snapshot(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Categorized view of every action currently available to the agent
    ///
    /// Forces a fresh extraction. Keyboard availability is a static
    /// pass-through from configuration, not derived from the scan.
    #[instrument(skip(self, bounds))]
    pub async fn get_available_actions(&self, bounds: Option<&Bounds>) -> Result<AvailableActions> {
        let bounds = bounds.ok_or(Error::BoundsUnavailable)?;

        let elements = self.extract(true).await?;

        let keyboard = if self.config.input_types.keyboard.enabled {
            Some(KeyboardActions {
                available_keys: self.config.input_types.keyboard.available_keys.clone(),
            })
        } else {
            None
        };

        let mut actions = AvailableActions {
            keyboard,
            buttons: Vec::new(),
            sliders: Vec::new(),
            interactable_2d: Vec::new(),
        };

        for element in &elements {
            let summary = element.summarize(Some(bounds));
            match element.category() {
                ElementCategory::Buttons if self.config.input_types.buttons.enabled => {
                    actions.buttons.push(summary)
                }
                ElementCategory::Sliders if self.config.input_types.sliders.enabled => {
                    actions.sliders.push(summary)
                }
                ElementCategory::Interactable2d
                    if self.config.input_types.interactable_2d.enabled =>
                {
                    actions.interactable_2d.push(summary)
                }
                _ => {}
            }
        }

        Ok(actions)
    }

    /// Clear the snapshot so the next extraction always refetches
    pub async fn invalidate(&self) {
        let mut guard = self.snapshot.write().await;
        *guard = None;
        debug!("Element cache invalidated");
    }
}
