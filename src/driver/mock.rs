//! Mock driver implementation for testing
//!
//! This module provides mock implementations of the driver traits for
//! development and testing. Every input primitive issued through the mock is
//! recorded in a shared call log so tests can assert on exact ordering.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{Bounds, BoundsProvider, ComponentDescriptor, ElementHandle, GameDriver};
use crate::input::keymap::KeyCode;
use crate::Error;

/// One recorded driver call
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    FindObjects(String),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    BeginTouch { x: i64, y: i64, finger: i32 },
    MoveTouch { finger: i32, x: i64, y: i64 },
    EndTouch { finger: i32 },
    Tap { id: String },
    SetProperty { id: String, key: String, value: String },
    ComponentMethod { object: String, method: String },
    StaticMethod { type_name: String, method: String, parameters: Vec<String> },
}

/// Mock game driver
///
/// Scripted with in-memory objects per component type; supports per-component
/// failure injection and counts discovery queries for cache tests.
#[derive(Debug)]
pub struct MockGameDriver {
    #[allow(dead_code)]
    id: String,
    objects: Mutex<HashMap<String, Vec<Arc<MockElementHandle>>>>,
    failing_components: Mutex<HashSet<String>>,
    method_results: Mutex<HashMap<String, String>>,
    calls: Arc<Mutex<Vec<DriverCall>>>,
    find_queries: AtomicU64,
    next_finger: AtomicI32,
}

impl MockGameDriver {
    /// Create a new mock game driver
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            objects: Mutex::new(HashMap::new()),
            failing_components: Mutex::new(HashSet::new()),
            method_results: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            find_queries: AtomicU64::new(0),
            next_finger: AtomicI32::new(0),
        }
    }

    /// Script an object for a component type
    ///
    /// The handle is attached to this driver's call log so taps and property
    /// sets show up interleaved with input primitives.
    pub fn add_object(&self, component_name: &str, mut handle: MockElementHandle) {
        handle.log = self.calls.clone();
        self.objects
            .lock()
            .unwrap()
            .entry(component_name.to_string())
            .or_default()
            .push(Arc::new(handle));
    }

    /// Make discovery fail for a component type
    pub fn fail_component(&self, component_name: &str) {
        self.failing_components
            .lock()
            .unwrap()
            .insert(component_name.to_string());
    }

    /// Script the result of a component or static method call
    ///
    /// The key is `"<object-or-type>::<method>"`.
    pub fn set_method_result(&self, key: &str, value: &str) {
        self.method_results
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Snapshot of every recorded call, in issue order
    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clear the recorded call log
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of `find_objects` queries issued so far
    pub fn find_query_count(&self) -> u64 {
        self.find_queries.load(Ordering::Relaxed)
    }

    fn record(&self, call: DriverCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockGameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameDriver for MockGameDriver {
    async fn find_objects(
        &self,
        descriptor: &ComponentDescriptor,
    ) -> Result<Vec<Arc<dyn ElementHandle>>, Error> {
        self.find_queries.fetch_add(1, Ordering::Relaxed);
        self.record(DriverCall::FindObjects(descriptor.component_name.clone()));

        if self
            .failing_components
            .lock()
            .unwrap()
            .contains(&descriptor.component_name)
        {
            return Err(Error::driver(format!(
                "Scripted failure for {}",
                descriptor.component_name
            )));
        }

        let objects = self.objects.lock().unwrap();
        Ok(objects
            .get(&descriptor.component_name)
            .map(|handles| {
                handles
                    .iter()
                    .map(|h| h.clone() as Arc<dyn ElementHandle>)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn key_down(&self, key: KeyCode) -> Result<(), Error> {
        self.record(DriverCall::KeyDown(key));
        Ok(())
    }

    async fn key_up(&self, key: KeyCode) -> Result<(), Error> {
        self.record(DriverCall::KeyUp(key));
        Ok(())
    }

    async fn begin_touch(&self, x: i64, y: i64) -> Result<i32, Error> {
        let finger = self.next_finger.fetch_add(1, Ordering::Relaxed) + 1;
        self.record(DriverCall::BeginTouch { x, y, finger });
        Ok(finger)
    }

    async fn move_touch(&self, finger: i32, x: i64, y: i64) -> Result<(), Error> {
        self.record(DriverCall::MoveTouch { finger, x, y });
        Ok(())
    }

    async fn end_touch(&self, finger: i32) -> Result<(), Error> {
        self.record(DriverCall::EndTouch { finger });
        Ok(())
    }

    async fn call_component_method(
        &self,
        object: &str,
        _component: &str,
        method: &str,
        _assembly: &str,
        _parameters: &[String],
    ) -> Result<String, Error> {
        self.record(DriverCall::ComponentMethod {
            object: object.to_string(),
            method: method.to_string(),
        });

        let key = format!("{}::{}", object, method);
        Ok(self
            .method_results
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn call_static_method(
        &self,
        type_name: &str,
        method: &str,
        _assembly: &str,
        parameters: &[String],
    ) -> Result<String, Error> {
        self.record(DriverCall::StaticMethod {
            type_name: type_name.to_string(),
            method: method.to_string(),
            parameters: parameters.to_vec(),
        });

        let key = format!("{}::{}", type_name, method);
        Ok(self
            .method_results
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock element handle
///
/// Fields left unset simulate attributes the driver cannot read: the matching
/// getter fails, and the cache is expected to treat the value as absent.
#[derive(Debug)]
pub struct MockElementHandle {
    id: String,
    name: Option<String>,
    position: Option<(f64, f64)>,
    alt_y: Option<f64>,
    enabled: Option<bool>,
    text: Option<String>,
    properties: Mutex<HashMap<String, String>>,
    failing_property_sets: HashSet<String>,
    fail_tap: bool,
    log: Arc<Mutex<Vec<DriverCall>>>,
}

fn property_key(component: &str, property: &str, assembly: Option<&str>) -> String {
    match assembly {
        Some(assembly) => format!("{}.{}@{}", component, property, assembly),
        None => format!("{}.{}", component, property),
    }
}

impl MockElementHandle {
    /// Create a new mock element handle with a fixed id
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            name: None,
            position: None,
            alt_y: None,
            enabled: Some(true),
            text: None,
            properties: Mutex::new(HashMap::new()),
            failing_property_sets: HashSet::new(),
            fail_tap: false,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a new mock element handle with a generated id
    pub fn anonymous() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn with_alt_y(mut self, alt_y: f64) -> Self {
        self.alt_y = Some(alt_y);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Make the enabled attribute unreadable
    pub fn with_unreadable_enabled(mut self) -> Self {
        self.enabled = None;
        self
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Script a readable component property
    pub fn with_property(self, component: &str, property: &str, assembly: Option<&str>, value: &str) -> Self {
        self.properties
            .lock()
            .unwrap()
            .insert(property_key(component, property, assembly), value.to_string());
        self
    }

    /// Make a specific property binding reject writes
    pub fn with_failing_property_set(mut self, component: &str, property: &str, assembly: Option<&str>) -> Self {
        self.failing_property_sets
            .insert(property_key(component, property, assembly));
        self
    }

    /// Make taps fail
    pub fn with_failing_tap(mut self) -> Self {
        self.fail_tap = true;
        self
    }

    /// Read back a property value written through the handle
    pub fn property(&self, component: &str, property: &str, assembly: Option<&str>) -> Option<String> {
        self.properties
            .lock()
            .unwrap()
            .get(&property_key(component, property, assembly))
            .cloned()
    }

    fn record(&self, call: DriverCall) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ElementHandle for MockElementHandle {
    fn id(&self) -> &str {
        &self.id
    }

    async fn name(&self) -> Result<String, Error> {
        self.name
            .clone()
            .ok_or_else(|| Error::driver("name unavailable"))
    }

    async fn position(&self) -> Result<(f64, f64), Error> {
        self.position
            .ok_or_else(|| Error::driver("position unavailable"))
    }

    async fn alt_y(&self) -> Result<f64, Error> {
        self.alt_y.ok_or_else(|| Error::driver("alt_y unavailable"))
    }

    async fn enabled(&self) -> Result<bool, Error> {
        self.enabled
            .ok_or_else(|| Error::driver("enabled unavailable"))
    }

    async fn text(&self) -> Result<String, Error> {
        self.text
            .clone()
            .ok_or_else(|| Error::driver("text unavailable"))
    }

    async fn get_component_property(
        &self,
        component: &str,
        property: &str,
        assembly: Option<&str>,
    ) -> Result<String, Error> {
        self.properties
            .lock()
            .unwrap()
            .get(&property_key(component, property, assembly))
            .cloned()
            .ok_or_else(|| {
                Error::driver(format!(
                    "property {} unavailable",
                    property_key(component, property, assembly)
                ))
            })
    }

    async fn set_component_property(
        &self,
        component: &str,
        property: &str,
        assembly: Option<&str>,
        value: &str,
    ) -> Result<(), Error> {
        let key = property_key(component, property, assembly);

        if self.failing_property_sets.contains(&key) {
            return Err(Error::driver(format!("property {} not settable", key)));
        }

        self.properties
            .lock()
            .unwrap()
            .insert(key.clone(), value.to_string());
        self.record(DriverCall::SetProperty {
            id: self.id.clone(),
            key,
            value: value.to_string(),
        });
        Ok(())
    }

    async fn tap(&self) -> Result<(), Error> {
        if self.fail_tap {
            return Err(Error::driver(format!("tap on {} rejected", self.id)));
        }

        self.record(DriverCall::Tap {
            id: self.id.clone(),
        });
        Ok(())
    }
}

/// Mock bounds provider
#[derive(Debug, Default)]
pub struct MockBoundsProvider {
    bounds: Mutex<Option<Bounds>>,
}

impl MockBoundsProvider {
    /// Create a provider with nothing to report
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that reports the given bounds
    pub fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Mutex::new(Some(bounds)),
        }
    }

    /// Replace the reported bounds
    pub fn set_bounds(&self, bounds: Option<Bounds>) {
        *self.bounds.lock().unwrap() = bounds;
    }
}

#[async_trait]
impl BoundsProvider for MockBoundsProvider {
    async fn current_bounds(&self) -> Result<Option<Bounds>, Error> {
        Ok(self.bounds.lock().unwrap().clone())
    }
}
