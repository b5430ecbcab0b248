//! End-to-end batch execution over the mock driver
//!
//! Wires configuration, cache, executor, and scheduler together the way an
//! embedding service would, and verifies the full decision-to-input flow.

use pilot_oxide::actions::{ActionExecutor, ActionScheduler, BatchStatus, RawAction};
use pilot_oxide::config::Config;
use pilot_oxide::driver::mock::{DriverCall, MockBoundsProvider, MockElementHandle, MockGameDriver};
use pilot_oxide::driver::traits::{Bounds, BoundsProvider, Rotation};
use pilot_oxide::elements::ElementCache;
use pilot_oxide::input::KeyCode;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

const CONFIG_TOML: &str = r#"
[input_types.keyboard]
enabled = true
available_keys = ["Space", "A", "D"]

[input_types.buttons]
enabled = true
cache_ttl_seconds = 5.0

[[element_extraction.components]]
component_name = "UnityEngine.UI.Button"
assembly = "UnityEngine.UI"

[[element_extraction.components]]
component_name = "UnityEngine.UI.Slider"
assembly = "UnityEngine.UI"

[actions]
swipe_settle_seconds = 0.0
"#;

fn scripted_driver() -> Arc<MockGameDriver> {
    let driver = Arc::new(MockGameDriver::new());
    driver.add_object(
        "UnityEngine.UI.Button",
        MockElementHandle::new("btn-start")
            .with_name("StartButton")
            .with_position(100.0, 40.0)
            .with_alt_y(62.0)
            .with_text("Start"),
    );
    driver.add_object(
        "UnityEngine.UI.Slider",
        MockElementHandle::new("sld-volume")
            .with_name("VolumeSlider")
            .with_position(220.0, 80.0)
            .with_alt_y(95.0)
            .with_property("Slider", "minValue", None, "0")
            .with_property("Slider", "maxValue", None, "1")
            .with_property("Slider", "value", None, "0.5"),
    );
    driver
}

fn build_stack(driver: Arc<MockGameDriver>) -> (Arc<ElementCache>, Arc<ActionScheduler>) {
    let config = Config::from_toml_str(CONFIG_TOML).unwrap();
    let cache = Arc::new(ElementCache::new(driver.clone(), config.clone()));
    let executor = Arc::new(ActionExecutor::new(driver, cache.clone(), config.actions));
    let scheduler = Arc::new(ActionScheduler::new(executor));
    (cache, scheduler)
}

#[tokio::test]
async fn test_scan_then_execute_batch() {
    init_tracing();

    let driver = scripted_driver();
    let (cache, scheduler) = build_stack(driver.clone());

    // The embedding service fetches bounds from its device bridge first
    let provider =
        MockBoundsProvider::with_bounds(Bounds::from_rect(0, 60, 1080, 2340, Rotation::Portrait));
    let bounds = provider.current_bounds().await.unwrap();

    let available = cache
        .get_available_actions(bounds.as_ref())
        .await
        .unwrap();

    assert_eq!(available.keyboard.unwrap().available_keys, vec!["Space", "A", "D"]);
    assert_eq!(available.buttons.len(), 1);
    assert_eq!(available.sliders.len(), 1);
    assert_eq!(available.buttons[0].screen_position, Some((100, 122)));
    assert_eq!(available.sliders[0].slider_range.unwrap().current, 0.5);

    // The decision-maker answers with a mixed batch, mapping-style JSON
    let batch: Vec<RawAction> = serde_json::from_value(serde_json::json!([
        {"type": "key_press", "key": "Space", "duration": 0.0, "reason": "jump"},
        {"type": "button_press", "button_id": "btn-start"},
        {"type": "slider_move", "slider_id": "sld-volume", "value": 0.9},
        {"type": "wait", "duration": 0.0}
    ]))
    .unwrap();

    let outcomes = scheduler.execute_batch(batch).await;

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.iter().all(|o| o.is_completed()));

    let calls = driver.calls();
    assert!(calls
        .iter()
        .any(|c| matches!(c, DriverCall::Tap { id } if id == "btn-start")));
    assert!(calls
        .iter()
        .any(|c| matches!(c, DriverCall::KeyDown(KeyCode::Space))));
    assert!(calls.iter().any(|c| matches!(
        c,
        DriverCall::SetProperty { id, value, .. } if id == "sld-volume" && value == "0.9"
    )));
}

#[tokio::test]
async fn test_ordered_batch_degrades_without_aborting() {
    init_tracing();

    let driver = scripted_driver();
    let (_cache, scheduler) = build_stack(driver.clone());

    let batch: Vec<RawAction> = serde_json::from_value(serde_json::json!([
        {"action_type": "button_press", "button_id": "no-such-button"},
        {"action_type": "warp_drive"},
        {"action_type": "swipe", "x1": 10, "y1": 20, "x2": 30, "y2": 40, "duration": 0.0},
        {"action_type": "key_press", "key_name": "D", "duration": 0.0}
    ]))
    .unwrap();

    let outcomes = scheduler.execute_batch_ordered(batch).await;

    assert_eq!(outcomes.len(), 4);
    assert!(matches!(outcomes[0].status, BatchStatus::Failed(_)));
    assert!(matches!(outcomes[1].status, BatchStatus::Skipped(_)));
    assert!(outcomes[2].is_completed());
    assert!(outcomes[3].is_completed());

    // Later actions really executed despite the earlier failures
    let calls = driver.calls();
    assert!(calls
        .iter()
        .any(|c| matches!(c, DriverCall::BeginTouch { x: 10, y: 20, .. })));
    assert!(calls
        .iter()
        .any(|c| matches!(c, DriverCall::KeyDown(KeyCode::D))));
}

#[tokio::test]
async fn test_invalidate_picks_up_new_elements() {
    init_tracing();

    let driver = scripted_driver();
    let (cache, _scheduler) = build_stack(driver.clone());

    let first = cache.extract(false).await.unwrap();
    assert_eq!(first.len(), 2);

    // A new screen appears; within the TTL the stale snapshot would be served
    driver.add_object(
        "UnityEngine.UI.Button",
        MockElementHandle::new("btn-quit").with_name("QuitButton"),
    );
    assert_eq!(cache.extract(false).await.unwrap().len(), 2);

    cache.invalidate().await;

    let refreshed = cache.extract(false).await.unwrap();
    assert_eq!(refreshed.len(), 3);
    assert!(refreshed.iter().any(|e| e.id == "btn-quit"));
}
