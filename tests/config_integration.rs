mod common;

use std::io::Write;
use std::time::{Duration, Instant};

use common::{hand, CENTER, FIST};
use lamco_hand_pointer::config::Config;
use lamco_hand_pointer::engine::{ConfigError, FrameController};
use lamco_hand_pointer::gesture::Handedness;
use lamco_hand_pointer::pointer::{MouseButton, PointerEffect, RecordingBackend};
use lamco_hand_pointer::utils::format_user_error;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
        [cursor]
        movement_speed = 2.0
        scroll_speed = 5
        pause_ms = 100
        screen_width = 2560
        screen_height = 1440

        [capture]
        width = 640
        height = 480

        [capture.tracking_region]
        left = 100.0
        top = 100.0
        right = 540.0
        bottom = 380.0

        [hands.right]
        fingers = ["index", "middle", "ring", "pinky"]
        open_angle = 120.0
        anchor = 0
        pause_ms = 50

        [hands.right.actions]
        "1111" = "move"
        "0000" = "DOUBLE_CLICK"

        [logging]
        level = "debug"
        "#,
    );

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.cursor.scroll_speed, 5);
    assert!(config.hands.left.is_none());
    assert_eq!(config.logging.level, "debug");

    let engine = config.to_engine_config().unwrap();
    assert_eq!(engine.screen().width, 2560);
    assert_eq!(engine.region().width(), 440.0);
    assert_eq!(engine.movement_speed(), 2.0);

    let right = engine.hand(Handedness::Right).unwrap();
    assert_eq!(right.pause(), Duration::from_millis(50));
    assert_eq!(right.anchor(), 0);
    assert_eq!(right.classifier().open_angle(), 120.0);
    assert!(engine.hand(Handedness::Left).is_none());
}

#[test]
fn test_loaded_config_drives_engine() {
    let file = write_config(
        r#"
        [hands.left]
        [hands.left.actions]
        "0000" = "scroll_up"
        "#,
    );

    let config = Config::load(file.path()).unwrap();
    let mut engine = FrameController::new(config.to_engine_config().unwrap()).unwrap();
    let mut backend = RecordingBackend::new();

    engine.process_frame(
        &[
            hand(Handedness::Right, FIST, CENTER),
            hand(Handedness::Left, FIST, CENTER),
        ],
        Instant::now(),
        &mut backend,
    );

    // Right hand is not configured in this file and is ignored.
    assert_eq!(backend.effects(), &[PointerEffect::Scroll { clicks: 20 }]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = Config::load(dir.path().join("missing.toml"));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_invalid_toml() {
    let file = write_config("[cursor\nmovement_speed = ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    assert!(format_user_error(&err).contains("Configuration Syntax Error"));
}

#[test]
fn test_load_rejects_invalid_gesture_table() {
    let file = write_config(
        r#"
        [hands.right]
        open_angle = 100.0

        [hands.right.actions]
        "11111" = "move"
        "#,
    );

    let err = Config::load(file.path()).unwrap_err();
    let config_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ConfigError>())
        .unwrap();
    assert!(matches!(
        config_error,
        ConfigError::InHand {
            hand: Handedness::Right,
            ..
        }
    ));
    assert!(format_user_error(&err).contains("Gesture Configuration Error"));
}

#[test]
fn test_load_rejects_bad_thresholds_and_indices() {
    for body in [
        "[hands.right]\nopen_angle = 180.0\n",
        "[hands.right]\nanchor = 21\n",
        "[hands.right]\nfingers = [[4, 2, 25]]\n",
        "[hands.right]\nfingers = []\n",
        "[hands.right.actions]\n\"11x1\" = \"move\"\n",
        "[cursor]\nmovement_speed = 0.0\n",
        "[cursor]\nscreen_width = 0\n",
        "[cursor]\nscroll_speed = 0\n",
        "[cursor]\nscroll_speed = -2147483648\n",
        "[capture.tracking_region]\nleft = 0.0\ntop = 0.0\nright = inf\nbottom = 480.0\n",
    ] {
        let file = write_config(body);
        assert!(Config::load(file.path()).is_err(), "accepted: {}", body);
    }
}

#[test]
fn test_default_config_round_trips_through_file() {
    let text = Config::default_config().to_toml_string().unwrap();
    let file = write_config(&text);

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config, Config::default_config());

    let mut engine = FrameController::new(config.to_engine_config().unwrap()).unwrap();
    let mut backend = RecordingBackend::new();
    engine.process_frame(
        &[hand(Handedness::Right, FIST, CENTER)],
        Instant::now(),
        &mut backend,
    );
    assert_eq!(
        backend.effects(),
        &[PointerEffect::Click {
            button: MouseButton::Left
        }]
    );
}

#[test]
fn test_huge_capture_size_builds_region() {
    let file = write_config("[capture]\nwidth = 4000000000\nheight = 720\n");

    let engine = Config::load(file.path()).unwrap().to_engine_config().unwrap();
    assert_eq!(engine.region().left, 800_000_000.0);
    assert_eq!(engine.region().right, 3_200_000_000.0);
}
