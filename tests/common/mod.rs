//! Synthetic hands for integration tests

#![allow(dead_code)]

use lamco_hand_pointer::config::Config;
use lamco_hand_pointer::engine::FrameController;
use lamco_hand_pointer::gesture::{Finger, HandObservation, Handedness, Landmark, LANDMARK_COUNT};

pub const FRAME_WIDTH: u32 = 1280;
pub const FRAME_HEIGHT: u32 = 720;

/// Center of the default tracking region; maps to the center of a 1920x1080 screen
pub const CENTER: (f64, f64) = (640.0, 360.0);

pub const OPEN: [f64; 4] = [170.0, 170.0, 170.0, 170.0];
pub const FIST: [f64; 4] = [30.0, 30.0, 30.0, 30.0];

fn polar(origin: Landmark, degrees: f64, radius: f64) -> Landmark {
    let r = degrees.to_radians();
    Landmark::new(origin.x + radius * r.cos(), origin.y + radius * r.sin())
}

/// Pixel-space hand whose index..pinky fingers bend at `angles`, with the
/// middle-finger knuckle (landmark 9) at `anchor`
pub fn pixel_hand(angles: [f64; 4], anchor: (f64, f64)) -> Vec<Landmark> {
    let (ax, ay) = anchor;
    let mut landmarks = vec![Landmark::new(ax, ay); LANDMARK_COUNT];
    let wrist = Landmark::new(ax, ay + 150.0);
    landmarks[0] = wrist;

    let fingers = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
    for (i, (finger, angle)) in fingers.iter().zip(angles).enumerate() {
        let joints = finger.joints();
        let pip = Landmark::new(ax - 60.0 + 40.0 * i as f64, ay - 50.0);
        let to_base = (wrist.y - pip.y).atan2(wrist.x - pip.x).to_degrees();
        landmarks[joints.pip] = pip;
        landmarks[joints.tip] = polar(pip, to_base - angle, 40.0);
    }

    landmarks
}

/// Normalized observation as the detector would report it
pub fn hand(handedness: Handedness, angles: [f64; 4], anchor: (f64, f64)) -> HandObservation {
    HandObservation::from_pixels(
        handedness,
        &pixel_hand(angles, anchor),
        FRAME_WIDTH,
        FRAME_HEIGHT,
    )
}

/// Engine with the default two-hand configuration
pub fn default_engine() -> FrameController {
    let config = Config::default_config().to_engine_config().unwrap();
    FrameController::new(config).unwrap()
}

pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
