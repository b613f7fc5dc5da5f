//! Finger Angle Classification
//!
//! Computes one open/closed bit per finger from the angle at the finger's
//! middle joint.
//!
//! # Angle Convention
//!
//! For a joint triple (tip, pip, base) the classifier forms the vectors
//! `tip - pip` and `base - pip` and takes the difference of their polar
//! angles:
//!
//! ```text
//! raw   = atan2(base - pip) - atan2(tip - pip)      (degrees)
//! angle = |raw|,  reflected to 360 - |raw| when above 180
//! ```
//!
//! The result is the interior angle in [0, 180]. A straight finger reads
//! close to 180, a fully curled one close to 0. A finger is open when its
//! angle is strictly greater than the configured threshold.
//!
//! Because the interior angle ignores rotation direction, the reading is the
//! same when tip and base are swapped and when the camera image is mirrored.

use tracing::trace;

use crate::engine::error::ConfigError;
use crate::gesture::landmark::{FingerSet, JointTriple, Landmark};
use crate::gesture::resolver::GestureVector;

/// Fold a raw angle difference (degrees) into the interior angle in [0, 180]
pub fn interior_angle(raw_degrees: f64) -> f64 {
    let angle = raw_degrees.abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Interior angle at `pip` between `tip` and `base`, in degrees
///
/// Returns `None` when either arm has zero length; the angle is undefined
/// there and callers treat the finger as closed.
pub fn joint_angle(tip: Landmark, pip: Landmark, base: Landmark) -> Option<f64> {
    let (tip_dx, tip_dy) = (tip.x - pip.x, tip.y - pip.y);
    let (base_dx, base_dy) = (base.x - pip.x, base.y - pip.y);

    if (tip_dx == 0.0 && tip_dy == 0.0) || (base_dx == 0.0 && base_dy == 0.0) {
        return None;
    }

    let raw = base_dy.atan2(base_dx) - tip_dy.atan2(tip_dx);
    Some(interior_angle(raw.to_degrees()))
}

/// Open/closed decision for one measured angle
pub fn is_open(angle: f64, open_angle: f64) -> bool {
    angle > open_angle
}

/// Classifier for one hand: a finger set plus its open-angle threshold
#[derive(Debug, Clone, PartialEq)]
pub struct AngleClassifier {
    fingers: FingerSet,
    open_angle: f64,
}

impl AngleClassifier {
    /// Create a classifier; the threshold must lie strictly within (0, 180)
    pub fn new(fingers: FingerSet, open_angle: f64) -> Result<Self, ConfigError> {
        if !(open_angle > 0.0 && open_angle < 180.0) {
            return Err(ConfigError::ThresholdOutOfRange(open_angle));
        }

        Ok(Self {
            fingers,
            open_angle,
        })
    }

    /// Finger set in bit order
    pub fn fingers(&self) -> &FingerSet {
        &self.fingers
    }

    /// Open-angle threshold in degrees
    pub fn open_angle(&self) -> f64 {
        self.open_angle
    }

    /// Measured angle for every finger, `None` where undefined
    pub fn angles(&self, landmarks: &[Landmark]) -> Vec<Option<f64>> {
        self.fingers
            .joints()
            .iter()
            .map(|joints| Self::measure(joints, landmarks))
            .collect()
    }

    /// Gesture vector for one hand's pixel-space landmarks
    pub fn classify(&self, landmarks: &[Landmark]) -> GestureVector {
        let bits = self
            .fingers
            .joints()
            .iter()
            .map(|joints| match Self::measure(joints, landmarks) {
                Some(angle) => is_open(angle, self.open_angle),
                None => {
                    trace!("Degenerate joint triple {:?}, treating finger as closed", joints);
                    false
                }
            })
            .collect();

        GestureVector::new(bits)
    }

    fn measure(joints: &JointTriple, landmarks: &[Landmark]) -> Option<f64> {
        let tip = landmarks.get(joints.tip)?;
        let pip = landmarks.get(joints.pip)?;
        let base = landmarks.get(joints.base)?;
        let angle = joint_angle(*tip, *pip, *base)?;
        trace!("Joint {:?}: {:.1} deg", joints, angle);
        Some(angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmark::{Finger, LANDMARK_COUNT};

    /// Point at `degrees` (screen-space polar angle) and `radius` from `origin`
    fn polar(origin: Landmark, degrees: f64, radius: f64) -> Landmark {
        let r = degrees.to_radians();
        Landmark::new(origin.x + radius * r.cos(), origin.y + radius * r.sin())
    }

    /// A hand whose four fingers (index..pinky) bend at the given angles
    fn hand_with_angles(angles: [f64; 4]) -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.0, 0.0); LANDMARK_COUNT];
        let wrist = Landmark::new(300.0, 400.0);
        landmarks[0] = wrist;

        let fingers = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
        for (i, (finger, angle)) in fingers.iter().zip(angles).enumerate() {
            let joints = finger.joints();
            let pip = Landmark::new(240.0 + 40.0 * i as f64, 250.0);
            // Direction from pip back to the wrist, then rotate the tip by `angle`.
            let to_base = (wrist.y - pip.y).atan2(wrist.x - pip.x).to_degrees();
            landmarks[joints.pip] = pip;
            landmarks[joints.tip] = polar(pip, to_base - angle, 60.0);
        }

        landmarks
    }

    fn four_finger_classifier(threshold: f64) -> AngleClassifier {
        AngleClassifier::new(FingerSet::four_fingers(), threshold).unwrap()
    }

    #[test]
    fn test_interior_angle_reflex_correction() {
        assert_eq!(interior_angle(200.0), 160.0);
        assert_eq!(interior_angle(350.0), 10.0);
        assert_eq!(interior_angle(-200.0), 160.0);
        assert_eq!(interior_angle(90.0), 90.0);
        assert_eq!(interior_angle(180.0), 180.0);
    }

    #[test]
    fn test_joint_angle_straight_and_folded() {
        let pip = Landmark::new(0.0, 0.0);
        let straight = joint_angle(Landmark::new(0.0, -10.0), pip, Landmark::new(0.0, 10.0));
        assert!((straight.unwrap() - 180.0).abs() < 1e-9);

        let right = joint_angle(Landmark::new(10.0, 0.0), pip, Landmark::new(0.0, 10.0));
        assert!((right.unwrap() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_joint_angle_reflex_geometry() {
        // base at 100 deg, tip at -100 deg: raw difference 200 deg
        let pip = Landmark::new(50.0, 50.0);
        let base = polar(pip, 100.0, 20.0);
        let tip = polar(pip, -100.0, 20.0);
        assert!((joint_angle(tip, pip, base).unwrap() - 160.0).abs() < 1e-9);

        // base at 175 deg, tip at -175 deg: raw difference 350 deg
        let base = polar(pip, 175.0, 20.0);
        let tip = polar(pip, -175.0, 20.0);
        assert!((joint_angle(tip, pip, base).unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_triple_is_closed() {
        let pip = Landmark::new(5.0, 5.0);
        assert_eq!(joint_angle(pip, pip, Landmark::new(0.0, 0.0)), None);

        let mut landmarks = hand_with_angles([170.0, 170.0, 170.0, 170.0]);
        landmarks[8] = landmarks[6];
        let vector = four_finger_classifier(100.0).classify(&landmarks);
        assert_eq!(vector, GestureVector::from([0, 1, 1, 1]));
    }

    #[test]
    fn test_threshold_must_be_open_interval() {
        for bad in [0.0, 180.0, -5.0, 200.0, f64::NAN] {
            assert!(matches!(
                AngleClassifier::new(FingerSet::four_fingers(), bad),
                Err(ConfigError::ThresholdOutOfRange(_))
            ));
        }
        assert!(AngleClassifier::new(FingerSet::four_fingers(), 0.5).is_ok());
        assert!(AngleClassifier::new(FingerSet::four_fingers(), 179.5).is_ok());
    }

    #[test]
    fn test_classify_scroll_down_pose() {
        let landmarks = hand_with_angles([150.0, 160.0, 40.0, 30.0]);
        let classifier = four_finger_classifier(100.0);

        let angles = classifier.angles(&landmarks);
        for (measured, expected) in angles.iter().zip([150.0, 160.0, 40.0, 30.0]) {
            assert!((measured.unwrap() - expected).abs() < 1e-6);
        }

        assert_eq!(classifier.classify(&landmarks), GestureVector::from([1, 1, 0, 0]));
    }

    #[test]
    fn test_classify_open_hand() {
        let landmarks = hand_with_angles([170.0, 165.0, 160.0, 155.0]);
        assert_eq!(
            four_finger_classifier(100.0).classify(&landmarks),
            GestureVector::from([1, 1, 1, 1])
        );
    }

    #[test]
    fn test_angle_equal_to_threshold_is_closed() {
        assert!(!is_open(100.0, 100.0));
        assert!(is_open(100.0001, 100.0));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let landmarks = hand_with_angles([120.0, 80.0, 140.0, 20.0]);
        let classifier = four_finger_classifier(100.0);
        let first = classifier.classify(&landmarks);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&landmarks), first);
        }
    }
}
