//! Mock pose landmarks and the skeleton geometry used to draw them.
//!
//! Coordinates are pixels in a 640x480 frame. Nothing here is detected; the
//! skeleton is a fixed demo pose.

use serde::{Deserialize, Serialize};

/// A named 2-D keypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// A named edge between two landmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

/// A connection resolved to screen geometry: origin, length, and rotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub x: f64,
    pub y: f64,
    pub length: f64,
    /// Rotation about the origin in degrees, `atan2(dy, dx)`.
    pub angle_deg: f64,
}

const DEMO_POSE: [(&str, f64, f64); 15] = [
    ("nose", 320.0, 120.0),
    ("left_eye", 300.0, 110.0),
    ("right_eye", 340.0, 110.0),
    ("left_shoulder", 250.0, 200.0),
    ("right_shoulder", 390.0, 200.0),
    ("left_elbow", 200.0, 280.0),
    ("right_elbow", 440.0, 280.0),
    ("left_wrist", 220.0, 350.0),
    ("right_wrist", 420.0, 350.0),
    ("left_hip", 280.0, 320.0),
    ("right_hip", 360.0, 320.0),
    ("left_knee", 270.0, 420.0),
    ("right_knee", 370.0, 420.0),
    ("left_ankle", 260.0, 500.0),
    ("right_ankle", 380.0, 500.0),
];

const DEMO_BONES: [(&str, &str); 15] = [
    ("left_eye", "right_eye"),
    ("nose", "left_eye"),
    ("nose", "right_eye"),
    ("left_shoulder", "right_shoulder"),
    ("left_shoulder", "left_elbow"),
    ("right_shoulder", "right_elbow"),
    ("left_elbow", "left_wrist"),
    ("right_elbow", "right_wrist"),
    ("left_shoulder", "left_hip"),
    ("right_shoulder", "right_hip"),
    ("left_hip", "right_hip"),
    ("left_hip", "left_knee"),
    ("right_hip", "right_knee"),
    ("left_knee", "left_ankle"),
    ("right_knee", "right_ankle"),
];

/// The fixed demo pose.
pub fn mock_skeleton() -> (Vec<Landmark>, Vec<Connection>) {
    let landmarks = DEMO_POSE
        .iter()
        .map(|&(id, x, y)| Landmark {
            id: id.to_string(),
            x,
            y,
        })
        .collect();
    let connections = DEMO_BONES
        .iter()
        .map(|&(from, to)| Connection {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect();
    (landmarks, connections)
}

/// Resolve connections to segments. Connections naming an unknown landmark are skipped.
pub fn segments(landmarks: &[Landmark], connections: &[Connection]) -> Vec<Segment> {
    let find = |id: &str| landmarks.iter().find(|l| l.id == id);
    connections
        .iter()
        .filter_map(|c| {
            let (a, b) = (find(&c.from)?, find(&c.to)?);
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            Some(Segment {
                from: c.from.clone(),
                to: c.to.clone(),
                x: a.x,
                y: a.y,
                length: dx.hypot(dy),
                angle_deg: dy.atan2(dx).to_degrees(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(id: &str, x: f64, y: f64) -> Landmark {
        Landmark {
            id: id.to_string(),
            x,
            y,
        }
    }

    fn edge(from: &str, to: &str) -> Connection {
        Connection {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn demo_skeleton_resolves_every_bone() {
        let (landmarks, connections) = mock_skeleton();
        assert_eq!(landmarks.len(), 15);
        assert_eq!(segments(&landmarks, &connections).len(), 15);
    }

    #[test]
    fn shoulder_line_is_horizontal() {
        let (landmarks, connections) = mock_skeleton();
        let segs = segments(&landmarks, &connections);
        let shoulders = segs
            .iter()
            .find(|s| s.from == "left_shoulder" && s.to == "right_shoulder")
            .expect("shoulder segment");
        assert_eq!(shoulders.length, 140.0);
        assert_eq!(shoulders.angle_deg, 0.0);
        assert_eq!((shoulders.x, shoulders.y), (250.0, 200.0));
    }

    #[test]
    fn length_and_angle_follow_atan2() {
        let segs = segments(&[lm("a", 0.0, 0.0), lm("b", 3.0, 4.0)], &[edge("a", "b")]);
        assert!((segs[0].length - 5.0).abs() < 1e-12);
        assert!((segs[0].angle_deg - 53.130_102_354_155_98).abs() < 1e-9);

        let up = segments(&[lm("a", 0.0, 0.0), lm("b", 0.0, -2.0)], &[edge("a", "b")]);
        assert!((up[0].angle_deg + 90.0).abs() < 1e-12);
    }

    #[test]
    fn dangling_connections_are_skipped() {
        let segs = segments(&[lm("a", 0.0, 0.0)], &[edge("a", "ghost"), edge("ghost", "a")]);
        assert!(segs.is_empty());
    }
}
