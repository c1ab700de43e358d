//! KSL (Kitchen Scene Layout) parsing and serialization
//!
//! KSL is an XML-based format describing a showroom scene: pickable
//! fixtures carrying display metadata, plus untagged decor geometry.

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to parse KSL: {0}")]
    ParseError(String),
    #[error("Failed to serialize KSL: {0}")]
    SerializeError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Pose in 3D space (x, y, z, roll, pitch, yaw)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
}

impl Pose {
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
            roll: arr[3],
            pitch: arr[4],
            yaw: arr[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.roll, self.pitch, self.yaw]
    }
}

/// Parse a pose string "x y z roll pitch yaw" into a Pose struct
pub fn parse_pose_string(s: &str) -> Option<Pose> {
    let parts: Vec<f64> = s.split_whitespace()
        .filter_map(|p| p.parse().ok())
        .collect();
    if parts.len() == 6 {
        Some(Pose {
            x: parts[0],
            y: parts[1],
            z: parts[2],
            roll: parts[3],
            pitch: parts[4],
            yaw: parts[5],
        })
    } else {
        None
    }
}

/// Parse a "#rrggbb" hex color into RGB components in 0.0-1.0
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Parse a triple string "x y z" into three floats
fn parse_triple(s: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = s.split_whitespace()
        .filter_map(|p| p.parse().ok())
        .collect();
    if parts.len() == 3 {
        Some([parts[0], parts[1], parts[2]])
    } else {
        None
    }
}

/// Box geometry element, size as "x y z" (meters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxGeom {
    #[serde(rename = "@size")]
    pub size: String,
}

/// Cylinder geometry element, axis along local Y
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderGeom {
    #[serde(rename = "@radius")]
    pub radius: f64,
    #[serde(rename = "@length")]
    pub length: f64,
}

/// Sphere geometry element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereGeom {
    #[serde(rename = "@radius")]
    pub radius: f64,
}

/// Cone geometry element, apex up, axis along local Y
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConeGeom {
    #[serde(rename = "@radius")]
    pub radius: f64,
    #[serde(rename = "@length")]
    pub length: f64,
}

/// Resolved geometry for a part
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box { size: [f64; 3] },
    Cylinder { radius: f64, length: f64 },
    Sphere { radius: f64 },
    Cone { radius: f64, length: f64 },
}

/// One mesh of a fixture or decor entry: a single geometry element
/// (box, cylinder, sphere, or cone) with an optional pose and color
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    /// Pose offset: "x y z roll pitch yaw" (meters, radians)
    #[serde(default)]
    pub pose: Option<String>,
    /// Surface color as "#rrggbb"
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "box", default)]
    pub box_geom: Option<BoxGeom>,
    #[serde(default)]
    pub cylinder: Option<CylinderGeom>,
    #[serde(default)]
    pub sphere: Option<SphereGeom>,
    #[serde(default)]
    pub cone: Option<ConeGeom>,
}

impl Part {
    /// Parse the pose string into a Pose struct
    pub fn parse_pose(&self) -> Option<Pose> {
        self.pose.as_ref().and_then(|s| parse_pose_string(s))
    }

    /// Resolve the geometry element into a Shape (first present wins)
    pub fn shape(&self) -> Option<Shape> {
        if let Some(ref b) = self.box_geom {
            return parse_triple(&b.size).map(|size| Shape::Box { size });
        }
        if let Some(ref c) = self.cylinder {
            return Some(Shape::Cylinder { radius: c.radius, length: c.length });
        }
        if let Some(ref s) = self.sphere {
            return Some(Shape::Sphere { radius: s.radius });
        }
        if let Some(ref c) = self.cone {
            return Some(Shape::Cone { radius: c.radius, length: c.length });
        }
        None
    }
}

/// A pickable fixture: a piece of furniture or an appliance with
/// display metadata shown when the fixture is clicked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(rename = "@name")]
    pub name: String,
    /// Display description
    #[serde(default)]
    pub description: Option<String>,
    /// Legacy synonym for description; ignored when both are present
    #[serde(default)]
    pub desc: Option<String>,
    /// Specification line shown below the description
    #[serde(default)]
    pub specs: Option<String>,
    /// Pose of the fixture root: "x y z roll pitch yaw" (meters, radians)
    #[serde(default)]
    pub pose: Option<String>,
    #[serde(default)]
    pub part: Vec<Part>,
}

impl Fixture {
    /// Parse the pose string into a Pose struct
    pub fn parse_pose(&self) -> Option<Pose> {
        self.pose.as_ref().and_then(|s| parse_pose_string(s))
    }

    /// Resolved display description: `description` wins over the legacy
    /// `desc` element, empty when neither is present
    pub fn display_details(&self) -> String {
        self.description
            .clone()
            .or_else(|| self.desc.clone())
            .unwrap_or_default()
    }

    /// Resolved specification line, empty when absent
    pub fn display_specs(&self) -> String {
        self.specs.clone().unwrap_or_default()
    }
}

/// Untagged scenery geometry (floor, walls); never pickable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decor {
    #[serde(rename = "@name")]
    pub name: String,
    /// Pose of the decor root: "x y z roll pitch yaw" (meters, radians)
    #[serde(default)]
    pub pose: Option<String>,
    #[serde(default)]
    pub part: Vec<Part>,
}

impl Decor {
    /// Parse the pose string into a Pose struct
    pub fn parse_pose(&self) -> Option<Pose> {
        self.pose.as_ref().and_then(|s| parse_pose_string(s))
    }
}

/// Root KSL document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "kitchen")]
pub struct Kitchen {
    #[serde(rename = "@version")]
    pub version: String,

    #[serde(rename = "@name", default)]
    pub name: Option<String>,

    #[serde(default)]
    pub fixture: Vec<Fixture>,

    #[serde(default)]
    pub decor: Vec<Decor>,
}

impl Kitchen {
    /// Create a new empty KSL document
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            fixture: Vec::new(),
            decor: Vec::new(),
        }
    }

    /// Parse KSL from XML string
    pub fn from_xml(xml: &str) -> Result<Self, LayoutError> {
        from_str(xml).map_err(|e| LayoutError::ParseError(e.to_string()))
    }

    /// Parse KSL from file
    pub fn from_file(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        let kitchen = Self::from_xml(&content)?;
        debug!(
            "Parsed layout {:?}: {} fixtures, {} decor entries",
            path,
            kitchen.fixture.len(),
            kitchen.decor.len()
        );
        Ok(kitchen)
    }

    /// Serialize to XML string
    pub fn to_xml(&self) -> Result<String, LayoutError> {
        let xml = to_string(self).map_err(|e| LayoutError::SerializeError(e.to_string()))?;
        Ok(format!("<?xml version='1.0'?>\n{}", xml))
    }

    /// Write to file
    pub fn to_file(&self, path: &Path) -> Result<(), LayoutError> {
        let xml = self.to_xml()?;
        std::fs::write(path, xml)?;
        Ok(())
    }
}

impl Default for Kitchen {
    fn default() -> Self {
        Self::new()
    }
}
