//! Galley Core - KSL layout parsing and shared scene types
//!
//! This crate provides the foundational types for the Galley viewer:
//! - KSL (Kitchen Scene Layout) parsing and serialization
//! - Pose and hex-color string parsing shared by the scene builder

pub mod layout;

pub use layout::{
    parse_hex_color, parse_pose_string, Decor, Fixture, Kitchen, LayoutError, Part, Pose, Shape,
};
