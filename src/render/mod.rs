//! Module for anything related to drawing geometry.
//!
//! This module contains the basic shape meshes and the GLSL sources of the scene shader
//! program.

pub mod shapes;
