//! Tessel Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tessel crates:
//!
//! - **Identifiers**: String-interned element, frame and group ids ([`identifier::Id`])
//! - **Colors**: CSS color validation ([`color::Color`])
//! - **Geometry**: Points, sizes, bounding boxes and insets ([`geometry`] module)
//! - **Scene**: The editor's flat element store ([`scene`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod scene;
