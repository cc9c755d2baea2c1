//! Export functionality for Tessel scenes.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a [`SceneTree`] into source code. It is the last stage before
//! formatting.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene JSON
//!     ↓ parse
//! Scene
//!     ↓ structure
//! SceneTree
//!     ↓ export (this module, rows and styles computed on the way)
//! Unformatted code
//!     ↓ format
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`jsx`]: a React function component built from nested `div`s.
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`TesselError::Export`] at the crate boundary.
//!
//! [`TesselError::Export`]: crate::TesselError::Export

/// JSX export backend.
pub mod jsx;

use std::fmt;

use crate::structure::SceneTree;

/// Abstraction for code export backends.
pub trait Exporter {
    /// Renders a scene tree as source code.
    ///
    /// The returned code is syntactically complete but not formatted; see
    /// [`crate::format`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree cannot be expressed in the
    /// target language.
    fn export(&self, tree: &SceneTree) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// Writing into the output buffer failed.
    Fmt(fmt::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Fmt(err) => write!(f, "Write error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Fmt(err) => Some(err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Fmt(err)
    }
}
