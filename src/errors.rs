//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`StageError`] covers the failure modes of a scene host:
//! - Host configuration failures (unresolved container, degenerate viewport)
//! - Rejected geometry parameters
//! - Asset loading and decoding errors (recoverable at runtime)
//! - GPU initialization and surface errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, StageError>`.
//!
//! ```rust,ignore
//! use stage3d::errors::{StageError, Result};
//!
//! fn build() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for scene hosts, builders and the renderer.
#[derive(Error, Debug)]
pub enum StageError {
    // ========================================================================
    // Host Configuration Errors
    // ========================================================================
    /// The host container could not be resolved or reports unusable dimensions.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ========================================================================
    // Geometry Errors
    // ========================================================================
    /// A primitive was requested with out-of-range parameters.
    #[error("Invalid parameter for {primitive}: {reason}")]
    InvalidParameter {
        /// Name of the primitive being built
        primitive: &'static str,
        /// What was wrong with the parameters
        reason: String,
    },

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// A model, texture or tabular data source failed to load or parse.
    #[error("Failed to load asset '{source_name}': {reason}")]
    AssetLoad {
        /// Display name of the asset source
        source_name: String,
        /// Underlying cause
        reason: String,
    },

    /// The load was cancelled before it completed.
    #[error("Load cancelled: {0}")]
    LoadCancelled(String),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Rendering was requested before the renderer was initialized.
    #[error("Renderer not initialized")]
    RendererNotReady,

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StageError {
    /// Shorthand for an [`StageError::InvalidParameter`].
    pub fn invalid(primitive: &'static str, reason: impl Into<String>) -> Self {
        StageError::InvalidParameter {
            primitive,
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`StageError::AssetLoad`].
    pub fn asset(source_name: impl Into<String>, reason: impl ToString) -> Self {
        StageError::AssetLoad {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error leaves the host in a usable state.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StageError::AssetLoad { .. }
                | StageError::LoadCancelled(_)
                | StageError::ImageDecode(_)
        )
    }
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for StageError {
    fn from(err: image::ImageError) -> Self {
        StageError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, StageError>`.
pub type Result<T> = std::result::Result<T, StageError>;
