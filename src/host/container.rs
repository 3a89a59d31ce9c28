use crate::errors::{Result, StageError};

/// Anything that can host the drawing surface.
pub trait Container {
    /// Client-area size in physical pixels, `None` when unresolved.
    fn client_size(&self) -> Option<(u32, u32)>;
    fn scale_factor(&self) -> f32;
}

#[cfg(feature = "winit")]
impl Container for winit::window::Window {
    fn client_size(&self) -> Option<(u32, u32)> {
        let size = self.inner_size();
        Some((size.width, size.height))
    }

    fn scale_factor(&self) -> f32 {
        winit::window::Window::scale_factor(self) as f32
    }
}

/// In-memory container with a settable size, for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedContainer {
    size: Option<(u32, u32)>,
    scale_factor: f32,
}

impl FixedContainer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            scale_factor: 1.0,
        }
    }

    /// A container whose size cannot be resolved.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            size: None,
            scale_factor: 1.0,
        }
    }

    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    pub fn set_unresolved(&mut self) {
        self.size = None;
    }
}

impl Container for FixedContainer {
    fn client_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }
}

/// Drawing-surface dimensions. Width and height are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale_factor: f32,
}

impl Viewport {
    pub fn from_container<C: Container + ?Sized>(container: &C) -> Result<Self> {
        let (width, height) = container
            .client_size()
            .ok_or_else(|| StageError::Configuration("container could not be resolved".into()))?;
        if width == 0 || height == 0 {
            return Err(StageError::Configuration(format!(
                "container has a degenerate size {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            scale_factor: container.scale_factor(),
        })
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
