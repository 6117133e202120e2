use std::sync::Arc;

use egui::{Context, TextureHandle, TextureId, TextureOptions};
use parking_lot::Mutex;

use crate::bitmap::Bitmap;
use crate::error::SurfaceError;

/// Destination the canvas publishes its bitmap to.
///
/// `commit == true` is a forced upload that (re)binds the backing resource;
/// `commit == false` is a cheap update of an already bound resource.
pub trait DisplaySurface: Send {
    fn push(&mut self, bitmap: &Bitmap, commit: bool) -> Result<(), SurfaceError>;

    /// Frees the backing resource. The next committed push binds a new one.
    fn release(&mut self) {}

    /// Texture to paint, if the surface is backed by one
    fn texture_id(&self) -> Option<TextureId> {
        None
    }
}

fn check_dimensions(bitmap: &Bitmap) -> Result<(), SurfaceError> {
    let [width, height] = bitmap.size();
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Display surface backed by an egui texture
pub struct TextureSurface {
    ctx: Context,
    name: String,
    handle: Option<TextureHandle>,
}

impl std::fmt::Debug for TextureSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureSurface")
            .field("name", &self.name)
            .field("bound", &self.handle.is_some())
            .finish()
    }
}

impl TextureSurface {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            name: format!("canvas_{}", uuid::Uuid::new_v4()),
            handle: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }
}

impl DisplaySurface for TextureSurface {
    fn push(&mut self, bitmap: &Bitmap, commit: bool) -> Result<(), SurfaceError> {
        check_dimensions(bitmap)?;
        let image = bitmap.as_color_image().clone();

        if let Some(handle) = &mut self.handle {
            handle.set(image, TextureOptions::NEAREST);
        } else if commit {
            log::debug!("Binding texture {}", self.name);
            self.handle = Some(self.ctx.load_texture(&self.name, image, TextureOptions::NEAREST));
        } else {
            return Err(SurfaceError::NotBound);
        }

        if commit {
            self.ctx.request_repaint();
        }
        Ok(())
    }

    fn release(&mut self) {
        // egui frees the texture once the last handle is dropped.
        if self.handle.take().is_some() {
            log::debug!("Released texture {}", self.name);
        }
    }

    fn texture_id(&self) -> Option<TextureId> {
        self.handle.as_ref().map(TextureHandle::id)
    }
}

/// What a [`MemorySurface`] has received so far
#[derive(Debug, Default, Clone)]
pub struct SurfaceRecord {
    pub last: Option<Bitmap>,
    pub commits: usize,
    pub updates: usize,
    pub released: usize,
}

/// Headless display surface that keeps a copy of the last pushed bitmap.
///
/// Clones share the same record, so a clone kept outside the canvas can
/// observe what was published.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    record: Arc<Mutex<SurfaceRecord>>,
    bound: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> SurfaceRecord {
        self.record.lock().clone()
    }

    pub fn pushes(&self) -> usize {
        let record = self.record.lock();
        record.commits + record.updates
    }
}

impl DisplaySurface for MemorySurface {
    fn push(&mut self, bitmap: &Bitmap, commit: bool) -> Result<(), SurfaceError> {
        check_dimensions(bitmap)?;
        if !commit && !self.bound {
            return Err(SurfaceError::NotBound);
        }
        self.bound = true;

        let mut record = self.record.lock();
        if commit {
            record.commits += 1;
        } else {
            record.updates += 1;
        }
        record.last = Some(bitmap.clone());
        Ok(())
    }

    fn release(&mut self) {
        self.bound = false;
        self.record.lock().released += 1;
    }
}
