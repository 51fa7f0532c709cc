/// RenderTarget trait - a renderable color or depth/stencil surface

use crate::backend::BackendContext;
use crate::error::ErrorSink;
use crate::format::InternalFormat;
use crate::surface::SurfaceRef;
use super::SurfaceRenderTarget;

/// Construction outcome of a render target
///
/// A target without a native surface is either a valid empty one (zero-size
/// request, or wrapping a null surface) or the leftover of a failed
/// allocation. The two look alike from the accessors, so the outcome is kept
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Backed by a native surface
    Allocated,
    /// Valid, but no storage exists
    Empty,
    /// Allocation failed; the target is in its null state
    Failed,
}

/// Which native surface kind backs a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Color,
    DepthStencil,
}

/// Descriptor for allocating a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Requested portable format
    pub internal_format: InternalFormat,
    /// Requested sample count (0 or 1 = no MSAA)
    pub samples: u32,
}

impl RenderTargetDesc {
    /// Single-sampled descriptor
    pub fn new(width: u32, height: u32, internal_format: InternalFormat) -> Self {
        Self {
            width,
            height,
            internal_format,
            samples: 0,
        }
    }

    /// Same descriptor with a requested sample count
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }
}

/// Render target trait
///
/// All properties are fixed at construction.
pub trait RenderTarget: Send + Sync {
    /// Native surface type handed out by `surface()`
    type Surface;

    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Depth in pixels (1 for every described target)
    fn depth(&self) -> u32;

    /// Format as requested or observed by the API
    fn internal_format(&self) -> InternalFormat;

    /// Format of the native storage actually backing the target
    fn actual_format(&self) -> InternalFormat;

    /// Negotiated sample count (0 = no multisampling)
    fn samples(&self) -> u32;

    /// Construction outcome
    fn status(&self) -> TargetStatus;

    /// Native surface with one new reference added for the caller
    ///
    /// The caller releases the returned reference. Returns `None` when the
    /// target has no surface; no reference is taken in that case.
    fn surface(&self) -> Option<SurfaceRef<Self::Surface>>;

    /// Hint that the region's contents need not be preserved
    fn invalidate(&self, x: i32, y: i32, width: u32, height: u32);

    /// True when a native surface backs the target
    fn is_allocated(&self) -> bool {
        self.status() == TargetStatus::Allocated
    }

    /// True for more than one sample per pixel
    fn is_multisampled(&self) -> bool {
        self.samples() > 1
    }
}

/// Device-level render target creation
///
/// Implemented for every backend context, so downstream code can hold
/// `&impl RenderTargetFactory` and never name a concrete backend.
pub trait RenderTargetFactory {
    /// Render target produced by this device
    type Target: RenderTarget;

    /// Wrap an existing native surface, taking over the passed reference
    fn wrap_surface(
        &self,
        surface: Option<SurfaceRef<<Self::Target as RenderTarget>::Surface>>,
    ) -> Self::Target;

    /// Allocate a new render target, reporting failures to `errors`
    fn create_render_target(&self, desc: &RenderTargetDesc, errors: &dyn ErrorSink) -> Self::Target;
}

impl<B> RenderTargetFactory for B
where
    B: BackendContext,
{
    type Target = SurfaceRenderTarget<B>;

    fn wrap_surface(&self, surface: Option<SurfaceRef<B::Surface>>) -> SurfaceRenderTarget<B> {
        SurfaceRenderTarget::from_surface(self, surface)
    }

    fn create_render_target(&self, desc: &RenderTargetDesc, errors: &dyn ErrorSink) -> SurfaceRenderTarget<B> {
        SurfaceRenderTarget::allocate(self, desc, errors)
    }
}
