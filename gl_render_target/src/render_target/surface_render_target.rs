/// SurfaceRenderTarget - render target backed by one native surface of a backend

use std::fmt;

use crate::backend::{BackendContext, NativeError};
use crate::error::{Error, ErrorSink, GlError, Result};
use crate::format::{FormatTranslator, InternalFormat};
use crate::surface::SurfaceRef;
use crate::{rt_debug, rt_error, rt_trace, rt_warn};
use super::{RenderTarget, RenderTargetDesc, SurfaceKind, TargetStatus};

const SOURCE: &str = "glrt::RenderTarget";

/// Render target owning one reference to a native surface of backend `B`
///
/// Created either by wrapping an existing surface (`from_surface`) or by
/// allocating a new one (`try_allocate` / `allocate`). Dropping the target
/// releases its reference.
pub struct SurfaceRenderTarget<B: BackendContext> {
    /// Owned reference to the native surface
    surface: Option<SurfaceRef<B::Surface>>,
    width: u32,
    height: u32,
    depth: u32,
    internal_format: InternalFormat,
    actual_format: InternalFormat,
    samples: u32,
    kind: Option<SurfaceKind>,
    status: TargetStatus,
}

impl<B: BackendContext> SurfaceRenderTarget<B> {
    /// Target with no surface and every property zeroed
    fn null(status: TargetStatus) -> Self {
        Self {
            surface: None,
            width: 0,
            height: 0,
            depth: 0,
            internal_format: InternalFormat::NONE,
            actual_format: InternalFormat::NONE,
            samples: 0,
            kind: None,
            status,
        }
    }

    /// Wrap an existing native surface
    ///
    /// Takes over the passed reference; no reference is added. Properties
    /// are read from the surface's native description. A `None` surface gives
    /// an empty target without calling into the backend.
    pub fn from_surface(backend: &B, surface: Option<SurfaceRef<B::Surface>>) -> Self {
        let Some(surface) = surface else {
            rt_trace!(SOURCE, "Wrapping null surface");
            return Self::null(TargetStatus::Empty);
        };

        let desc = backend.describe_surface(&surface);
        let formats = backend.formats();

        // The surface already exists, so no format substitution can have happened
        let format = formats.internal_format(desc.format);
        let samples = formats.sample_count(desc.multisample);
        let kind = if format.is_depth_stencil(backend.client_version()) {
            SurfaceKind::DepthStencil
        } else {
            SurfaceKind::Color
        };

        rt_trace!(SOURCE, "Wrapped {}x{} {:?} surface ({:?}, {} samples)",
            desc.width, desc.height, format, desc.format, samples);

        Self {
            surface: Some(surface),
            width: desc.width,
            height: desc.height,
            depth: 1,
            internal_format: format,
            actual_format: format,
            samples,
            kind: Some(kind),
            status: TargetStatus::Allocated,
        }
    }

    /// Allocate a new native surface for `desc`
    ///
    /// The sample count is negotiated with the backend and the format may be
    /// substituted by a compatible one; both show up in `samples()` and
    /// `actual_format()`. A zero width or height gives an empty target that
    /// records the request without allocating.
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` when the backend cannot support the format/sample
    /// combination, or when it runs out of device or host memory.
    ///
    /// # Panics
    ///
    /// If the backend rejects the creation call for any other reason. That
    /// means its format tables disagree with what the device accepts.
    pub fn try_allocate(backend: &B, desc: &RenderTargetDesc) -> Result<Self> {
        let formats = backend.formats();
        let render_format = formats.render_format(desc.internal_format, backend.caps());

        let Some(samples) = backend.nearest_supported_samples(render_format, desc.samples) else {
            rt_warn!(SOURCE, "No supported sample count for {:?} ({:?}) at {} samples",
                desc.internal_format, render_format, desc.samples);
            return Err(Error::OutOfMemory);
        };

        let kind = if desc.internal_format.is_depth_stencil(backend.client_version()) {
            SurfaceKind::DepthStencil
        } else {
            SurfaceKind::Color
        };

        let mut surface = None;
        if desc.width > 0 && desc.height > 0 {
            let multisample = formats.multisample(samples);
            let created = match kind {
                SurfaceKind::DepthStencil => backend.create_depth_stencil_surface(
                    desc.width, desc.height, render_format, multisample),
                SurfaceKind::Color => backend.create_color_surface(
                    desc.width, desc.height, render_format, multisample),
            };

            match created {
                Ok(created) => surface = Some(created),
                Err(error) if error.is_out_of_memory() => {
                    rt_warn!(SOURCE, "Out of memory creating {}x{} {:?} surface ({:?}, {} samples): {:?}",
                        desc.width, desc.height, desc.internal_format, render_format, samples, error);
                    return Err(Error::OutOfMemory);
                }
                Err(error) => {
                    rt_error!(SOURCE, "Backend rejected {:?} surface {}x{} {:?} ({:?}, {} samples) after negotiation: {:?}",
                        kind, desc.width, desc.height, desc.internal_format, render_format, samples, error);
                    panic!("surface creation failed after capability negotiation: {:?}", error);
                }
            }
        }

        let status = if surface.is_some() {
            TargetStatus::Allocated
        } else {
            TargetStatus::Empty
        };

        rt_debug!(SOURCE, "Render target {}x{} {:?} -> {:?}, {} samples ({:?})",
            desc.width, desc.height, desc.internal_format, render_format, samples, status);

        Ok(Self {
            surface,
            width: desc.width,
            height: desc.height,
            depth: 1,
            internal_format: desc.internal_format,
            actual_format: formats.internal_format(render_format),
            samples,
            kind: Some(kind),
            status,
        })
    }

    /// Allocate a new native surface, reporting failures to `errors`
    ///
    /// Same as `try_allocate`, except that an out-of-memory failure records
    /// `GL_OUT_OF_MEMORY` and returns a target in its null state with
    /// `status() == TargetStatus::Failed`.
    pub fn allocate(backend: &B, desc: &RenderTargetDesc, errors: &dyn ErrorSink) -> Self {
        match Self::try_allocate(backend, desc) {
            Ok(target) => target,
            Err(error) => {
                errors.record(GlError::from(&error));
                Self::null(TargetStatus::Failed)
            }
        }
    }

    /// Native surface kind, `None` for targets without a format
    pub fn kind(&self) -> Option<SurfaceKind> {
        self.kind
    }
}

impl<B: BackendContext> RenderTarget for SurfaceRenderTarget<B> {
    type Surface = B::Surface;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn internal_format(&self) -> InternalFormat {
        self.internal_format
    }

    fn actual_format(&self) -> InternalFormat {
        self.actual_format
    }

    fn samples(&self) -> u32 {
        self.samples
    }

    fn status(&self) -> TargetStatus {
        self.status
    }

    fn surface(&self) -> Option<SurfaceRef<B::Surface>> {
        self.surface.as_ref().map(SurfaceRef::add_ref)
    }

    fn invalidate(&self, _x: i32, _y: i32, _width: u32, _height: u32) {
        // No-op: a single native surface gains nothing from partial invalidation
    }
}

impl<B: BackendContext> fmt::Debug for SurfaceRenderTarget<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRenderTarget")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("internal_format", &self.internal_format)
            .field("actual_format", &self.actual_format)
            .field("samples", &self.samples)
            .field("kind", &self.kind)
            .field("status", &self.status)
            .field("has_surface", &self.surface.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "surface_render_target_tests.rs"]
mod tests;
