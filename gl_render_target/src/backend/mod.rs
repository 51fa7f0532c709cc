//! Backend context interface
//!
//! A `BackendContext` is the device-level object of one native graphics API.
//! Render targets query it for surface descriptions and sample-count limits,
//! and ask it to create native surfaces. Exactly one backend type is chosen
//! when the device is created; everything above it is generic over the trait.

use std::fmt::Debug;

use crate::config::ClientVersion;
use crate::format::FormatTranslator;
use crate::surface::SurfaceRef;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;

/// Native format type of a backend
pub type NativeFormat<B> = <<B as BackendContext>::Formats as FormatTranslator>::NativeFormat;

/// Native multisample type of a backend
pub type Multisample<B> = <<B as BackendContext>::Formats as FormatTranslator>::Multisample;

/// Native capability set of a backend
pub type Caps<B> = <<B as BackendContext>::Formats as FormatTranslator>::Caps;

/// Native description of an existing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDesc<F, M> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Native pixel format
    pub format: F,
    /// Native multisample value
    pub multisample: M,
}

/// Error returned by a native surface creation call
pub trait NativeError: Debug {
    /// True when the call failed for lack of device or host memory
    ///
    /// Every other failure after successful capability negotiation is a
    /// contract violation between the format tables and the device.
    fn is_out_of_memory(&self) -> bool;
}

/// Device-level services a render target needs from its backend
pub trait BackendContext {
    /// Format translation tables of this backend
    type Formats: FormatTranslator;

    /// Native surface object (owned through `SurfaceRef`)
    type Surface: Send + Sync + 'static;

    /// Native device handle used by the creation calls
    type Device;

    /// Error of the creation calls
    type Error: NativeError;

    /// Format translation tables
    fn formats(&self) -> &Self::Formats;

    /// Capabilities consulted by `FormatTranslator::render_format`
    fn caps(&self) -> &<Self::Formats as FormatTranslator>::Caps;

    /// Native device handle
    fn device(&self) -> &Self::Device;

    /// GL client version the device serves
    fn client_version(&self) -> ClientVersion;

    /// Read-only description of an existing surface
    fn describe_surface(
        &self,
        surface: &Self::Surface,
    ) -> SurfaceDesc<
        <Self::Formats as FormatTranslator>::NativeFormat,
        <Self::Formats as FormatTranslator>::Multisample,
    >;

    /// Nearest sample count the device supports for `format`
    ///
    /// `Some(0)` means "no multisampling" is supported. `None` means the
    /// format/sample combination cannot be supported at all.
    fn nearest_supported_samples(
        &self,
        format: <Self::Formats as FormatTranslator>::NativeFormat,
        requested: u32,
    ) -> Option<u32>;

    /// Create a color-renderable surface
    fn create_color_surface(
        &self,
        width: u32,
        height: u32,
        format: <Self::Formats as FormatTranslator>::NativeFormat,
        multisample: <Self::Formats as FormatTranslator>::Multisample,
    ) -> Result<SurfaceRef<Self::Surface>, Self::Error>;

    /// Create a depth/stencil surface
    fn create_depth_stencil_surface(
        &self,
        width: u32,
        height: u32,
        format: <Self::Formats as FormatTranslator>::NativeFormat,
        multisample: <Self::Formats as FormatTranslator>::Multisample,
    ) -> Result<SurfaceRef<Self::Surface>, Self::Error>;
}
