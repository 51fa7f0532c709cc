/// Mock backend for unit tests (no GPU required)
///
/// Records every call made by render targets and lets tests inject creation
/// failures and per-format sample support, so the allocation algorithm can be
/// checked without a real device.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::backend::{BackendContext, NativeError, SurfaceDesc};
use crate::config::ClientVersion;
use crate::format::{FormatTranslator, InternalFormat};
use crate::surface::SurfaceRef;

// ============================================================================
// Mock formats
// ============================================================================

/// Native formats of the mock device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum MockFormat {
    A8R8G8B8,
    X8R8G8B8,
    R5G6B5,
    A16B16G16R16F,
    D16,
    D24X8,
    D24S8,
    D32F,
    UNKNOWN,
}

/// Native multisample value of the mock device (0 = single sampled)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockMultisample(pub u32);

/// Capabilities consulted by the mock translator
#[derive(Debug, Clone, Copy)]
pub struct MockCaps {
    /// When false, RGB8 is substituted with A8R8G8B8
    pub supports_rgb8: bool,
}

impl Default for MockCaps {
    fn default() -> Self {
        Self { supports_rgb8: true }
    }
}

/// Format tables of the mock device
#[derive(Debug, Default)]
pub struct MockFormats;

impl FormatTranslator for MockFormats {
    type NativeFormat = MockFormat;
    type Multisample = MockMultisample;
    type Caps = MockCaps;

    fn render_format(&self, format: InternalFormat, caps: &MockCaps) -> MockFormat {
        match format {
            InternalFormat::RGBA8 | InternalFormat::BGRA8 => MockFormat::A8R8G8B8,
            InternalFormat::RGB8 if caps.supports_rgb8 => MockFormat::X8R8G8B8,
            InternalFormat::RGB8 => MockFormat::A8R8G8B8,
            InternalFormat::RGB565 => MockFormat::R5G6B5,
            InternalFormat::RGBA16F => MockFormat::A16B16G16R16F,
            InternalFormat::DEPTH_COMPONENT16 => MockFormat::D16,
            InternalFormat::DEPTH_COMPONENT24 => MockFormat::D24X8,
            InternalFormat::DEPTH24_STENCIL8 | InternalFormat::STENCIL_INDEX8 => MockFormat::D24S8,
            InternalFormat::DEPTH_COMPONENT32F => MockFormat::D32F,
            _ => MockFormat::UNKNOWN,
        }
    }

    fn internal_format(&self, native: MockFormat) -> InternalFormat {
        match native {
            MockFormat::A8R8G8B8 => InternalFormat::RGBA8,
            MockFormat::X8R8G8B8 => InternalFormat::RGB8,
            MockFormat::R5G6B5 => InternalFormat::RGB565,
            MockFormat::A16B16G16R16F => InternalFormat::RGBA16F,
            MockFormat::D16 => InternalFormat::DEPTH_COMPONENT16,
            MockFormat::D24X8 => InternalFormat::DEPTH_COMPONENT24,
            MockFormat::D24S8 => InternalFormat::DEPTH24_STENCIL8,
            MockFormat::D32F => InternalFormat::DEPTH_COMPONENT32F,
            MockFormat::UNKNOWN => InternalFormat::NONE,
        }
    }

    fn multisample(&self, samples: u32) -> MockMultisample {
        if samples > 1 {
            MockMultisample(samples)
        } else {
            MockMultisample(0)
        }
    }

    fn sample_count(&self, multisample: MockMultisample) -> u32 {
        multisample.0
    }
}

// ============================================================================
// Mock surface / device / errors
// ============================================================================

/// Native surface of the mock device
#[derive(Debug)]
pub struct MockSurface {
    pub width: u32,
    pub height: u32,
    pub format: MockFormat,
    pub multisample: MockMultisample,
}

/// Native device handle of the mock backend
#[derive(Debug, Default)]
pub struct MockDevice {
    surfaces_created: AtomicU32,
}

impl MockDevice {
    /// Number of surfaces created through this device
    pub fn surfaces_created(&self) -> u32 {
        self.surfaces_created.load(Ordering::SeqCst)
    }
}

/// Failure results of the mock creation calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Out of video memory
    OutOfVideoMemory,
    /// Out of host memory
    OutOfMemory,
    /// Any other failure
    InvalidCall,
}

impl NativeError for MockError {
    fn is_out_of_memory(&self) -> bool {
        matches!(self, MockError::OutOfVideoMemory | MockError::OutOfMemory)
    }
}

/// A call made on the mock backend
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    DescribeSurface,
    NearestSupportedSamples { format: MockFormat, requested: u32 },
    CreateColorSurface { width: u32, height: u32, format: MockFormat, multisample: MockMultisample },
    CreateDepthStencilSurface { width: u32, height: u32, format: MockFormat, multisample: MockMultisample },
}

// ============================================================================
// Mock backend
// ============================================================================

/// Mock backend context
pub struct MockBackend {
    client_version: ClientVersion,
    caps: MockCaps,
    formats: MockFormats,
    device: MockDevice,
    /// Multisample counts (> 1) per known format; unknown formats have no entry
    sample_support: HashMap<MockFormat, Vec<u32>>,
    next_failure: Mutex<Option<MockError>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockBackend {
    /// Mock device with common color and depth formats supporting 2/4/8 samples
    pub fn new() -> Self {
        let sample_support = HashMap::from([
            (MockFormat::A8R8G8B8, vec![2, 4, 8]),
            (MockFormat::X8R8G8B8, vec![2, 4]),
            (MockFormat::R5G6B5, vec![]),
            (MockFormat::A16B16G16R16F, vec![4]),
            (MockFormat::D16, vec![2, 4]),
            (MockFormat::D24X8, vec![2, 4, 8]),
            (MockFormat::D24S8, vec![2, 4, 8]),
            (MockFormat::D32F, vec![]),
        ]);

        Self {
            client_version: ClientVersion::Es2,
            caps: MockCaps::default(),
            formats: MockFormats,
            device: MockDevice::default(),
            sample_support,
            next_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_client_version(mut self, version: ClientVersion) -> Self {
        self.client_version = version;
        self
    }

    pub fn with_caps(mut self, caps: MockCaps) -> Self {
        self.caps = caps;
        self
    }

    /// Make `format` unknown to sample negotiation
    pub fn without_format(mut self, format: MockFormat) -> Self {
        self.sample_support.remove(&format);
        self
    }

    /// Replace the multisample counts supported for `format`
    pub fn with_samples(mut self, format: MockFormat, counts: Vec<u32>) -> Self {
        self.sample_support.insert(format, counts);
        self
    }

    /// Make the next creation call fail with `error`
    pub fn fail_next_create(&self, error: MockError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    /// Build a native surface as if it came from elsewhere (swap chain, texture)
    pub fn external_surface(
        width: u32,
        height: u32,
        format: MockFormat,
        samples: u32,
    ) -> SurfaceRef<MockSurface> {
        SurfaceRef::new(MockSurface {
            width,
            height,
            format,
            multisample: MockFormats.multisample(samples),
        })
    }

    /// All calls so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of creation calls (color + depth/stencil)
    pub fn creation_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(call, MockCall::CreateColorSurface { .. } | MockCall::CreateDepthStencilSurface { .. })
            })
            .count()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn create_surface(
        &self,
        width: u32,
        height: u32,
        format: MockFormat,
        multisample: MockMultisample,
    ) -> Result<SurfaceRef<MockSurface>, MockError> {
        if let Some(error) = self.next_failure.lock().unwrap().take() {
            return Err(error);
        }

        self.device().surfaces_created.fetch_add(1, Ordering::SeqCst);
        Ok(SurfaceRef::new(MockSurface { width, height, format, multisample }))
    }
}

impl BackendContext for MockBackend {
    type Formats = MockFormats;
    type Surface = MockSurface;
    type Device = MockDevice;
    type Error = MockError;

    fn formats(&self) -> &MockFormats {
        &self.formats
    }

    fn caps(&self) -> &MockCaps {
        &self.caps
    }

    fn device(&self) -> &MockDevice {
        &self.device
    }

    fn client_version(&self) -> ClientVersion {
        self.client_version
    }

    fn describe_surface(&self, surface: &MockSurface) -> SurfaceDesc<MockFormat, MockMultisample> {
        self.record(MockCall::DescribeSurface);
        SurfaceDesc {
            width: surface.width,
            height: surface.height,
            format: surface.format,
            multisample: surface.multisample,
        }
    }

    fn nearest_supported_samples(&self, format: MockFormat, requested: u32) -> Option<u32> {
        self.record(MockCall::NearestSupportedSamples { format, requested });

        let supported = self.sample_support.get(&format)?;
        if requested == 0 {
            return Some(0);
        }
        supported.iter().copied().filter(|&count| count >= requested).min()
    }

    fn create_color_surface(
        &self,
        width: u32,
        height: u32,
        format: MockFormat,
        multisample: MockMultisample,
    ) -> Result<SurfaceRef<MockSurface>, MockError> {
        self.record(MockCall::CreateColorSurface { width, height, format, multisample });
        self.create_surface(width, height, format, multisample)
    }

    fn create_depth_stencil_surface(
        &self,
        width: u32,
        height: u32,
        format: MockFormat,
        multisample: MockMultisample,
    ) -> Result<SurfaceRef<MockSurface>, MockError> {
        self.record(MockCall::CreateDepthStencilSurface { width, height, format, multisample });
        self.create_surface(width, height, format, multisample)
    }
}

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
