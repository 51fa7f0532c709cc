/// FormatTranslator trait - maps portable formats to a backend's native ones

use std::fmt::Debug;
use super::InternalFormat;

/// Format translation tables of one backend
///
/// All methods are pure. Translation to a native render format may substitute
/// a compatible superset format when the device has no exact match; callers
/// find out through `internal_format()` of the native format they got back.
pub trait FormatTranslator: Send + Sync {
    /// Backend-native pixel format
    type NativeFormat: Copy + Debug + PartialEq + Send + Sync;

    /// Backend-native multisample description
    type Multisample: Copy + Debug + PartialEq + Send + Sync;

    /// Device capabilities consulted when picking a render format
    type Caps;

    /// Nearest native format the device can render to for `format`
    fn render_format(&self, format: InternalFormat, caps: &Self::Caps) -> Self::NativeFormat;

    /// Portable format of a native format (`InternalFormat::NONE` if unknown)
    fn internal_format(&self, native: Self::NativeFormat) -> InternalFormat;

    /// Native multisample value for a sample count (0 and 1 mean no multisampling)
    fn multisample(&self, samples: u32) -> Self::Multisample;

    /// Sample count of a native multisample value (0 when not multisampled)
    fn sample_count(&self, multisample: Self::Multisample) -> u32;
}
