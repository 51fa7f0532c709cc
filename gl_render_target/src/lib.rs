/*!
# GL Render Target

Backend-agnostic render targets for a GL-style API translation layer.

A render target is a color or depth/stencil surface a framebuffer attachment
renders into. This crate provides the portable side: sized formats, the
interfaces a native backend implements, reference-counted native surface
handles, and the render target built on top of them. Backend crates (Vulkan,
etc.) implement `BackendContext` and `FormatTranslator` for their device.

## Architecture

- **BackendContext**: device-level queries and native surface creation
- **FormatTranslator**: portable ↔ native formats and sample counts
- **SurfaceRef**: explicit add-ref/release handle to a native surface
- **RenderTarget**: the interface framebuffer attachment logic consumes
- **SurfaceRenderTarget**: the surface-backed implementation, generic over the backend
*/

// Internal modules
mod error;
pub mod backend;
pub mod config;
pub mod format;
pub mod log;
pub mod render_target;
pub mod surface;

// Main glrt namespace module
pub mod glrt {
    // Error types
    pub use crate::error::{Error, Result, GlError, ErrorSink, ErrorFlags};

    // Configuration
    pub use crate::config::{Config, ClientVersion, DebugSeverity};

    // Logging sub-module (types and logger control; macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Render sub-module with all render target types
    pub mod render {
        pub use crate::backend::{BackendContext, NativeError, SurfaceDesc, NativeFormat, Multisample, Caps};
        pub use crate::format::{InternalFormat, FormatInfo, FormatAspects, FormatTranslator};
        pub use crate::render_target::*;
        pub use crate::surface::SurfaceRef;
    }
}
