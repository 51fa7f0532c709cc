/// Configuration shared by the core and its backends

/// GL client API version the render targets are created for
///
/// Some sized formats only exist in later versions, which changes whether a
/// format is treated as carrying depth or stencil bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ClientVersion {
    /// OpenGL ES 2.0 (plus the extensions the translation layer exposes)
    #[default]
    Es2,
    /// OpenGL ES 3.0
    Es3,
}

impl ClientVersion {
    /// Major version number
    pub fn major(self) -> u32 {
        match self {
            ClientVersion::Es2 => 2,
            ClientVersion::Es3 => 3,
        }
    }
}

/// Which validation layer messages get forwarded to the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugSeverity {
    /// Errors only
    ErrorsOnly,
    /// Errors and warnings
    #[default]
    ErrorsAndWarnings,
    /// Everything, including info and verbose messages
    All,
}

/// Backend configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// GL client version served by this backend
    pub client_version: ClientVersion,
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Validation messages to forward
    pub debug_severity: DebugSeverity,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_version: ClientVersion::default(),
            enable_validation: cfg!(debug_assertions),
            debug_severity: DebugSeverity::default(),
            app_name: "GL Render Target Application".to_string(),
            app_version: (1, 0, 0),
        }
    }
}
