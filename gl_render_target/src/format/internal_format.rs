/// Portable (GL sized internal) formats and their bit layouts

use bitflags::bitflags;
use crate::config::ClientVersion;

/// GL sized internal format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum InternalFormat {
    /// GL_NONE, reported for native formats with no portable equivalent
    NONE,

    // Color formats
    RGBA4,
    RGB5_A1,
    RGB565,
    RGB8,
    RGBA8,
    BGRA8,
    SRGB8_ALPHA8,
    RGB10_A2,
    R8,
    RG8,
    R16F,
    RG16F,
    RGBA16F,
    R32F,
    RGBA32F,
    R11F_G11F_B10F,

    // Depth/stencil formats
    DEPTH_COMPONENT16,
    DEPTH_COMPONENT24,
    DEPTH_COMPONENT32F,
    DEPTH24_STENCIL8,
    DEPTH32F_STENCIL8,
    STENCIL_INDEX8,
}

bitflags! {
    /// Image aspects a format carries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatAspects: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Bit layout of a sized format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub red_bits: u32,
    pub green_bits: u32,
    pub blue_bits: u32,
    pub alpha_bits: u32,
    pub depth_bits: u32,
    pub stencil_bits: u32,
    /// First client version exposing the format
    pub min_version: ClientVersion,
}

impl FormatInfo {
    const fn color(r: u32, g: u32, b: u32, a: u32, min_version: ClientVersion) -> Self {
        Self {
            red_bits: r,
            green_bits: g,
            blue_bits: b,
            alpha_bits: a,
            depth_bits: 0,
            stencil_bits: 0,
            min_version,
        }
    }

    const fn depth_stencil(depth: u32, stencil: u32, min_version: ClientVersion) -> Self {
        Self {
            red_bits: 0,
            green_bits: 0,
            blue_bits: 0,
            alpha_bits: 0,
            depth_bits: depth,
            stencil_bits: stencil,
            min_version,
        }
    }
}

impl InternalFormat {
    /// Every format except NONE
    pub const ALL: [InternalFormat; 22] = [
        InternalFormat::RGBA4,
        InternalFormat::RGB5_A1,
        InternalFormat::RGB565,
        InternalFormat::RGB8,
        InternalFormat::RGBA8,
        InternalFormat::BGRA8,
        InternalFormat::SRGB8_ALPHA8,
        InternalFormat::RGB10_A2,
        InternalFormat::R8,
        InternalFormat::RG8,
        InternalFormat::R16F,
        InternalFormat::RG16F,
        InternalFormat::RGBA16F,
        InternalFormat::R32F,
        InternalFormat::RGBA32F,
        InternalFormat::R11F_G11F_B10F,
        InternalFormat::DEPTH_COMPONENT16,
        InternalFormat::DEPTH_COMPONENT24,
        InternalFormat::DEPTH_COMPONENT32F,
        InternalFormat::DEPTH24_STENCIL8,
        InternalFormat::DEPTH32F_STENCIL8,
        InternalFormat::STENCIL_INDEX8,
    ];

    /// GL enum value
    pub fn gl_enum(self) -> u32 {
        match self {
            InternalFormat::NONE => 0,
            InternalFormat::RGBA4 => 0x8056,
            InternalFormat::RGB5_A1 => 0x8057,
            InternalFormat::RGB565 => 0x8D62,
            InternalFormat::RGB8 => 0x8051,
            InternalFormat::RGBA8 => 0x8058,
            InternalFormat::BGRA8 => 0x93A1,
            InternalFormat::SRGB8_ALPHA8 => 0x8C43,
            InternalFormat::RGB10_A2 => 0x8059,
            InternalFormat::R8 => 0x8229,
            InternalFormat::RG8 => 0x822B,
            InternalFormat::R16F => 0x822D,
            InternalFormat::RG16F => 0x822F,
            InternalFormat::RGBA16F => 0x881A,
            InternalFormat::R32F => 0x822E,
            InternalFormat::RGBA32F => 0x8814,
            InternalFormat::R11F_G11F_B10F => 0x8C3A,
            InternalFormat::DEPTH_COMPONENT16 => 0x81A5,
            InternalFormat::DEPTH_COMPONENT24 => 0x81A6,
            InternalFormat::DEPTH_COMPONENT32F => 0x8CAC,
            InternalFormat::DEPTH24_STENCIL8 => 0x88F0,
            InternalFormat::DEPTH32F_STENCIL8 => 0x8CAD,
            InternalFormat::STENCIL_INDEX8 => 0x8D48,
        }
    }

    /// Look up a format by GL enum value
    pub fn from_gl_enum(value: u32) -> Option<Self> {
        if value == 0 {
            return Some(InternalFormat::NONE);
        }
        Self::ALL.iter().copied().find(|format| format.gl_enum() == value)
    }

    /// Bit layout, `None` for NONE
    pub fn info(self) -> Option<FormatInfo> {
        use ClientVersion::{Es2, Es3};

        let info = match self {
            InternalFormat::NONE => return None,
            InternalFormat::RGBA4 => FormatInfo::color(4, 4, 4, 4, Es2),
            InternalFormat::RGB5_A1 => FormatInfo::color(5, 5, 5, 1, Es2),
            InternalFormat::RGB565 => FormatInfo::color(5, 6, 5, 0, Es2),
            InternalFormat::RGB8 => FormatInfo::color(8, 8, 8, 0, Es2),
            InternalFormat::RGBA8 => FormatInfo::color(8, 8, 8, 8, Es2),
            InternalFormat::BGRA8 => FormatInfo::color(8, 8, 8, 8, Es2),
            InternalFormat::SRGB8_ALPHA8 => FormatInfo::color(8, 8, 8, 8, Es3),
            InternalFormat::RGB10_A2 => FormatInfo::color(10, 10, 10, 2, Es3),
            InternalFormat::R8 => FormatInfo::color(8, 0, 0, 0, Es2),
            InternalFormat::RG8 => FormatInfo::color(8, 8, 0, 0, Es2),
            InternalFormat::R16F => FormatInfo::color(16, 0, 0, 0, Es2),
            InternalFormat::RG16F => FormatInfo::color(16, 16, 0, 0, Es2),
            InternalFormat::RGBA16F => FormatInfo::color(16, 16, 16, 16, Es2),
            InternalFormat::R32F => FormatInfo::color(32, 0, 0, 0, Es3),
            InternalFormat::RGBA32F => FormatInfo::color(32, 32, 32, 32, Es2),
            InternalFormat::R11F_G11F_B10F => FormatInfo::color(11, 11, 10, 0, Es3),
            InternalFormat::DEPTH_COMPONENT16 => FormatInfo::depth_stencil(16, 0, Es2),
            InternalFormat::DEPTH_COMPONENT24 => FormatInfo::depth_stencil(24, 0, Es2),
            InternalFormat::DEPTH_COMPONENT32F => FormatInfo::depth_stencil(32, 0, Es3),
            InternalFormat::DEPTH24_STENCIL8 => FormatInfo::depth_stencil(24, 8, Es2),
            InternalFormat::DEPTH32F_STENCIL8 => FormatInfo::depth_stencil(32, 8, Es3),
            InternalFormat::STENCIL_INDEX8 => FormatInfo::depth_stencil(0, 8, Es2),
        };
        Some(info)
    }

    /// Bit layout as seen by a given client version
    ///
    /// Formats introduced after `version` do not exist there and yield `None`.
    pub fn info_for(self, version: ClientVersion) -> Option<FormatInfo> {
        self.info().filter(|info| info.min_version <= version)
    }

    /// True if the format exists in `version`
    pub fn is_supported(self, version: ClientVersion) -> bool {
        self.info_for(version).is_some()
    }

    /// Depth bits in `version` (0 if the format does not exist there)
    pub fn depth_bits(self, version: ClientVersion) -> u32 {
        self.info_for(version).map_or(0, |info| info.depth_bits)
    }

    /// Stencil bits in `version` (0 if the format does not exist there)
    pub fn stencil_bits(self, version: ClientVersion) -> u32 {
        self.info_for(version).map_or(0, |info| info.stencil_bits)
    }

    /// Aspects carried by the format in `version`
    pub fn aspects(self, version: ClientVersion) -> FormatAspects {
        let Some(info) = self.info_for(version) else {
            return FormatAspects::empty();
        };

        let mut aspects = FormatAspects::empty();
        if info.red_bits + info.green_bits + info.blue_bits + info.alpha_bits > 0 {
            aspects |= FormatAspects::COLOR;
        }
        if info.depth_bits > 0 {
            aspects |= FormatAspects::DEPTH;
        }
        if info.stencil_bits > 0 {
            aspects |= FormatAspects::STENCIL;
        }
        aspects
    }

    /// True if the format has depth or stencil bits in `version`
    pub fn is_depth_stencil(self, version: ClientVersion) -> bool {
        self.depth_bits(version) > 0 || self.stencil_bits(version) > 0
    }
}

#[cfg(test)]
#[path = "internal_format_tests.rs"]
mod tests;
