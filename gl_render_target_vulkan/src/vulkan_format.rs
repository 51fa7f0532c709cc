/// Vulkan format tables - portable formats, native formats and sample counts

use ash::vk;
use rustc_hash::FxHashSet;
use gl_render_target::glrt::ClientVersion;
use gl_render_target::glrt::render::{FormatTranslator, InternalFormat};

/// Sample counts a multisampled image can have, smallest first
const MULTISAMPLE_COUNTS: [u32; 6] = [2, 4, 8, 16, 32, 64];

/// Native candidates for each portable format, preferred first
///
/// The first candidate is the exact match. Later ones are supersets used when
/// the device cannot render to the exact one.
fn candidates(format: InternalFormat) -> &'static [vk::Format] {
    match format {
        InternalFormat::NONE => &[],
        InternalFormat::RGBA4 => &[vk::Format::R4G4B4A4_UNORM_PACK16, vk::Format::R8G8B8A8_UNORM],
        InternalFormat::RGB5_A1 => &[
            vk::Format::R5G5B5A1_UNORM_PACK16,
            vk::Format::A1R5G5B5_UNORM_PACK16,
            vk::Format::R8G8B8A8_UNORM,
        ],
        InternalFormat::RGB565 => &[vk::Format::R5G6B5_UNORM_PACK16, vk::Format::R8G8B8A8_UNORM],
        // R8G8B8_UNORM is not color-renderable in practice
        InternalFormat::RGB8 => &[vk::Format::R8G8B8A8_UNORM],
        InternalFormat::RGBA8 => &[vk::Format::R8G8B8A8_UNORM],
        InternalFormat::BGRA8 => &[vk::Format::B8G8R8A8_UNORM, vk::Format::R8G8B8A8_UNORM],
        InternalFormat::SRGB8_ALPHA8 => &[vk::Format::R8G8B8A8_SRGB],
        InternalFormat::RGB10_A2 => &[vk::Format::A2B10G10R10_UNORM_PACK32],
        InternalFormat::R8 => &[vk::Format::R8_UNORM],
        InternalFormat::RG8 => &[vk::Format::R8G8_UNORM],
        InternalFormat::R16F => &[vk::Format::R16_SFLOAT],
        InternalFormat::RG16F => &[vk::Format::R16G16_SFLOAT],
        InternalFormat::RGBA16F => &[vk::Format::R16G16B16A16_SFLOAT],
        InternalFormat::R32F => &[vk::Format::R32_SFLOAT],
        InternalFormat::RGBA32F => &[vk::Format::R32G32B32A32_SFLOAT],
        InternalFormat::R11F_G11F_B10F => &[vk::Format::B10G11R11_UFLOAT_PACK32, vk::Format::R16G16B16A16_SFLOAT],
        InternalFormat::DEPTH_COMPONENT16 => &[vk::Format::D16_UNORM, vk::Format::D32_SFLOAT],
        InternalFormat::DEPTH_COMPONENT24 => &[vk::Format::X8_D24_UNORM_PACK32, vk::Format::D32_SFLOAT],
        InternalFormat::DEPTH_COMPONENT32F => &[vk::Format::D32_SFLOAT],
        InternalFormat::DEPTH24_STENCIL8 => &[vk::Format::D24_UNORM_S8_UINT, vk::Format::D32_SFLOAT_S8_UINT],
        InternalFormat::DEPTH32F_STENCIL8 => &[vk::Format::D32_SFLOAT_S8_UINT],
        InternalFormat::STENCIL_INDEX8 => &[
            vk::Format::S8_UINT,
            vk::Format::D24_UNORM_S8_UINT,
            vk::Format::D32_SFLOAT_S8_UINT,
        ],
    }
}

/// True for formats that carry a depth or stencil aspect
pub fn is_depth_stencil_format(format: vk::Format) -> bool {
    matches!(
        format,
        vk::Format::D16_UNORM
            | vk::Format::X8_D24_UNORM_PACK32
            | vk::Format::D32_SFLOAT
            | vk::Format::S8_UINT
            | vk::Format::D16_UNORM_S8_UINT
            | vk::Format::D24_UNORM_S8_UINT
            | vk::Format::D32_SFLOAT_S8_UINT
    )
}

/// Image aspects of a native format
pub fn aspect_mask(format: vk::Format) -> vk::ImageAspectFlags {
    match format {
        vk::Format::D16_UNORM | vk::Format::X8_D24_UNORM_PACK32 | vk::Format::D32_SFLOAT => {
            vk::ImageAspectFlags::DEPTH
        }
        vk::Format::S8_UINT => vk::ImageAspectFlags::STENCIL,
        vk::Format::D16_UNORM_S8_UINT | vk::Format::D24_UNORM_S8_UINT | vk::Format::D32_SFLOAT_S8_UINT => {
            vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL
        }
        _ => vk::ImageAspectFlags::COLOR,
    }
}

/// Attachment usage an image of `format` is created with
pub fn attachment_usage(format: vk::Format) -> vk::ImageUsageFlags {
    if is_depth_stencil_format(format) {
        vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_DST
    } else {
        vk::ImageUsageFlags::COLOR_ATTACHMENT
            | vk::ImageUsageFlags::TRANSFER_SRC
            | vk::ImageUsageFlags::TRANSFER_DST
    }
}

/// Nearest sample count in `supported` for a request
///
/// A request of 0 always succeeds with 0 (single-sampled). Any other request
/// gets the smallest multisampled count not below it, or `None` when the
/// device has none that large.
pub fn nearest_sample_count(supported: vk::SampleCountFlags, requested: u32) -> Option<u32> {
    if requested == 0 {
        return Some(0);
    }

    MULTISAMPLE_COUNTS
        .iter()
        .copied()
        .filter(|&count| count >= requested)
        .find(|&count| supported.contains(vk::SampleCountFlags::from_raw(count)))
}

/// Formats the device can render to with optimal tiling
#[derive(Debug, Clone, Default)]
pub struct VulkanFormatCaps {
    /// Client version whose formats are exposed
    pub client_version: ClientVersion,
    color: FxHashSet<vk::Format>,
    depth_stencil: FxHashSet<vk::Format>,
}

impl VulkanFormatCaps {
    /// Caps from explicit format lists
    pub fn from_formats(
        client_version: ClientVersion,
        color: impl IntoIterator<Item = vk::Format>,
        depth_stencil: impl IntoIterator<Item = vk::Format>,
    ) -> Self {
        Self {
            client_version,
            color: color.into_iter().collect(),
            depth_stencil: depth_stencil.into_iter().collect(),
        }
    }

    /// Probe every candidate format on a physical device
    pub(crate) fn probe(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        client_version: ClientVersion,
    ) -> Self {
        let mut caps = Self {
            client_version,
            ..Self::default()
        };

        for format in InternalFormat::ALL.iter().flat_map(|&format| candidates(format)) {
            let properties = unsafe {
                instance.get_physical_device_format_properties(physical_device, *format)
            };
            let features = properties.optimal_tiling_features;

            if features.contains(vk::FormatFeatureFlags::COLOR_ATTACHMENT) {
                caps.color.insert(*format);
            }
            if features.contains(vk::FormatFeatureFlags::DEPTH_STENCIL_ATTACHMENT) {
                caps.depth_stencil.insert(*format);
            }
        }

        caps
    }

    /// True if `format` can be rendered to in its natural attachment role
    pub fn supports(&self, format: vk::Format) -> bool {
        if is_depth_stencil_format(format) {
            self.depth_stencil.contains(&format)
        } else {
            self.color.contains(&format)
        }
    }

    /// Number of renderable formats found
    pub fn len(&self) -> usize {
        self.color.len() + self.depth_stencil.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Format translator of the Vulkan backend
#[derive(Debug, Clone, Copy, Default)]
pub struct VulkanFormats;

impl FormatTranslator for VulkanFormats {
    type NativeFormat = vk::Format;
    type Multisample = vk::SampleCountFlags;
    type Caps = VulkanFormatCaps;

    fn render_format(&self, format: InternalFormat, caps: &VulkanFormatCaps) -> vk::Format {
        // Formats the client version does not know have no native counterpart
        if !format.is_supported(caps.client_version) {
            return vk::Format::UNDEFINED;
        }

        candidates(format)
            .iter()
            .copied()
            .find(|&native| caps.supports(native))
            .unwrap_or(vk::Format::UNDEFINED)
    }

    fn internal_format(&self, native: vk::Format) -> InternalFormat {
        match native {
            vk::Format::R4G4B4A4_UNORM_PACK16 => InternalFormat::RGBA4,
            vk::Format::R5G5B5A1_UNORM_PACK16 | vk::Format::A1R5G5B5_UNORM_PACK16 => InternalFormat::RGB5_A1,
            vk::Format::R5G6B5_UNORM_PACK16 => InternalFormat::RGB565,
            vk::Format::R8G8B8A8_UNORM => InternalFormat::RGBA8,
            vk::Format::B8G8R8A8_UNORM => InternalFormat::BGRA8,
            vk::Format::R8G8B8A8_SRGB => InternalFormat::SRGB8_ALPHA8,
            vk::Format::A2B10G10R10_UNORM_PACK32 => InternalFormat::RGB10_A2,
            vk::Format::R8_UNORM => InternalFormat::R8,
            vk::Format::R8G8_UNORM => InternalFormat::RG8,
            vk::Format::R16_SFLOAT => InternalFormat::R16F,
            vk::Format::R16G16_SFLOAT => InternalFormat::RG16F,
            vk::Format::R16G16B16A16_SFLOAT => InternalFormat::RGBA16F,
            vk::Format::R32_SFLOAT => InternalFormat::R32F,
            vk::Format::R32G32B32A32_SFLOAT => InternalFormat::RGBA32F,
            vk::Format::B10G11R11_UFLOAT_PACK32 => InternalFormat::R11F_G11F_B10F,
            vk::Format::D16_UNORM => InternalFormat::DEPTH_COMPONENT16,
            vk::Format::X8_D24_UNORM_PACK32 => InternalFormat::DEPTH_COMPONENT24,
            vk::Format::D32_SFLOAT => InternalFormat::DEPTH_COMPONENT32F,
            vk::Format::D24_UNORM_S8_UINT => InternalFormat::DEPTH24_STENCIL8,
            vk::Format::D32_SFLOAT_S8_UINT => InternalFormat::DEPTH32F_STENCIL8,
            vk::Format::S8_UINT => InternalFormat::STENCIL_INDEX8,
            _ => InternalFormat::NONE,
        }
    }

    fn multisample(&self, samples: u32) -> vk::SampleCountFlags {
        match samples {
            0 | 1 => vk::SampleCountFlags::TYPE_1,
            n => vk::SampleCountFlags::from_raw(n.next_power_of_two().min(64)),
        }
    }

    fn sample_count(&self, multisample: vk::SampleCountFlags) -> u32 {
        if multisample == vk::SampleCountFlags::TYPE_1 || multisample.is_empty() {
            0
        } else {
            multisample.as_raw()
        }
    }
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
