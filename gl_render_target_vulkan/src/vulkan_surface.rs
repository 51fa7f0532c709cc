/// VulkanSurface - one Vulkan image bound to its own memory allocation

use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Native surface of the Vulkan backend
///
/// Owns the image and its memory; both are freed when the last
/// `SurfaceRef` to the surface is released.
pub struct VulkanSurface {
    /// Vulkan image
    pub(crate) image: vk::Image,
    /// GPU memory allocation
    pub(crate) allocation: Option<Allocation>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) format: vk::Format,
    pub(crate) samples: vk::SampleCountFlags,
    pub(crate) usage: vk::ImageUsageFlags,
    /// Shared context (for cleanup)
    pub(crate) context: Arc<GpuContext>,
}

impl VulkanSurface {
    /// Vulkan image handle, for building image views and framebuffers
    pub fn image(&self) -> vk::Image {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native pixel format
    pub fn format(&self) -> vk::Format {
        self.format
    }

    /// Native sample count flag (`TYPE_1` when single-sampled)
    pub fn samples(&self) -> vk::SampleCountFlags {
        self.samples
    }

    /// Usage flags the image was created with
    pub fn usage(&self) -> vk::ImageUsageFlags {
        self.usage
    }

    /// Size of the backing memory in bytes
    pub fn memory_size(&self) -> u64 {
        self.allocation.as_ref().map_or(0, Allocation::size)
    }
}

impl std::fmt::Debug for VulkanSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VulkanSurface")
            .field("image", &self.image)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("samples", &self.samples)
            .finish()
    }
}

impl Drop for VulkanSurface {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                self.context.lock_allocator().free(allocation).ok();
            }

            // Destroy image
            self.context.device.destroy_image(self.image, None);
        }
    }
}
