/*!
# GL Render Target - Vulkan Backend

Vulkan implementation of the gl_render_target backend interfaces.

This crate provides a headless Vulkan device that implements `BackendContext`
and `FormatTranslator` using the Ash library for Vulkan bindings and
gpu-allocator for memory management. Render targets on it are the core's
surface-backed targets instantiated for this backend.

With the `vulkan-validation` feature, validation layer messages are routed
into the gl_render_target logger.
*/

// Vulkan implementation modules
mod vulkan_backend;
mod vulkan_context;
mod vulkan_error;
mod vulkan_format;
mod vulkan_surface;
#[cfg(feature = "vulkan-validation")]
mod debug;

pub use vulkan_backend::VulkanBackend;
pub use vulkan_context::GpuContext;
pub use vulkan_error::{allocation_error_to_vk, VulkanError};
pub use vulkan_format::{
    aspect_mask, attachment_usage, is_depth_stencil_format, nearest_sample_count,
    VulkanFormatCaps, VulkanFormats,
};
pub use vulkan_surface::VulkanSurface;

/// Render target backed by a Vulkan image
pub type VulkanRenderTarget = gl_render_target::glrt::render::SurfaceRenderTarget<VulkanBackend>;
