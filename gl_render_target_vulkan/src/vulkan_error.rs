/// VulkanError - native error of the Vulkan surface creation calls

use ash::vk;
use gpu_allocator::AllocationError;
use gl_render_target::glrt::render::NativeError;
use std::fmt;

/// Failed Vulkan call, carrying the `VkResult` it returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VulkanError(pub vk::Result);

impl NativeError for VulkanError {
    fn is_out_of_memory(&self) -> bool {
        matches!(
            self.0,
            vk::Result::ERROR_OUT_OF_DEVICE_MEMORY | vk::Result::ERROR_OUT_OF_HOST_MEMORY
        )
    }
}

impl From<vk::Result> for VulkanError {
    fn from(result: vk::Result) -> Self {
        Self(result)
    }
}

/// `VkResult` equivalent of a memory allocator failure
///
/// Only running out of memory is recoverable. Every other allocator failure
/// (no compatible memory type, bad descriptor, mapping, driver error) maps to
/// `ERROR_UNKNOWN`.
pub fn allocation_error_to_vk(error: &AllocationError) -> vk::Result {
    match error {
        AllocationError::OutOfMemory => vk::Result::ERROR_OUT_OF_DEVICE_MEMORY,
        _ => vk::Result::ERROR_UNKNOWN,
    }
}

impl fmt::Display for VulkanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vulkan call failed: {:?}", self.0)
    }
}

impl std::error::Error for VulkanError {}
