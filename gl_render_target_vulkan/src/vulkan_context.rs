/// GpuContext - Vulkan objects shared by the backend and every surface
///
/// Contains everything a surface needs to free itself:
/// - Device for Vulkan API calls
/// - Allocator for memory management
/// - The instance (and debug messenger) the device was created from

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use std::mem::ManuallyDrop;
use std::sync::{Mutex, PoisonError};

/// Shared GPU context for the backend and all surfaces
///
/// Shared via `Arc`. The last owner (backend or surface, whichever goes last)
/// tears down the allocator, the device and the instance, in that order, so a
/// surface can outlive the backend that created it.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator (requires mutex for thread safety)
    /// Wrapped in ManuallyDrop so it is dropped BEFORE the device is destroyed
    pub allocator: ManuallyDrop<Mutex<Allocator>>,

    /// Physical device the logical device runs on
    pub physical_device: vk::PhysicalDevice,

    /// Graphics queue family index
    pub graphics_queue_family: u32,

    /// Vulkan instance
    pub instance: ash::Instance,

    /// Debug utils loader and messenger (only with validation enabled)
    pub(crate) debug_messenger: Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,

    /// Vulkan library entry, must outlive the instance
    _entry: ash::Entry,
}

impl GpuContext {
    /// Create a new GPU context taking ownership of the given objects
    pub fn new(
        entry: ash::Entry,
        instance: ash::Instance,
        physical_device: vk::PhysicalDevice,
        device: ash::Device,
        graphics_queue_family: u32,
        allocator: Allocator,
        debug_messenger: Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,
    ) -> Self {
        Self {
            device,
            allocator: ManuallyDrop::new(Mutex::new(allocator)),
            physical_device,
            graphics_queue_family,
            instance,
            debug_messenger,
            _entry: entry,
        }
    }

    /// Lock the allocator, recovering it if a previous holder panicked
    pub fn lock_allocator(&self) -> std::sync::MutexGuard<'_, Allocator> {
        self.allocator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        unsafe {
            // Wait for device to finish
            self.device.device_wait_idle().ok();

            // 1. Drop allocator: free VkDeviceMemory blocks BEFORE destroying device
            ManuallyDrop::drop(&mut self.allocator);

            // 2. Destroy device
            self.device.destroy_device(None);

            // 3. Destroy debug messenger BEFORE instance
            if let Some((debug_utils, messenger)) = self.debug_messenger.take() {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            }

            // 4. Destroy instance
            self.instance.destroy_instance(None);
        }
    }
}
