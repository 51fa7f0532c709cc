/// VulkanBackend - Vulkan implementation of the BackendContext trait

use ash::vk;
use gl_render_target::glrt::{ClientVersion, Config, Error, Result};
use gl_render_target::glrt::render::{BackendContext, SurfaceDesc, SurfaceRef};
use gl_render_target::{rt_debug, rt_error, rt_info, rt_trace, rt_warn};
use gpu_allocator::vulkan::{AllocationCreateDesc, AllocationScheme, Allocator, AllocatorCreateDesc};
use gpu_allocator::MemoryLocation;
use rustc_hash::FxHashMap;
use std::ffi::CString;
use std::sync::{Arc, Mutex, PoisonError};

use crate::vulkan_context::GpuContext;
use crate::vulkan_error::{allocation_error_to_vk, VulkanError};
use crate::vulkan_format::{attachment_usage, is_depth_stencil_format, nearest_sample_count, VulkanFormatCaps, VulkanFormats};
use crate::vulkan_surface::VulkanSurface;

const SOURCE: &str = "glrt::vulkan";

/// Headless Vulkan device serving render targets
///
/// Owns no window, surface or swapchain: it only creates images usable as
/// framebuffer attachments.
pub struct VulkanBackend {
    /// Shared GPU context (also held by every surface)
    context: Arc<GpuContext>,
    formats: VulkanFormats,
    caps: VulkanFormatCaps,
    client_version: ClientVersion,
    /// Sample counts supported per (format, usage), filled on first query
    sample_support: Mutex<FxHashMap<(vk::Format, vk::ImageUsageFlags), Option<vk::SampleCountFlags>>>,
}

impl VulkanBackend {
    /// Bring up a headless Vulkan device
    ///
    /// Picks the first physical device with a graphics queue.
    pub fn new(config: Config) -> Result<Self> {
        unsafe {
            // Create Vulkan Entry
            let entry = ash::Entry::load()
                .map_err(|e| {
                    rt_error!(SOURCE, "Failed to load Vulkan library: {:?}", e);
                    Error::InitializationFailed(format!("Failed to load Vulkan library: {:?}", e))
                })?;

            // Application Info
            let app_name = CString::new(config.app_name.as_str())
                .map_err(|e| Error::InitializationFailed(format!("Invalid application name: {}", e)))?;
            let (major, minor, patch) = config.app_version;
            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, major, minor, patch))
                .engine_name(c"gl_render_target")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_1);

            let validation = Self::validation_enabled(&config);

            let mut extension_names = Vec::new();
            let mut layer_names = Vec::new();
            if validation {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
                layer_names.push(c"VK_LAYER_KHRONOS_validation".as_ptr());
            }

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry
                .create_instance(&create_info, None)
                .map_err(|e| {
                    rt_error!(SOURCE, "Failed to create Vulkan instance: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create instance: {:?}", e))
                })?;

            let debug_messenger = if validation {
                Self::create_debug_messenger(&entry, &instance, &config)
            } else {
                None
            };

            // From here on, failures must tear down what was created
            let destroy_instance = |debug_messenger: Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>| {
                if let Some((debug_utils, messenger)) = debug_messenger {
                    debug_utils.destroy_debug_utils_messenger(messenger, None);
                }
                instance.destroy_instance(None);
            };

            let (physical_device, graphics_family_index) = match Self::pick_physical_device(&instance) {
                Ok(picked) => picked,
                Err(e) => {
                    destroy_instance(debug_messenger);
                    return Err(e);
                }
            };

            // Create Logical Device (one graphics queue, no extensions)
            let queue_priorities = [1.0];
            let queue_create_infos = [
                vk::DeviceQueueCreateInfo::default()
                    .queue_family_index(graphics_family_index)
                    .queue_priorities(&queue_priorities),
            ];
            let device_features = vk::PhysicalDeviceFeatures::default();
            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos)
                .enabled_features(&device_features);

            let device = match instance.create_device(physical_device, &device_create_info, None) {
                Ok(device) => device,
                Err(e) => {
                    rt_error!(SOURCE, "Failed to create logical device: {:?}", e);
                    destroy_instance(debug_messenger);
                    return Err(Error::InitializationFailed(format!("Failed to create device: {:?}", e)));
                }
            };

            // Create GPU allocator
            let allocator = match Allocator::new(&AllocatorCreateDesc {
                instance: instance.clone(),
                device: device.clone(),
                physical_device,
                debug_settings: Default::default(),
                buffer_device_address: false,
                allocation_sizes: Default::default(),
            }) {
                Ok(allocator) => allocator,
                Err(e) => {
                    rt_error!(SOURCE, "Failed to create GPU allocator: {:?}", e);
                    device.destroy_device(None);
                    destroy_instance(debug_messenger);
                    return Err(Error::InitializationFailed(format!("Failed to create allocator: {:?}", e)));
                }
            };

            let caps = VulkanFormatCaps::probe(&instance, physical_device, config.client_version);

            let properties = instance.get_physical_device_properties(physical_device);
            let device_name = properties
                .device_name_as_c_str()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "Unknown device".to_string());
            rt_info!(SOURCE, "Vulkan backend ready on {} (ES {}, {} renderable formats, validation {})",
                device_name, config.client_version.major(), caps.len(), validation);

            let context = Arc::new(GpuContext::new(
                entry,
                instance,
                physical_device,
                device,
                graphics_family_index,
                allocator,
                debug_messenger,
            ));

            Ok(Self {
                context,
                formats: VulkanFormats,
                caps,
                client_version: config.client_version,
                sample_support: Mutex::new(FxHashMap::default()),
            })
        }
    }

    /// Shared GPU context
    pub fn context(&self) -> &Arc<GpuContext> {
        &self.context
    }

    #[cfg(feature = "vulkan-validation")]
    fn validation_enabled(config: &Config) -> bool {
        config.enable_validation
    }

    #[cfg(not(feature = "vulkan-validation"))]
    fn validation_enabled(config: &Config) -> bool {
        if config.enable_validation {
            rt_warn!(SOURCE, "Validation requested but the crate was built without the vulkan-validation feature");
        }
        false
    }

    #[cfg(feature = "vulkan-validation")]
    unsafe fn create_debug_messenger(
        entry: &ash::Entry,
        instance: &ash::Instance,
        config: &Config,
    ) -> Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)> {
        let debug_utils = ash::ext::debug_utils::Instance::new(entry, instance);
        let debug_info = crate::debug::messenger_create_info(config.debug_severity);

        match debug_utils.create_debug_utils_messenger(&debug_info, None) {
            Ok(messenger) => Some((debug_utils, messenger)),
            Err(e) => {
                // Validation is a debugging aid; the device works without it
                rt_warn!(SOURCE, "Failed to create debug messenger: {:?}", e);
                None
            }
        }
    }

    #[cfg(not(feature = "vulkan-validation"))]
    unsafe fn create_debug_messenger(
        _entry: &ash::Entry,
        _instance: &ash::Instance,
        _config: &Config,
    ) -> Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)> {
        None
    }

    /// First physical device with a graphics queue family
    unsafe fn pick_physical_device(instance: &ash::Instance) -> Result<(vk::PhysicalDevice, u32)> {
        let physical_devices = instance
            .enumerate_physical_devices()
            .map_err(|e| {
                rt_error!(SOURCE, "Failed to enumerate physical devices: {:?}", e);
                Error::InitializationFailed(format!("Failed to enumerate physical devices: {:?}", e))
            })?;

        physical_devices
            .into_iter()
            .find_map(|physical_device| {
                instance
                    .get_physical_device_queue_family_properties(physical_device)
                    .iter()
                    .position(|qf| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS))
                    .map(|index| (physical_device, index as u32))
            })
            .ok_or_else(|| {
                rt_error!(SOURCE, "No Vulkan-capable GPU with a graphics queue found");
                Error::InitializationFailed("No Vulkan-capable GPU found".to_string())
            })
    }

    /// Sample counts the device supports for images of `format` and `usage`
    ///
    /// `None` when the format cannot be used that way at all.
    fn supported_sample_counts(&self, format: vk::Format, usage: vk::ImageUsageFlags) -> Option<vk::SampleCountFlags> {
        let mut cache = self.sample_support.lock().unwrap_or_else(PoisonError::into_inner);
        *cache.entry((format, usage)).or_insert_with(|| {
            let properties = unsafe {
                self.context.instance.get_physical_device_image_format_properties(
                    self.context.physical_device,
                    format,
                    vk::ImageType::TYPE_2D,
                    vk::ImageTiling::OPTIMAL,
                    usage,
                    vk::ImageCreateFlags::empty(),
                )
            };

            match properties {
                Ok(properties) => Some(properties.sample_counts),
                Err(e) => {
                    rt_trace!(SOURCE, "{:?} not usable as {:?}: {:?}", format, usage, e);
                    None
                }
            }
        })
    }

    /// Create an attachment image and bind fresh device memory to it
    fn create_surface(
        &self,
        width: u32,
        height: u32,
        format: vk::Format,
        samples: vk::SampleCountFlags,
        usage: vk::ImageUsageFlags,
        name: &str,
    ) -> std::result::Result<SurfaceRef<VulkanSurface>, VulkanError> {
        let device = &self.context.device;

        unsafe {
            let image_create_info = vk::ImageCreateInfo::default()
                .image_type(vk::ImageType::TYPE_2D)
                .format(format)
                .extent(vk::Extent3D {
                    width,
                    height,
                    depth: 1,
                })
                .mip_levels(1)
                .array_layers(1)
                .samples(samples)
                .tiling(vk::ImageTiling::OPTIMAL)
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE)
                .initial_layout(vk::ImageLayout::UNDEFINED);

            let image = device.create_image(&image_create_info, None)?;

            // Allocate memory
            let requirements = device.get_image_memory_requirements(image);
            let allocation = self.context.lock_allocator().allocate(&AllocationCreateDesc {
                name,
                requirements,
                location: MemoryLocation::GpuOnly,
                linear: false,
                allocation_scheme: AllocationScheme::GpuAllocatorManaged,
            });

            let allocation = match allocation {
                Ok(allocation) => allocation,
                Err(e) => {
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    rt_debug!(SOURCE, "Allocation of {:.2} MB for {}x{} {:?} failed: {:?}",
                        size_mb, width, height, format, e);
                    device.destroy_image(image, None);
                    return Err(VulkanError(allocation_error_to_vk(&e)));
                }
            };

            // Bind memory
            if let Err(e) = device.bind_image_memory(image, allocation.memory(), allocation.offset()) {
                self.context.lock_allocator().free(allocation).ok();
                device.destroy_image(image, None);
                return Err(VulkanError(e));
            }

            Ok(SurfaceRef::new(VulkanSurface {
                image,
                allocation: Some(allocation),
                width,
                height,
                format,
                samples,
                usage,
                context: Arc::clone(&self.context),
            }))
        }
    }
}

impl BackendContext for VulkanBackend {
    type Formats = VulkanFormats;
    type Surface = VulkanSurface;
    type Device = ash::Device;
    type Error = VulkanError;

    fn formats(&self) -> &VulkanFormats {
        &self.formats
    }

    fn caps(&self) -> &VulkanFormatCaps {
        &self.caps
    }

    fn device(&self) -> &ash::Device {
        &self.context.device
    }

    fn client_version(&self) -> ClientVersion {
        self.client_version
    }

    fn describe_surface(&self, surface: &VulkanSurface) -> SurfaceDesc<vk::Format, vk::SampleCountFlags> {
        SurfaceDesc {
            width: surface.width,
            height: surface.height,
            format: surface.format,
            multisample: surface.samples,
        }
    }

    fn nearest_supported_samples(&self, format: vk::Format, requested: u32) -> Option<u32> {
        if format == vk::Format::UNDEFINED {
            return None;
        }

        let supported = self.supported_sample_counts(format, attachment_usage(format))?;
        nearest_sample_count(supported, requested)
    }

    fn create_color_surface(
        &self,
        width: u32,
        height: u32,
        format: vk::Format,
        multisample: vk::SampleCountFlags,
    ) -> std::result::Result<SurfaceRef<VulkanSurface>, VulkanError> {
        if is_depth_stencil_format(format) {
            return Err(VulkanError(vk::Result::ERROR_FORMAT_NOT_SUPPORTED));
        }
        self.create_surface(width, height, format, multisample, attachment_usage(format), "color render target")
    }

    fn create_depth_stencil_surface(
        &self,
        width: u32,
        height: u32,
        format: vk::Format,
        multisample: vk::SampleCountFlags,
    ) -> std::result::Result<SurfaceRef<VulkanSurface>, VulkanError> {
        if !is_depth_stencil_format(format) {
            return Err(VulkanError(vk::Result::ERROR_FORMAT_NOT_SUPPORTED));
        }
        self.create_surface(width, height, format, multisample, attachment_usage(format), "depth/stencil render target")
    }
}
