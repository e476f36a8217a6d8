/// Device and queue without a window or surface.
///
/// The scene manager only needs GPU memory for textures, so a surface-less
/// device is enough for loading, binding and releasing them.
#[derive(Debug, Clone)]
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub async fn headless() -> anyhow::Result<Self> {
        // The instance is a handle to our GPU
        let instance = wgpu::Instance::default();

        log::info!("requesting adapter");
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("device and queue on {}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene device"),
                ..Default::default()
            })
            .await?;

        Ok(Self { device, queue })
    }
}
