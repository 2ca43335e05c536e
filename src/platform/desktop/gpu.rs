//=========================================================================
// Surface Presenter
//=========================================================================
//
// Owns the wgpu objects needed to put the CPU framebuffer on screen.
//
// Per frame:
//   get_current_texture() → write_texture(framebuffer bytes) → submit → present
//
// The surface is configured with COPY_DST so the framebuffer can be
// uploaded straight into the swapchain texture without a render pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, error, info, warn};
use wgpu::SurfaceError;
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::PlatformInitError;
use crate::platform::raster::Framebuffer;

//=== FrameStatus =========================================================

/// Outcome of a present attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum FrameStatus {
    Presented,
    /// Transient or recoverable surface state; try again next frame.
    Skipped,
    /// The surface cannot be used any more (commonly out of memory).
    Fatal,
}

//=== ChannelOrder ========================================================

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ChannelOrder {
    Bgra,
    Rgba,
}

impl ChannelOrder {
    fn of(format: wgpu::TextureFormat) -> Option<Self> {
        use wgpu::TextureFormat::*;
        match format {
            Bgra8Unorm | Bgra8UnormSrgb => Some(Self::Bgra),
            Rgba8Unorm | Rgba8UnormSrgb => Some(Self::Rgba),
            _ => None,
        }
    }
}

//=== Pixel Encoding ======================================================

/// Converts packed ARGB pixels into `order`'s byte layout, replacing the
/// contents of `dst`.
fn encode_pixels(order: ChannelOrder, src: &[u32], dst: &mut Vec<u8>) {
    dst.clear();
    dst.reserve(src.len() * 4);

    for &argb in src {
        let [a, r, g, b] = argb.to_be_bytes();
        match order {
            ChannelOrder::Bgra => dst.extend_from_slice(&[b, g, r, a]),
            ChannelOrder::Rgba => dst.extend_from_slice(&[r, g, b, a]),
        }
    }
}

//=== Presenter ===========================================================

pub(super) struct Presenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    channel_order: ChannelOrder,
    staging: Vec<u8>,
}

impl Presenter {
    /// Binds a presentation surface to `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; this blocks.
    pub(super) fn new(window: Arc<Window>) -> Result<Self, PlatformInitError> {
        pollster::block_on(Self::new_async(window))
    }

    async fn new_async(window: Arc<Window>) -> Result<Self, PlatformInitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| PlatformInitError::SurfaceAcquisition(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformInitError::DeviceInit(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("pong device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| PlatformInitError::DeviceInit(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(PlatformInitError::SurfaceAcquisition(
                "surface does not accept texture uploads".into(),
            ));
        }

        let (format, channel_order) = caps
            .formats
            .iter()
            .find_map(|&f| ChannelOrder::of(f).map(|order| (f, order)))
            .ok_or_else(|| {
                PlatformInitError::SurfaceAcquisition("no 8-bit RGBA/BGRA surface format".into())
            })?;

        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Cadence comes from the frame engine's tick pacing, not vsync.
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        info!(
            target: "platform::gpu",
            "Surface configured: {:?} {}x{}",
            format,
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            channel_order,
            staging: Vec::new(),
        })
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu rejects 0x0 surfaces (minimized windows); those are skipped
    /// until a usable size arrives.
    pub(super) fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(target: "platform::gpu", "Ignoring zero-sized surface");
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Uploads `framebuffer` into the next swapchain texture and presents it.
    pub(super) fn present(&mut self, framebuffer: &Framebuffer) -> FrameStatus {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => return self.handle_surface_error(e),
        };

        let width = framebuffer.width().min(frame.texture.width());
        let height = framebuffer.height().min(frame.texture.height());
        if width == 0 || height == 0 {
            return FrameStatus::Skipped;
        }

        encode_pixels(self.channel_order, framebuffer.pixels(), &mut self.staging);

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &frame.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.staging,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(framebuffer.width() * 4),
                rows_per_image: Some(framebuffer.height()),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::empty());
        frame.present();

        FrameStatus::Presented
    }

    fn handle_surface_error(&mut self, err: SurfaceError) -> FrameStatus {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                warn!(target: "platform::gpu", "Surface {:?}, reconfiguring", err);
                self.surface.configure(&self.device, &self.config);
                FrameStatus::Skipped
            }
            SurfaceError::OutOfMemory => {
                error!(target: "platform::gpu", "Surface out of memory");
                FrameStatus::Fatal
            }
            SurfaceError::Timeout | SurfaceError::Other => {
                debug!(target: "platform::gpu", "Surface {:?}, skipping frame", err);
                FrameStatus::Skipped
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_order_covers_8bit_formats() {
        use wgpu::TextureFormat::*;
        assert_eq!(ChannelOrder::of(Bgra8Unorm), Some(ChannelOrder::Bgra));
        assert_eq!(ChannelOrder::of(Bgra8UnormSrgb), Some(ChannelOrder::Bgra));
        assert_eq!(ChannelOrder::of(Rgba8Unorm), Some(ChannelOrder::Rgba));
        assert_eq!(ChannelOrder::of(Rgba8UnormSrgb), Some(ChannelOrder::Rgba));
        assert_eq!(ChannelOrder::of(Rgba16Float), None);
    }

    #[test]
    fn encode_pixels_reorders_channels() {
        let src = [0x8011_2233, 0xFFFF_0000];
        let mut dst = Vec::new();

        encode_pixels(ChannelOrder::Bgra, &src, &mut dst);
        assert_eq!(dst, vec![0x33, 0x22, 0x11, 0x80, 0x00, 0x00, 0xFF, 0xFF]);

        encode_pixels(ChannelOrder::Rgba, &src, &mut dst);
        assert_eq!(
            dst,
            vec![0x11, 0x22, 0x33, 0x80, 0xFF, 0x00, 0x00, 0xFF],
            "Previous contents are replaced"
        );
    }

    #[test]
    fn encode_pixels_of_empty_frame_clears_staging() {
        let mut dst = vec![1, 2, 3];
        encode_pixels(ChannelOrder::Rgba, &[], &mut dst);
        assert!(dst.is_empty());
    }
}
