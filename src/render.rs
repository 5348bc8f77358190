use crate::texture::BadgeBitmap;
use globe_core::{Badge, RenderState};
use web_sys as web;

mod billboards;
mod helpers;

use billboards::{create_billboard_resources, BillboardResources, BillboardUniforms, InstanceRaw};

// ===================== Badge textures =====================

/// GPU copy of one badge bitmap plus its texture bind group.
pub struct BadgeTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Uploads badge bitmaps outside the frame loop. Holds cloned device handles.
#[derive(Clone)]
pub struct BadgeUploader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl BadgeUploader {
    pub fn upload(&self, bitmap: &BadgeBitmap, label: &str) -> BadgeTexture {
        let (texture, view) = helpers::create_badge_texture(&self.device, label, bitmap.width, bitmap.height);
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * bitmap.width),
                rows_per_image: Some(bitmap.height),
            },
            wgpu::Extent3d {
                width: bitmap.width,
                height: bitmap.height,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        BadgeTexture {
            _texture: texture,
            bind_group,
        }
    }
}

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    billboards: BillboardResources,
    instances: Vec<InstanceRaw>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let fallback_format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(fallback_format);
        // The page shows through everywhere the globe does not draw.
        let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            log::warn!("[gpu] premultiplied alpha unavailable; canvas will be opaque");
            caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let billboards = create_billboard_resources(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            billboards,
            instances: Vec::new(),
            width,
            height,
        })
    }

    pub fn uploader(&self) -> BadgeUploader {
        BadgeUploader {
            device: self.device.clone(),
            queue: self.queue.clone(),
            layout: self.billboards.texture_layout.clone(),
            sampler: self.billboards.sampler.clone(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure after the surface was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        state: &RenderState,
        badges: &[Badge<BadgeTexture>],
    ) -> Result<(), wgpu::SurfaceError> {
        self.instances.clear();
        self.instances
            .extend(state.instances.iter().filter(|i| i.badge < badges.len()).map(InstanceRaw::from));
        self.billboards.ensure_capacity(&self.device, self.instances.len());

        let uniforms = BillboardUniforms::new(state.view, state.proj);
        self.queue
            .write_buffer(&self.billboards.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        if !self.instances.is_empty() {
            self.queue.write_buffer(
                &self.billboards.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.billboards.pipeline);
            rpass.set_bind_group(0, &self.billboards.uniform_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.billboards.instance_buffer.slice(..));
            // Instances are sorted far to near; each badge binds its own texture.
            let drawn = state.instances.iter().filter(|i| i.badge < badges.len());
            for (slot, inst) in drawn.enumerate() {
                let slot = slot as u32;
                rpass.set_bind_group(1, &badges[inst.badge].texture.bind_group, &[]);
                rpass.draw(0..6, slot..slot + 1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
