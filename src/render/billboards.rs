use super::helpers;
use crate::constants::INITIAL_INSTANCE_CAPACITY;
use globe_core::BillboardInstance;
use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BillboardUniforms {
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
}

impl BillboardUniforms {
    pub(crate) fn new(view: Mat4, proj: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    pub(crate) center_opacity: [f32; 4],
    pub(crate) size: [f32; 2],
    pub(crate) _pad: [f32; 2],
}

impl From<&BillboardInstance> for InstanceRaw {
    fn from(inst: &BillboardInstance) -> Self {
        Self {
            center_opacity: [
                inst.position.x,
                inst.position.y,
                inst.position.z,
                inst.opacity.clamp(0.0, 1.0),
            ],
            size: inst.size.to_array(),
            _pad: [0.0; 2],
        }
    }
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x2];

pub(crate) struct BillboardResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bind_group: wgpu::BindGroup,
    /// Layout of the per-badge texture group (group 1).
    pub(crate) texture_layout: wgpu::BindGroupLayout,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_capacity: usize,
}

pub(crate) fn create_billboard_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> BillboardResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("badge_shader"),
        source: wgpu::ShaderSource::Wgsl(globe_core::BADGE_WGSL.into()),
    });
    let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("billboard_uniform_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("badge_texture_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("billboard_pl"),
        bind_group_layouts: &[&uniform_layout, &texture_layout],
        push_constant_ranges: &[],
    });
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    };
    let pipeline = helpers::make_billboard_pipeline(device, &pl, &shader, instance_layout, color_format);

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("billboard_uniforms"),
        size: std::mem::size_of::<BillboardUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("billboard_uniform_bg"),
        layout: &uniform_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    BillboardResources {
        pipeline,
        uniform_buffer,
        uniform_bind_group,
        texture_layout,
        sampler: helpers::create_linear_sampler(device),
        instance_buffer: helpers::create_instance_buffer(
            device,
            INITIAL_INSTANCE_CAPACITY,
            std::mem::size_of::<InstanceRaw>(),
        ),
        instance_capacity: INITIAL_INSTANCE_CAPACITY,
    }
}

impl BillboardResources {
    /// Grow the instance buffer (doubling) so it holds at least `count` instances.
    pub(crate) fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let mut cap = self.instance_capacity.max(1);
        while cap < count {
            cap *= 2;
        }
        log::debug!("[gpu] instance buffer {} -> {}", self.instance_capacity, cap);
        self.instance_buffer = helpers::create_instance_buffer(device, cap, std::mem::size_of::<InstanceRaw>());
        self.instance_capacity = cap;
    }
}
