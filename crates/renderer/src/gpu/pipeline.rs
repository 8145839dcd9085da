use std::borrow::Cow;

/// The complete scene shader.
///
/// The vertex stage generates the full-window quad procedurally: six indexed
/// vertices out of a four-corner table, no vertex buffer. It also applies the
/// transformation uniform so the fragment stage receives interpolated
/// fractal-space positions directly.
///
/// The fragment stage iterates `z <- z^2 + p` a fixed 256 times with no early
/// escape and classifies the point with a box test on both axes (|z.x| and
/// |z.y| each under 3). Escaped values saturate to infinity, which the
/// comparisons treat as outside the box. Pixels inside the selection
/// rectangle get their color inverted.
const SHADER_SOURCE: &str = r#"
struct SceneUniforms {
    transformation: vec4<f32>,
    selection: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) frag_position: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var corners = array<vec2<f32>, 4>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0,  1.0),
    );
    var indices = array<u32, 6>(0u, 1u, 2u, 3u, 2u, 1u);

    let p = corners[indices[vertex_index]];

    var out: VertexOutput;
    out.position = vec4<f32>(p, 0.0, 1.0);
    out.frag_position = scene.transformation.zw * p + scene.transformation.xy;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let p = in.frag_position;

    var color = vec3<f32>(0.0, 0.0, 0.5);

    var z = p;
    for (var i = 0; i < 256; i = i + 1) {
        z = vec2<f32>(z.x * z.x - z.y * z.y + p.x, 2.0 * z.x * z.y + p.y);
    }

    let limit = 3.0;
    if (-limit < z.x && z.x < limit && -limit < z.y && z.y < limit) {
        color = vec3<f32>(1.0);
    }

    if (scene.selection.x <= p.x && p.x <= scene.selection.z
        && scene.selection.y <= p.y && p.y <= scene.selection.w) {
        color = vec3<f32>(1.0) - color;
    }

    return vec4<f32>(color, 1.0);
}
"#;

/// The single render pipeline plus the bind group layout its uniform block
/// hangs off. Built once at startup and reused for every frame.
pub(crate) struct ScenePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_layout: wgpu::BindGroupLayout,
}

impl ScenePipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_layout,
        }
    }
}
