use super::camera::Camera;
use super::context::GpuContext;
use super::mesh::{Mesh, MeshBuilder};
use super::pipeline::{ShapePipeline, Uniforms};
use crate::creature::Shape;

/// Canvas background, (40, 44, 52).
pub const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 40.0 / 255.0,
    g: 44.0 / 255.0,
    b: 52.0 / 255.0,
    a: 1.0,
};

pub struct ShapeRenderer {
    pipeline: ShapePipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    builder: MeshBuilder,
}

impl ShapeRenderer {
    pub fn new(context: &GpuContext) -> Self {
        let pipeline = ShapePipeline::new(context);

        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = pipeline.create_bind_group(&context.device, &uniform_buffer);

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            builder: MeshBuilder::new(),
        }
    }

    /// Clears `view` to the background and draws `shapes` back to front.
    pub fn render(
        &mut self,
        context: &GpuContext,
        view: &wgpu::TextureView,
        camera: &Camera,
        shapes: &[Shape],
    ) {
        let uniforms = Uniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
        };
        context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.builder.clear();
        self.builder.tessellate(shapes);
        let mesh = (!self.builder.is_empty())
            .then(|| Mesh::from_builder(&context.device, &self.builder));

        let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Shape Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shape Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(mesh) = &mesh {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }
}
