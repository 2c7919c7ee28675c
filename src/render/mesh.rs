use crate::creature::{Color, Shape};
use bytemuck::{Pod, Zeroable};
use glam::{DVec2, Vec2};
use std::f32::consts::TAU;

/// Curve samples per path segment when flattening shapes.
pub const CURVE_SAMPLES: usize = 8;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };

    fn new(position: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// CPU-side triangle soup, filled in drawing order.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Fills a simple polygon, convex or not.
    pub fn fill_polygon(&mut self, points: &[DVec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        let triangles = earcutr::earcut(&flat, &[], 2).unwrap_or_default();
        if triangles.is_empty() {
            return;
        }

        let base = self.base();
        self.vertices
            .extend(points.iter().map(|p| Vertex::new(p.as_vec2(), color)));
        self.indices
            .extend(triangles.into_iter().map(|i| base + i as u32));
    }

    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = disc_segments(radius);
        let base = self.base();

        self.vertices.push(Vertex::new(center, color));
        for s in 0..segments {
            let theta = TAU * s as f32 / segments as f32;
            self.vertices
                .push(Vertex::new(center + Vec2::from_angle(theta) * radius, color));
        }
        for s in 0..segments {
            self.indices.push(base);
            self.indices.push(base + 1 + s);
            self.indices.push(base + 1 + (s + 1) % segments);
        }
    }

    /// Thick line through `points` with round joins and caps.
    pub fn stroke_polyline(&mut self, points: &[DVec2], closed: bool, width: f32, color: Color) {
        let half = width / 2.0;
        let points: Vec<Vec2> = points.iter().map(|p| p.as_vec2()).collect();

        let mut segments: Vec<(Vec2, Vec2)> = points.windows(2).map(|w| (w[0], w[1])).collect();
        if closed && points.len() > 2 {
            if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
                segments.push((last, first));
            }
        }

        for (a, b) in segments {
            let Some(along) = (b - a).try_normalize() else {
                continue;
            };
            let side = along.perp() * half;
            let base = self.base();
            self.vertices.extend([
                Vertex::new(a + side, color),
                Vertex::new(b + side, color),
                Vertex::new(b - side, color),
                Vertex::new(a - side, color),
            ]);
            self.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        // hairlines need no joins
        if half > 1.0 {
            for &p in &points {
                self.fill_disc(p, half, color);
            }
        }
    }

    /// Tessellates shapes in order, each fill before its outline.
    pub fn tessellate(&mut self, shapes: &[Shape]) {
        for shape in shapes {
            let points = shape.flatten(CURVE_SAMPLES);
            if let Some(fill) = shape.style.fill {
                self.fill_polygon(&points, fill);
            }
            if let Some(stroke) = shape.style.stroke {
                self.stroke_polyline(&points, shape.closed, stroke.width as f32, stroke.color);
            }
        }
    }
}

fn disc_segments(radius: f32) -> u32 {
    (radius.ceil() as u32).clamp(8, 48)
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn from_data(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn from_builder(device: &wgpu::Device, builder: &MeshBuilder) -> Self {
        Self::from_data(device, &builder.vertices, &builder.indices)
    }
}
