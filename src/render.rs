use crate::core::{Geometry, Session, AMBIENT_INTENSITY, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION};
use web_sys as web;

mod helpers;
mod mesh;
mod targets;

use mesh::{
    create_mesh_resources, GlobalUniforms, GpuMesh, MeshResources, ObjectSlot, ObjectUniforms,
};
use targets::DepthTarget;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // sRGB view of the surface; colors leave the shader linear
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,
    mesh: MeshResources,
    // Every knot shares one geometry, so one upload serves them all
    knot: GpuMesh,
    slots: Vec<ObjectSlot>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        geometry: &Geometry,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        // WebGPU canvases only offer non-sRGB formats; render through an sRGB view
        let view_format = format.add_srgb_suffix();
        let view_formats = if view_format == format {
            vec![]
        } else {
            vec![view_format]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats,
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthTarget::new(&device, width, height);
        log::info!("[gpu] surface {:?}, view {:?}", format, view_format);
        let mesh = create_mesh_resources(&device, view_format);
        let knot = GpuMesh::upload(&device, geometry);
        log::info!(
            "[gpu] knot uploaded: {} vertices, {} tri indices, {} line indices",
            geometry.vertex_count(),
            knot.tri_count,
            knot.line_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            mesh,
            knot,
            slots: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color::BLACK,
        })
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
            self.depth.recreate(&self.device, width, height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload stale per-knot uniforms and draw the scene.
    pub fn render(&mut self, session: &mut Session) -> Result<(), wgpu::SurfaceError> {
        let camera = &session.camera;
        let light_dir = KEY_LIGHT_POSITION.normalize();
        let globals = GlobalUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light_dir: light_dir.extend(KEY_LIGHT_INTENSITY).to_array(),
            ambient: [AMBIENT_INTENSITY, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.mesh.globals_buffer, 0, bytemuck::bytes_of(&globals));

        while self.slots.len() < session.objects.len() {
            self.slots
                .push(ObjectSlot::new(&self.device, &self.mesh.object_bgl));
        }
        for (obj, slot) in session.objects.iter_mut().zip(&self.slots) {
            if obj.needs_update {
                let u = ObjectUniforms::from_object(obj);
                self.queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&u));
                obj.needs_update = false;
            }
        }

        // Transparent materials: farthest first
        let view = session.camera.view_matrix();
        let mut order: Vec<(usize, f32)> = session
            .objects
            .iter()
            .enumerate()
            .map(|(i, o)| (i, view.transform_point3(o.position).z))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let target = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.mesh.globals_bg, &[]);
            rpass.set_vertex_buffer(0, self.knot.vertex_buffer.slice(..));
            for (i, _) in order {
                let obj = &session.objects[i];
                if obj.material.wireframe {
                    rpass.set_pipeline(&self.mesh.wire_pipeline);
                    rpass.set_index_buffer(
                        self.knot.line_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    rpass.set_bind_group(1, &self.slots[i].bind_group, &[]);
                    rpass.draw_indexed(0..self.knot.line_count, 0, 0..1);
                } else {
                    rpass.set_pipeline(&self.mesh.fill_pipeline);
                    rpass.set_index_buffer(
                        self.knot.tri_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    rpass.set_bind_group(1, &self.slots[i].bind_group, &[]);
                    rpass.draw_indexed(0..self.knot.tri_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
