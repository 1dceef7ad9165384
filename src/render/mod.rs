//! The seam to the rendering collaborator.
//!
//! Window management, GL state, and shader compilation live on the other
//! side of [`RenderBackend`]; the engine only ever hands over borrowed
//! buffer views and opaque handles, so buffer lifetime stays the
//! collaborator's concern.

mod shader;

pub use shader::{ShaderParseError, ShaderSource, parse_shader_source};

/// Opaque identifier for a mesh the backend has accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// What the engine needs from a renderer: buffer upload, indexed draws,
/// and release. Vertex data arrives interleaved as `[x y z nx ny nz]` f32,
/// matrices as column-major f32, both borrowed for the duration of the call.
pub trait RenderBackend {
    fn upload_mesh(&mut self, vertices: &[f32], indices: &[u32]) -> MeshHandle;

    fn draw_indexed(&mut self, handle: MeshHandle, model: &[f32; 16], wireframe: bool);

    fn free_mesh(&mut self, handle: MeshHandle);
}

/// A backend that records every call instead of rendering.
///
/// Used by the tests and the demo CLI to observe what the engine would
/// send to a real renderer.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_handle: u32,
    pub uploads: Vec<UploadRecord>,
    pub draws: Vec<DrawRecord>,
    pub freed: Vec<MeshHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub handle: MeshHandle,
    pub vertex_count: usize,
    pub index_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub handle: MeshHandle,
    pub wireframe: bool,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles uploaded and not yet freed.
    #[must_use]
    pub fn live_handles(&self) -> Vec<MeshHandle> {
        self.uploads
            .iter()
            .map(|u| u.handle)
            .filter(|h| !self.freed.contains(h))
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_mesh(&mut self, vertices: &[f32], indices: &[u32]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.uploads.push(UploadRecord {
            handle,
            // 6 floats per vertex: position + normal.
            vertex_count: vertices.len() / 6,
            index_count: indices.len(),
        });
        handle
    }

    fn draw_indexed(&mut self, handle: MeshHandle, _model: &[f32; 16], wireframe: bool) {
        self.draws.push(DrawRecord { handle, wireframe });
    }

    fn free_mesh(&mut self, handle: MeshHandle) {
        self.freed.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_tracks_handle_lifecycle() {
        let mut backend = RecordingBackend::new();
        let a = backend.upload_mesh(&[0.0; 12], &[0, 1, 0]);
        let b = backend.upload_mesh(&[0.0; 6], &[0, 0, 0]);
        assert_ne!(a, b);
        assert_eq!(backend.uploads[0].vertex_count, 2);
        assert_eq!(backend.live_handles(), vec![a, b]);

        backend.free_mesh(a);
        assert_eq!(backend.live_handles(), vec![b]);

        backend.draw_indexed(b, &[0.0; 16], true);
        assert_eq!(backend.draws.len(), 1);
        assert!(backend.draws[0].wireframe);
    }
}
