use bytemuck::Pod;

/// New capacity when `required` more elements do not fit into `capacity`.
///
/// Growth is at least doubling, so appends stay amortized linear.
#[inline]
pub fn grow_target(capacity: usize, required: usize) -> usize {
    (capacity + 2 * required).max(2 * capacity)
}

/// Append-only vertex + index buffer pair for one primitive category.
///
/// - `reset()` drops the logical contents but keeps the allocation
/// - capacity only grows; growth keeps everything written so far
/// - every index refers to a vertex already in the batch
#[derive(Debug)]
pub struct GeometryBatch<V> {
    label: &'static str,
    vertices: Vec<V>,
    indices: Vec<u32>,
}

impl<V: Pod> GeometryBatch<V> {
    pub fn with_capacity(label: &'static str, vertices: usize, indices: usize) -> Self {
        Self {
            label,
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index the next pushed vertex will get.
    #[inline]
    pub fn base_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Makes room for `vertices` more vertices and `indices` more indices.
    pub fn ensure_capacity(&mut self, vertices: usize, indices: usize) {
        if grow(&mut self.vertices, vertices) {
            log::debug!("{} batch: vertex capacity -> {}", self.label, self.vertices.capacity());
        }
        if grow(&mut self.indices, indices) {
            log::debug!("{} batch: index capacity -> {}", self.label, self.indices.capacity());
        }
    }

    #[inline]
    pub fn push_vertex(&mut self, v: V) {
        self.vertices.push(v);
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!(
            a.max(b).max(c) < self.base_index(),
            "{} batch: triangle ({a}, {b}, {c}) references a missing vertex",
            self.label
        );
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Clears contents for the next frame without releasing memory.
    #[inline]
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Read-only view over exactly what was written this frame.
    #[inline]
    pub fn finalize_for_upload(&self) -> BatchView<'_, V> {
        BatchView { vertices: &self.vertices, indices: &self.indices }
    }
}

fn grow<T>(buf: &mut Vec<T>, required: usize) -> bool {
    let remaining = buf.capacity() - buf.len();
    if remaining >= required {
        return false;
    }
    let target = grow_target(buf.capacity(), required);
    buf.reserve_exact(target - buf.len());
    true
}

/// Upload view of a batch.
#[derive(Debug, Copy, Clone)]
pub struct BatchView<'a, V> {
    pub vertices: &'a [V],
    pub indices: &'a [u32],
}

impl<'a, V: Pod> BatchView<'a, V> {
    #[inline]
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
