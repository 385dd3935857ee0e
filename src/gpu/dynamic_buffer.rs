//! Dynamic GPU buffer management with automatic resizing
//!
//! Position buffers are re-uploaded whenever a new model set loads, and the
//! point count changes with it. Buffers grow 2x when data exceeds capacity
//! and never shrink.

/// Smallest allocation, in bytes.
const MIN_CAPACITY: usize = 64;

/// A GPU buffer that can grow dynamically
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes
    len: usize,      // Current data length in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        let buffer = Self::allocate(device, label, capacity, usage);
        Self {
            buffer,
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write data to buffer, growing if necessary.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        if let Some(new_capacity) = grown_capacity(self.capacity, needed) {
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer =
                Self::allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.len = needed;
    }

    /// The written prefix, for `set_vertex_buffer`.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..self.len as u64)
    }
}

/// New capacity when `needed` bytes don't fit, else `None`.
/// 2x growth, minimum 1KB step.
fn grown_capacity(capacity: usize, needed: usize) -> Option<usize> {
    (needed > capacity)
        .then(|| needed.saturating_mul(2).max(capacity.saturating_add(1024)))
}
