//! GPU buffer that grows when the data written to it outgrows its capacity.

/// Smallest allocation, in bytes.
const MIN_CAPACITY: u64 = 64;

/// A GPU buffer that can grow dynamically.
///
/// Uses a 2x growth strategy when capacity is exceeded. Never shrinks, since
/// GPU buffers cannot be resized in place.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: u64,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: u64,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write `data` from offset 0, reallocating first if it does not fit.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len() as u64;

        let reallocated = needed > self.capacity;
        if reallocated {
            self.capacity = grown_capacity(needed, self.capacity);
            self.buffer =
                Self::allocate(device, &self.label, self.capacity, self.usage);
            log::debug!("{} grown to {} bytes", self.label, self.capacity);
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// New capacity for `needed` bytes: double the need, growing by at least
/// one KiB over the current capacity.
fn grown_capacity(needed: u64, capacity: u64) -> u64 {
    needed.saturating_mul(2).max(capacity + 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_large_requests() {
        assert_eq!(grown_capacity(4096, 64), 8192);
    }

    #[test]
    fn growth_adds_at_least_a_kilobyte() {
        assert_eq!(grown_capacity(65, 64), 64 + 1024);
        assert!(grown_capacity(2000, 1500) >= 2000);
    }

    #[test]
    fn growth_never_shrinks_below_current_capacity() {
        assert!(grown_capacity(10, 4096) > 4096);
    }
}
