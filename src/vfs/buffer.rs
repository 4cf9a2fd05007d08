use std::cell::RefCell;
use std::rc::Rc;

use log::{trace, warn};

use crate::core::Result;
use crate::error::FileError;

/// A buffer shared between a file node and every handle opened on it.
pub type SharedBuffer = Rc<RefCell<Buffer>>;

/// Growable byte storage backing a regular file.
///
/// `len()` bytes are valid, `capacity()` bytes are allocated. The buffer never shrinks;
/// truncation replaces it outright.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buffer {
    data: Vec<u8>,
    capacity: usize,
}

impl Buffer {
    /// Creates an empty buffer with `capacity` bytes reserved.
    pub fn with_capacity(capacity: usize) -> Buffer {
        Buffer {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn shared(capacity: usize) -> SharedBuffer {
        Rc::new(RefCell::new(Buffer::with_capacity(capacity)))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Extends the logical length by `n` bytes, reallocating to
    /// `max(2 * capacity, capacity + n)` when the current capacity is insufficient.
    ///
    /// The new region is zero-filled. An allocation failure leaves the buffer untouched and is
    /// reported as [`FileError::TooLarge`].
    pub fn grow(&mut self, n: usize) -> Result<()> {
        let len = self.data.len();
        let wanted = len.checked_add(n).ok_or(FileError::TooLarge)?;

        if wanted > self.capacity {
            let new_cap = self
                .capacity
                .saturating_mul(2)
                .max(self.capacity.saturating_add(n))
                .max(wanted);

            if let Err(e) = self.data.try_reserve_exact(new_cap - len) {
                warn!("buffer growth to {} bytes failed: {}", new_cap, e);
                return Err(FileError::TooLarge);
            }
            trace!("buffer reallocated: {} -> {} bytes", self.capacity, new_cap);
            self.capacity = new_cap;
        }

        self.data.resize(wanted, 0);
        Ok(())
    }
}
