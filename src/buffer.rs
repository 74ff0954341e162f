//! Bounded circular buffer for staging partially received streams.
//!
//! A transport layer pushes raw bytes into a [`RingBuffer`] as they arrive,
//! uses [`RingBuffer::distance_to`] to locate a frame terminator, and reads a
//! complete frame's worth of bytes back out for decoding. The backing store
//! is allocated once at construction and never grows; writing past the free
//! space is an error rather than a silent overwrite.
//!
//! The buffer supports limited seeking: skipping forward over written data
//! without reading it, and rewinding over data that has already been read but
//! not yet overwritten. A rewind is provisional until the next read or
//! forward seek commits it.
//!
//! The structure is single-producer, single-consumer with no internal
//! synchronisation; callers serialise access themselves.

use thiserror::Error;

/// Errors returned by [`RingBuffer`] operations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// A write would exceed the free space remaining in the buffer.
    #[error("ring buffer full: cannot write {requested} with {available} free")]
    Full {
        /// Number of elements the caller tried to write.
        requested: usize,
        /// Free space at the time of the call.
        available: usize,
    },

    /// A read or peek requested more elements than are available.
    #[error("insufficient data: requested {requested}, available {available}")]
    InsufficientData {
        /// Number of elements the caller asked for.
        requested: usize,
        /// Elements readable at the time of the call.
        available: usize,
    },
}

/// Fixed-capacity circular store with write, peek, read, seek, and forward
/// search operations.
///
/// All data leaves the buffer by copy; no references into the backing store
/// are handed out.
#[derive(Debug)]
pub struct RingBuffer<T> {
    storage: Box<[T]>,
    write_at: usize,
    read_at: usize,
    /// Total elements ever written.
    written: usize,
    /// Total elements ever consumed by reads or committed forward seeks.
    consumed: usize,
    /// Magnitude of the current uncommitted rewind. A committed forward seek
    /// always resets this to zero, so the stored offset is never positive.
    rewound: usize,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Creates a buffer holding up to `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            storage: vec![T::default(); capacity].into_boxed_slice(),
            write_at: 0,
            read_at: 0,
            written: 0,
            consumed: 0,
            rewound: 0,
        }
    }
}

impl<T> RingBuffer<T> {
    /// Capacity fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.len() }

    /// Elements that can be written before the buffer is full.
    #[must_use]
    pub fn available_write(&self) -> usize { self.storage.len() - self.unread() }

    /// Elements readable from the current seek position.
    #[must_use]
    pub fn available_read(&self) -> usize { self.unread() + self.rewound }

    /// Current seek offset: zero or negative, in elements.
    #[must_use]
    pub fn seek_offset(&self) -> isize { -to_isize(self.rewound) }

    /// Adjusts the read position by `amount` elements.
    ///
    /// A positive resulting offset is committed immediately: the affected
    /// elements count as consumed, clamped so the position never passes the
    /// write cursor. A negative resulting offset rewinds over already-read
    /// data, clamped so it can reference neither more than was ever read nor
    /// data since overwritten by new writes.
    ///
    /// Returns the offset that remains after clamping and committing.
    pub fn seek(&mut self, amount: isize) -> isize {
        let magnitude = amount.unsigned_abs();
        if amount >= 0 {
            if magnitude >= self.rewound {
                let advance = (magnitude - self.rewound).min(self.unread());
                self.commit(advance);
                self.rewound = 0;
            } else {
                self.rewound -= magnitude;
            }
        } else {
            self.rewound = (self.rewound + magnitude).min(self.max_rewind());
        }
        self.seek_offset()
    }

    /// Written but not yet consumed, ignoring any rewind.
    fn unread(&self) -> usize { self.written - self.consumed }

    /// How far the read position may rewind: no further than the total ever
    /// consumed, and no further than the stale region not yet overwritten.
    fn max_rewind(&self) -> usize { self.consumed.min(self.available_write()) }

    /// Index of the element at the current seek position.
    fn cursor(&self) -> usize {
        let capacity = self.storage.len();
        (self.read_at + capacity - self.rewound) % capacity
    }

    fn commit(&mut self, advance: usize) {
        self.consumed += advance;
        self.read_at = (self.read_at + advance) % self.storage.len();
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies `data` into the buffer, wrapping around the end of the backing
    /// store if needed.
    ///
    /// If the write shrinks the stale region below the magnitude of an
    /// uncommitted rewind, the rewind is clamped so it cannot reference
    /// overwritten space.
    ///
    /// # Errors
    /// Returns [`BufferError::Full`] if `data` is larger than the free space;
    /// nothing is written in that case.
    pub fn write(&mut self, data: &[T]) -> Result<(), BufferError> {
        let available = self.available_write();
        if data.len() > available {
            return Err(BufferError::Full {
                requested: data.len(),
                available,
            });
        }

        let capacity = self.storage.len();
        let first = (capacity - self.write_at).min(data.len());
        self.storage[self.write_at..self.write_at + first].clone_from_slice(&data[..first]);
        self.storage[..data.len() - first].clone_from_slice(&data[first..]);

        self.written += data.len();
        self.write_at = (self.write_at + data.len()) % capacity;
        self.rewound = self.rewound.min(self.max_rewind());
        Ok(())
    }

    /// Returns the next `amount` elements from the current seek position
    /// without consuming them.
    ///
    /// # Errors
    /// Returns [`BufferError::InsufficientData`] if fewer than `amount`
    /// elements are readable.
    pub fn peek(&self, amount: usize) -> Result<Vec<T>, BufferError> {
        let available = self.available_read();
        if amount > available {
            return Err(BufferError::InsufficientData {
                requested: amount,
                available,
            });
        }

        let start = self.cursor();
        let first = (self.storage.len() - start).min(amount);
        let mut data = Vec::with_capacity(amount);
        data.extend_from_slice(&self.storage[start..start + first]);
        data.extend_from_slice(&self.storage[..amount - first]);
        Ok(data)
    }

    /// Returns the next `amount` elements and consumes them.
    ///
    /// Reading first drains any uncommitted rewind, then commits whatever
    /// extends past the committed read cursor.
    ///
    /// # Errors
    /// Returns [`BufferError::InsufficientData`] if fewer than `amount`
    /// elements are readable.
    pub fn read(&mut self, amount: usize) -> Result<Vec<T>, BufferError> {
        let data = self.peek(amount)?;
        if amount >= self.rewound {
            let advance = amount - self.rewound;
            self.commit(advance);
            self.rewound = 0;
        } else {
            self.rewound -= amount;
        }
        Ok(data)
    }

    /// Returns the element at the current seek position without consuming
    /// it, or `None` if nothing is readable.
    #[must_use]
    pub fn peek_one(&self) -> Option<T> {
        if self.available_read() == 0 {
            return None;
        }
        Some(self.storage[self.cursor()].clone())
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// Number of elements between the current seek position and the first
    /// occurrence of `target`, or `None` if `target` has not been written.
    ///
    /// Linear in the readable region. Reading the returned distance plus one
    /// consumes everything up to and including the match.
    #[must_use]
    pub fn distance_to(&self, target: &T) -> Option<usize> {
        let capacity = self.storage.len();
        let start = self.cursor();
        (0..self.available_read()).find(|&i| self.storage[(start + i) % capacity] == *target)
    }
}

/// Backing allocations never exceed `isize::MAX` elements, so the fallback
/// is unreachable in practice.
fn to_isize(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

#[cfg(test)]
mod tests;
