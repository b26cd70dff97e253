// Mon Aug 03 2026 - Alex

use thiserror::Error;

/// Capacity of the output buffer handed to the callee: 5 MiB.
pub const DEFAULT_CAPACITY: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum BufferError {
    #[error("Callee overran the buffer: reported {written} bytes, capacity is {capacity}")]
    Overrun { written: usize, capacity: usize },
}

/// What the callee's signed return value means once checked against the
/// buffer it was allowed to write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrittenLength {
    Bytes(usize),
    Failure(i64),
}

impl WrittenLength {
    pub fn byte_count(&self) -> usize {
        match self {
            WrittenLength::Bytes(n) => *n,
            WrittenLength::Failure(_) => 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, WrittenLength::Failure(_))
    }
}

/// Fixed-capacity byte block the callee writes into. Allocated once before
/// the call and owned by the probe for the call's whole duration; never
/// reallocated while the callee holds the write pointer.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }

    /// Checks the callee's raw return against the declared capacity. The
    /// capacity was never communicated to the callee, so a count above it
    /// means caller memory was already overrun.
    pub fn verify_written(&self, returned: i64) -> Result<WrittenLength, BufferError> {
        if returned < 0 {
            return Ok(WrittenLength::Failure(returned));
        }
        let written = returned as usize;
        if written > self.capacity() {
            return Err(BufferError::Overrun {
                written,
                capacity: self.capacity(),
            });
        }
        Ok(WrittenLength::Bytes(written))
    }

    pub fn written(&self, len: usize) -> &[u8] {
        let end = len.min(self.data.len());
        &self.data[..end]
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let buffer = OutputBuffer::default();
        assert_eq!(buffer.capacity(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_verify_written_ok() {
        let buffer = OutputBuffer::with_capacity(64);
        assert_eq!(buffer.verify_written(32).unwrap(), WrittenLength::Bytes(32));
        assert_eq!(buffer.verify_written(64).unwrap(), WrittenLength::Bytes(64));
    }

    #[test]
    fn test_verify_written_zero_is_empty_not_failure() {
        let buffer = OutputBuffer::with_capacity(64);
        let length = buffer.verify_written(0).unwrap();
        assert_eq!(length, WrittenLength::Bytes(0));
        assert!(!length.is_failure());
    }

    #[test]
    fn test_verify_written_negative_is_callee_failure() {
        let buffer = OutputBuffer::with_capacity(64);
        let length = buffer.verify_written(-7).unwrap();
        assert_eq!(length, WrittenLength::Failure(-7));
        assert!(length.is_failure());
        assert_eq!(length.byte_count(), 0);
    }

    #[test]
    fn test_verify_written_overrun() {
        let buffer = OutputBuffer::with_capacity(64);
        match buffer.verify_written(65) {
            Err(BufferError::Overrun { written, capacity }) => {
                assert_eq!(written, 65);
                assert_eq!(capacity, 64);
            }
            other => panic!("expected overrun, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_written_view_is_clamped() {
        let mut buffer = OutputBuffer::with_capacity(4);
        unsafe {
            std::ptr::copy_nonoverlapping(b"abcd".as_ptr(), buffer.as_mut_ptr(), 4);
        }
        assert_eq!(buffer.written(2), b"ab");
        assert_eq!(buffer.written(16), b"abcd");
    }
}
