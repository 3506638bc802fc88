use std::io::{self, ErrorKind, Read};

use crate::prelude::{ParserError, ParserResult};

/// Empty vector with room for `len` items, or an allocation error naming `what`.
pub fn try_with_capacity<T>(len: usize, what: &str) -> ParserResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|err| ParserError::Allocation(format!("{what} ({len} items): {err}")))?;
    Ok(buffer)
}

/// Scoped byte buffer holding one block of raw records.
///
/// The storage is released when the buffer goes out of scope, on success and
/// error paths alike.
pub struct RecordBuffer {
    bytes: Vec<u8>,
    filled: usize,
}

impl RecordBuffer {
    pub fn allocate(len: usize) -> ParserResult<Self> {
        let mut bytes = try_with_capacity(len, "raw record block")?;
        bytes.resize(len, 0);
        Ok(Self { bytes, filled: 0 })
    }

    /// Reads until the buffer is full or the reader reports end of file.
    /// Returns the number of bytes now held.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        while self.filled < self.bytes.len() {
            match reader.read(&mut self.bytes[self.filled..]) {
                Ok(0) => break,
                Ok(count) => self.filled += count,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(self.filled)
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.bytes.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.filled]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader handing out at most three bytes per call.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let limit = buf.len().min(3);
            self.0.read(&mut buf[..limit])
        }
    }

    #[test]
    fn fill_retries_short_reads() {
        let mut buffer = RecordBuffer::allocate(10).unwrap();
        let mut reader = Trickle(Cursor::new((0u8..20).collect()));
        assert_eq!(buffer.fill_from(&mut reader).unwrap(), 10);
        assert!(buffer.is_full());
        assert_eq!(buffer.as_slice(), &(0u8..10).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn fill_stops_at_end_of_file() {
        let mut buffer = RecordBuffer::allocate(10).unwrap();
        let mut reader = Cursor::new(vec![7u8; 4]);
        assert_eq!(buffer.fill_from(&mut reader).unwrap(), 4);
        assert!(!buffer.is_full());
        assert_eq!(buffer.capacity(), 10);
        assert_eq!(buffer.as_slice(), &[7u8; 4]);
    }

    #[test]
    fn impossible_allocation_is_reported() {
        let err = try_with_capacity::<u64>(usize::MAX / 2, "test block").unwrap_err();
        assert!(matches!(err, ParserError::Allocation(_)));
    }
}
