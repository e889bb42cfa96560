//! Cooperative cancellation for byte sources and sinks.
//!
//! The codec itself never polls for cancellation. Instead a source or sink
//! is wrapped in a [`StopReader`], which checks an [`enough::Stop`] token
//! before every I/O call and fails that call once the token trips. The codec
//! sees an ordinary I/O error and aborts; [`crate::decode_stoppable`] and
//! [`crate::encode_stoppable`] turn it back into
//! [`FarbfeldError::Cancelled`](crate::FarbfeldError::Cancelled).

use std::io::{self, Read, Write};

use enough::{Stop, StopReason};

/// Wraps a reader or writer and fails its I/O once `stop` reports a stop.
pub struct StopReader<T, S: Stop> {
    inner: T,
    stop: S,
    reason: Option<StopReason>,
}

impl<T, S: Stop> StopReader<T, S> {
    pub fn new(inner: T, stop: S) -> Self {
        Self {
            inner,
            stop,
            reason: None,
        }
    }

    /// The reason recorded when the token tripped, if it did. Cleared by
    /// this call.
    pub fn take_reason(&mut self) -> Option<StopReason> {
        self.reason.take()
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn poll(&mut self) -> io::Result<()> {
        if let Err(reason) = self.stop.check() {
            self.reason = Some(reason);
            return Err(io::Error::other("operation cancelled"));
        }
        Ok(())
    }
}

impl<T: Read, S: Stop> Read for StopReader<T, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.poll()?;
        self.inner.read(buf)
    }
}

impl<T: Write, S: Stop> Write for StopReader<T, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.poll()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.poll()?;
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    /// Trips after `budget` checks.
    struct Budget(AtomicUsize);

    impl Stop for Budget {
        fn check(&self) -> Result<(), StopReason> {
            let left = self.0.load(Ordering::Relaxed);
            if left == 0 {
                return Err(StopReason::Cancelled);
            }
            self.0.store(left - 1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn unstoppable_passes_through() {
        let mut reader = StopReader::new(&b"farbfeld"[..], enough::Unstoppable);
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"farbfeld");
        assert!(reader.take_reason().is_none());
    }

    #[test]
    fn tripped_token_fails_reads() {
        let mut reader = StopReader::new(&b"abcdef"[..], Budget(AtomicUsize::new(1)));
        let mut one = [0u8; 1];
        reader.read_exact(&mut one).unwrap();
        assert_eq!(&one, b"a");
        let err = reader.read_exact(&mut one).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(matches!(reader.take_reason(), Some(StopReason::Cancelled)));
        assert!(reader.take_reason().is_none());
    }

    #[test]
    fn tripped_token_fails_writes() {
        let mut writer = StopReader::new(Vec::new(), Budget(AtomicUsize::new(0)));
        assert!(writer.write_all(b"x").is_err());
        assert!(writer.get_ref().is_empty());
    }
}
