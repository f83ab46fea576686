//! I/O wrappers for tracking data transfer.
//!
//! [`ProgressReader`] and [`ProgressWriter`] wrap any [`Read`] or [`Write`] and advance
//! a borrowed [`ProgressBar`] by the number of bytes each call moved. Create the bar with
//! the expected byte count as its maximum:
//!
//! ```no_run
//! use std::{fs::File, io};
//!
//! use eta_progress::{ProgressBar, io::ProgressReader};
//!
//! # fn main() -> io::Result<()> {
//! let file = File::open("disk.img")?;
//! let mut bar = ProgressBar::new("Hashing", file.metadata()?.len());
//! io::copy(&mut ProgressReader::new(file, &mut bar), &mut io::sink())?;
//! bar.finish();
//! # Ok(())
//! # }
//! ```
//!
//! Every successful call redraws the bar, so wrap a buffered reader or writer when the
//! calls are small.

use std::io::{self, Read, Write};

use crate::progress::ProgressBar;

/// A wrapper around [`Read`] that advances a [`ProgressBar`] by the bytes read.
pub struct ProgressReader<'a, R, W: Write> {
    inner: R,
    bar: &'a mut ProgressBar<W>,
}

impl<'a, R, W: Write> ProgressReader<'a, R, W> {
    /// Creates a new `ProgressReader` wrapping `inner` and advancing `bar`.
    pub const fn new(inner: R, bar: &'a mut ProgressBar<W>) -> Self {
        Self { inner, bar }
    }

    /// Unwraps the reader, releasing the bar.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read, W: Write> Read for ProgressReader<'_, R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.bar.inc_by(n as u64);
        }
        Ok(n)
    }
}

/// A wrapper around [`Write`] that advances a [`ProgressBar`] by the bytes written.
pub struct ProgressWriter<'a, T, W: Write> {
    inner: T,
    bar: &'a mut ProgressBar<W>,
}

impl<'a, T, W: Write> ProgressWriter<'a, T, W> {
    /// Creates a new `ProgressWriter` wrapping `inner` and advancing `bar`.
    pub const fn new(inner: T, bar: &'a mut ProgressBar<W>) -> Self {
        Self { inner, bar }
    }

    /// Unwraps the writer, releasing the bar.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write, W: Write> Write for ProgressWriter<'_, T, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if n > 0 {
            self.bar.inc_by(n as u64);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read as _, Write as _};

    use super::{ProgressReader, ProgressWriter};
    use crate::builder::ProgressBuilder;

    /// Reader Tracking
    /// Verifies bytes read are counted.
    #[test]
    fn test_io_reader() {
        let data = vec![0u8; 100];
        let mut bar = ProgressBuilder::new("read", 100)
            .with_fixed_width(80)
            .build_with_writer(Vec::new());

        let mut reader = ProgressReader::new(Cursor::new(&data), &mut bar);
        let mut buf = [0u8; 10];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(bar.value(), 10);

        let mut reader = ProgressReader::new(Cursor::new(&data[10..]), &mut bar);
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(bar.value(), 100);
        assert!(bar.is_complete());
    }

    /// Writer Tracking
    /// Verifies bytes written are counted.
    #[test]
    fn test_io_writer() {
        let mut bar = ProgressBuilder::new("write", 50)
            .with_fixed_width(80)
            .build_with_writer(Vec::new());

        let mut writer = ProgressWriter::new(Vec::new(), &mut bar);
        writer.write_all(&[1, 2, 3, 4, 5]).unwrap();
        let written = writer.into_inner();

        assert_eq!(written, [1, 2, 3, 4, 5]);
        assert_eq!(bar.value(), 5);
    }
}
