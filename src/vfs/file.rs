//! Open file handles.
//!
//! [`MemFile`] is a cursor over a [`SharedBuffer`]. Every handle opened on the same node holds
//! the same buffer, so a write through one handle is visible to all the others. Access modes are
//! enforced by wrapping a handle into [`ReadOnlyFile`] or [`WriteOnlyFile`], each of which
//! forwards every operation except the one it blocks.

use std::io;

use crate::core::{File, ReadOutcome, Result, Whence};
use crate::error::FileError;
use crate::vfs::buffer::SharedBuffer;

/// A read-write handle on an in-memory file.
#[derive(Debug)]
pub struct MemFile {
    name: String,
    offset: i64,
    data: SharedBuffer,
}

impl MemFile {
    pub fn new<S: Into<String>>(name: S, data: SharedBuffer) -> MemFile {
        MemFile {
            name: name.into(),
            offset: 0,
            data,
        }
    }

    /// Current cursor position.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    fn size(&self) -> i64 {
        self.data.borrow().len() as i64
    }
}

impl File for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        let data = self.data.borrow();
        let size = data.len() as i64;
        if self.offset >= size {
            return Ok(ReadOutcome::EndOfData);
        }

        let src = &data.as_slice()[self.offset as usize..];
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        self.offset += n as i64;

        Ok(ReadOutcome::Bytes(n))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = buf.len();
        let end = self
            .offset
            .checked_add(n as i64)
            .ok_or(FileError::TooLarge)?;

        let mut data = self.data.borrow_mut();
        let size = data.len() as i64;
        if end > size {
            data.grow((end - size) as usize)?;
        }

        data.as_mut_slice()[self.offset as usize..end as usize].copy_from_slice(buf);
        self.offset = end;

        Ok(n)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.offset,
            Whence::End => self.size(),
        };

        let new_offset = base.checked_add(offset).ok_or(if offset < 0 {
            FileError::NegativeSeek
        } else {
            FileError::TooFar
        })?;

        if new_offset < 0 {
            return Err(FileError::NegativeSeek);
        }
        if new_offset > self.size() {
            return Err(FileError::TooFar);
        }

        self.offset = new_offset;
        Ok(self.offset)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Blocks `write`, forwards everything else.
#[derive(Debug)]
pub struct ReadOnlyFile<F>(F);

impl<F: File> ReadOnlyFile<F> {
    pub fn new(inner: F) -> Self {
        ReadOnlyFile(inner)
    }

    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: File> File for ReadOnlyFile<F> {
    fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome> {
        self.0.read(buf)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(FileError::ReadOnly)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        self.0.seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        self.0.close()
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

/// Blocks `read`, forwards everything else.
#[derive(Debug)]
pub struct WriteOnlyFile<F>(F);

impl<F: File> WriteOnlyFile<F> {
    pub fn new(inner: F) -> Self {
        WriteOnlyFile(inner)
    }

    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F: File> File for WriteOnlyFile<F> {
    fn read(&mut self, _buf: &mut [u8]) -> Result<ReadOutcome> {
        Err(FileError::WriteOnly)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.0.write(buf)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64> {
        self.0.seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        self.0.close()
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

// std::io adapters, so handles can be passed to code written against `Read`/`Write`/`Seek`.

impl io::Read for dyn File + '_ {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(File::read(self, buf)?.count())
    }
}

impl io::Write for dyn File + '_ {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(File::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for dyn File + '_ {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            io::SeekFrom::Start(n) => (
                i64::try_from(n).map_err(|_| FileError::TooFar)?,
                Whence::Start,
            ),
            io::SeekFrom::Current(n) => (n, Whence::Current),
            io::SeekFrom::End(n) => (n, Whence::End),
        };
        Ok(File::seek(self, offset, whence)? as u64)
    }
}
