//! A custom version of [`std::io::Write`], so that format output can target
//! a fixed buffer, a `Vec<u8>`, or a `String` uniformly under `no_std`.
//!
//! [`std::io::Write`]: <https://doc.rust-lang.org/std/io/trait.Write.html>

use core::fmt;

/// Conversion from a string slice, used to pick the right slice type for a
/// given [`Write`] implementation.
pub(crate) trait FromStr {
    /// Creates a value from a string slice.
    fn from_str(s: &str) -> &Self;
}

impl FromStr for str {
    fn from_str(s: &str) -> &Self {
        s
    }
}

impl FromStr for [u8] {
    fn from_str(s: &str) -> &Self {
        s.as_bytes()
    }
}

/// Adapts a [`Write`] into a [`core::fmt::Write`], storing the first error
/// instead of discarding it.
struct Adapter<'a, T: ?Sized> {
    inner: &'a mut T,
    error: Option<WriteZero>,
}

/// The inner writer ran out of room.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct WriteZero;

impl<T: Write + ?Sized> fmt::Write for Adapter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.inner.write_all(T::Slice::from_str(s)) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Some(e);
                Err(fmt::Error)
            }
        }
    }
}

/// A minimal, `no_std`-friendly substitute for [`std::io::Write`].
///
/// [`std::io::Write`]: <https://doc.rust-lang.org/std/io/trait.Write.html>
pub(crate) trait Write {
    /// The slice type this writer accepts (`[u8]` for byte buffers, `str`
    /// for string buffers).
    type Slice: AsRef<[u8]> + ?Sized + FromStr;

    /// Writes an entire buffer, or fails if there was not enough room.
    fn write_all(&mut self, data: &Self::Slice) -> Result<(), WriteZero>;

    /// Writes a formatted value.
    fn write_fmt(&mut self, fmt_args: fmt::Arguments<'_>) -> Result<(), WriteZero> {
        let mut output = Adapter {
            inner: self,
            error: None,
        };
        match fmt::write(&mut output, fmt_args) {
            Ok(()) => Ok(()),
            Err(_) => Err(output.error.unwrap_or(WriteZero)),
        }
    }
}

/// Writing into `&mut [u8]` copies into the slice, overwriting its data and
/// advancing past what was written.
impl Write for &mut [u8] {
    type Slice = [u8];

    fn write_all(&mut self, data: &[u8]) -> Result<(), WriteZero> {
        let size = data.len().min(self.len());
        let (a, b) = core::mem::take(self).split_at_mut(size);
        a.copy_from_slice(&data[..size]);
        *self = b;

        if size == data.len() {
            Ok(())
        } else {
            Err(WriteZero)
        }
    }
}

#[cfg(feature = "alloc")]
impl Write for alloc::vec::Vec<u8> {
    type Slice = [u8];

    fn write_all(&mut self, data: &[u8]) -> Result<(), WriteZero> {
        self.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl Write for alloc::string::String {
    type Slice = str;

    fn write_all(&mut self, data: &str) -> Result<(), WriteZero> {
        self.push_str(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_all_into_fixed_buffer() {
        let mut buf = [0u8; 4];
        let mut cursor = &mut buf[..];
        assert!(Write::write_all(&mut cursor, b"ab".as_slice()).is_ok());
        assert_eq!(cursor.len(), 2);
        assert_eq!(&buf, b"ab\0\0");
    }

    #[test]
    fn test_write_all_too_small() {
        let mut buf = [0u8; 1];
        let mut cursor = &mut buf[..];
        assert_eq!(
            Write::write_all(&mut cursor, b"ab".as_slice()),
            Err(WriteZero)
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_write_fmt_into_string() {
        use alloc::string::String;

        let mut s = String::new();
        Write::write_fmt(&mut s, format_args!("{}-{}", 1, 2)).unwrap();
        assert_eq!(s, "1-2");
    }
}
