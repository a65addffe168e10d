//! Capability checks and helpers for the caller's streams.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::config::ReplacerConfig;
use crate::error::{ReplaceError, ReplaceResult};

/// Read the whole input, from its current cursor to end of stream.
///
/// Reading is the capability check for the input: a stream that cannot be
/// read fails with `InvalidArgument` before anything is parsed.
/// At most `max_input_bytes + 1` bytes are pulled so oversized input is
/// refused early.
pub fn read_input<R: Read + ?Sized>(input: &mut R, config: &ReplacerConfig) -> ReplaceResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let result = match config.max_input_bytes {
        Some(limit) => {
            let cap = (limit as u64).saturating_add(1);
            Read::take(&mut *input, cap).read_to_end(&mut buffer)
        }
        None => input.read_to_end(&mut buffer),
    };

    if let Err(e) = result {
        return Err(ReplaceError::invalid_stream("Cannot read from input stream", e));
    }

    match config.max_input_bytes {
        Some(limit) if !config.allows_input_len(buffer.len()) => {
            return Err(ReplaceError::InputTooLarge { limit });
        }
        _ => {}
    }

    debug!("Read {} bytes of input", buffer.len());
    Ok(buffer)
}

/// Probe that `output` accepts writes and seeks without changing its contents.
pub fn ensure_writable_and_seekable<W: Write + Seek + ?Sized>(output: &mut W) -> ReplaceResult<()> {
    if let Err(e) = output.write(&[]) {
        return Err(ReplaceError::invalid_stream("Cannot write to output stream", e));
    }
    if let Err(e) = output.stream_position() {
        return Err(ReplaceError::invalid_stream("Cannot seek output stream", e));
    }
    Ok(())
}

/// Move the output cursor back to the start.
pub fn rewind<W: Seek + ?Sized>(output: &mut W) -> io::Result<()> {
    output.seek(SeekFrom::Start(0)).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn limited(max_input_bytes: Option<usize>) -> ReplacerConfig {
        ReplacerConfig {
            max_input_bytes,
            ..ReplacerConfig::default()
        }
    }

    struct FailingStream;

    impl Read for FailingStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "stream is write only"))
        }
    }

    impl Write for FailingStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "stream is read only"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FailingStream {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_read_input() {
        let mut input = Cursor::new(b"<p>hi</p>".to_vec());
        assert_eq!(read_input(&mut input, &limited(None)).unwrap(), b"<p>hi</p>");
    }

    #[test]
    fn test_read_input_from_cursor_position() {
        let mut input = Cursor::new(b"skip<p>hi</p>".to_vec());
        input.set_position(4);
        assert_eq!(read_input(&mut input, &limited(Some(64))).unwrap(), b"<p>hi</p>");
    }

    #[test]
    fn test_read_input_limit() {
        let mut input = Cursor::new(vec![b'a'; 10]);
        assert_eq!(read_input(&mut input, &limited(Some(10))).unwrap().len(), 10);

        let mut input = Cursor::new(vec![b'a'; 11]);
        let err = read_input(&mut input, &limited(Some(10))).unwrap_err();
        assert!(matches!(err, ReplaceError::InputTooLarge { limit: 10 }));
    }

    #[test]
    fn test_unreadable_input() {
        let err = read_input(&mut FailingStream, &limited(None)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_output_probe() {
        let mut output = Cursor::new(Vec::new());
        assert!(ensure_writable_and_seekable(&mut output).is_ok());
        assert!(output.get_ref().is_empty());

        let err = ensure_writable_and_seekable(&mut FailingStream).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_rewind() {
        let mut output = Cursor::new(Vec::new());
        output.write_all(b"abc").unwrap();
        rewind(&mut output).unwrap();
        assert_eq!(output.position(), 0);
    }
}
