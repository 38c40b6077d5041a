//! Output sinks: where rendered markup goes.

use std::io::Write;

use anyhow::Result;

/// Something markup can be appended to. Streaming renders write all
/// their output through one of these, passed down explicitly.
pub trait Sink {
    fn emit(&mut self, s: &str) -> Result<()>;
}

impl Sink for String {
    fn emit(&mut self, s: &str) -> Result<()> {
        self.push_str(s);
        Ok(())
    }
}

/// Streams into any `std::io::Write`, e.g. stdout or a file.
pub struct IoSink<W: Write> {
    out: W,
}

impl<W: Write> IoSink<W> {
    pub fn new(out: W) -> Self {
        IoSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn emit(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Run `f` against a fresh buffer and return everything it wrote.
pub fn capture(f: impl FnOnce(&mut dyn Sink) -> Result<()>) -> Result<String> {
    let mut buf = String::new();
    f(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;

    #[test]
    fn t_capture() -> Result<()> {
        let s = capture(|out| {
            out.emit("a")?;
            out.emit("")?;
            out.emit("bc")
        })?;
        assert_eq!(s, "abc");
        Ok(())
    }

    #[test]
    fn t_capture_error() {
        let r = capture(|out| {
            out.emit("partial")?;
            bail!("boom")
        });
        assert_eq!(r.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn t_io_sink() -> Result<()> {
        let mut sink = IoSink::new(Vec::new());
        sink.emit("<p>")?;
        sink.emit("ü</p>")?;
        assert_eq!(sink.into_inner(), "<p>ü</p>".as_bytes());
        Ok(())
    }
}
