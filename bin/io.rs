use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Lines, Read, Write};
use tracing::instrument;

/// A line oriented terminal.
#[derive(Debug)]
pub struct Io<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Io<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Io {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }

    /// Receive a line, or `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<Option<String>> {
        self.reader.next().transpose()
    }

    /// Send a line.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(&mut self.writer, "{msg}")?;
        self.writer.flush()
    }

    /// Ask for input on the current line.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn prompt<T: Display>(&mut self, msg: T) -> io::Result<Option<String>> {
        write!(&mut self.writer, "{msg} ")?;
        self.writer.flush()?;
        self.recv()
    }
}
