//! Destinations for accepted records.

use std::io::Write;

use userfeed_model::User;

use crate::error::{OutputError, Result};

/// Receives accepted users one at a time, in input order.
pub trait AcceptedSink {
    fn accept(&mut self, user: &User) -> Result<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes `email first_name last_name` lines.
#[derive(Debug)]
pub struct TextLineSink<W: Write> {
    writer: W,
}

impl<W: Write> TextLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AcceptedSink for TextLineSink<W> {
    fn accept(&mut self, user: &User) -> Result<()> {
        writeln!(self.writer, "{}", user.summary_line())
            .map_err(|source| OutputError::Sink { source })
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| OutputError::Sink { source })
    }
}

/// Writes one JSON object per accepted user per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AcceptedSink for JsonLinesSink<W> {
    fn accept(&mut self, user: &User) -> Result<()> {
        serde_json::to_writer(&mut self.writer, user).map_err(|source| OutputError::Json {
            what: "accepted user",
            source,
        })?;
        self.writer
            .write_all(b"\n")
            .map_err(|source| OutputError::Sink { source })
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|source| OutputError::Sink { source })
    }
}

/// Keeps accepted users in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub users: Vec<User>,
}

impl AcceptedSink for CollectingSink {
    fn accept(&mut self, user: &User) -> Result<()> {
        self.users.push(user.clone());
        Ok(())
    }
}

impl<S: AcceptedSink + ?Sized> AcceptedSink for &mut S {
    fn accept(&mut self, user: &User) -> Result<()> {
        (**self).accept(user)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: AcceptedSink + ?Sized> AcceptedSink for Box<S> {
    fn accept(&mut self, user: &User) -> Result<()> {
        (**self).accept(user)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
