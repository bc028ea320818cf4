//! Per-operation output channels.
//!
//! Each operation collects its commands in its own channel while the
//! drawing is processed; the channels are written out one after the other
//! when the document closes.

use laoskit_core::OperationMode;
use std::io::{self, Write};

/// Append-only sequence of command lines for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputChannel {
    lines: Vec<String>,
}

impl OutputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one command line (without terminator)
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write every non-blank line to `sink` and empty the channel.
    ///
    /// Returns the number of lines written.
    pub fn concatenate_into<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<usize> {
        let mut written = 0;
        for line in self.lines.drain(..) {
            if line.is_empty() {
                continue;
            }
            writeln!(sink, "{}", line)?;
            written += 1;
        }
        Ok(written)
    }
}

/// The cut, mark and engrave channels of one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSet {
    pub cut: OutputChannel,
    pub mark: OutputChannel,
    pub engrave: OutputChannel,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel that commands of `mode` belong to.
    ///
    /// Fill engraving has no vector channel and undefined paths go nowhere.
    pub fn route(&mut self, mode: OperationMode) -> Option<&mut OutputChannel> {
        match mode {
            OperationMode::Cut => Some(&mut self.cut),
            OperationMode::Mark => Some(&mut self.mark),
            OperationMode::StrokeEngrave => Some(&mut self.engrave),
            OperationMode::FillEngrave | OperationMode::Undefined => None,
        }
    }

    /// Append a command line to the channel of `mode`, if it has one
    pub fn push(&mut self, mode: OperationMode, line: impl Into<String>) {
        if let Some(channel) = self.route(mode) {
            channel.push_line(line);
        }
    }

    /// Write engrave, mark and cut channels to `sink`, in that order
    pub fn concatenate_into<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<usize> {
        let mut written = self.engrave.concatenate_into(sink)?;
        written += self.mark.concatenate_into(sink)?;
        written += self.cut.concatenate_into(sink)?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenate_drops_blank_lines() {
        let mut channel = OutputChannel::new();
        channel.push_line("0 1 2");
        channel.push_line("");
        channel.push_line("1 3 4");

        let mut out = Vec::new();
        let written = channel.concatenate_into(&mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "0 1 2\n1 3 4\n");
        assert!(channel.is_empty());
    }

    #[test]
    fn test_routing() {
        let mut channels = ChannelSet::new();
        channels.push(OperationMode::Cut, "cut");
        channels.push(OperationMode::Mark, "mark");
        channels.push(OperationMode::StrokeEngrave, "engrave");
        channels.push(OperationMode::FillEngrave, "fill");
        channels.push(OperationMode::Undefined, "nothing");

        assert_eq!(channels.cut.lines(), ["cut"]);
        assert_eq!(channels.mark.lines(), ["mark"]);
        assert_eq!(channels.engrave.lines(), ["engrave"]);
    }

    #[test]
    fn test_channel_order() {
        let mut channels = ChannelSet::new();
        channels.push(OperationMode::Cut, "c");
        channels.push(OperationMode::Mark, "m");
        channels.push(OperationMode::StrokeEngrave, "e");

        let mut out = Vec::new();
        channels.concatenate_into(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "e\nm\nc\n");
        assert_eq!(channels, ChannelSet::new());
    }
}
