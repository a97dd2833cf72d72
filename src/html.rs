//! Output sinks for rendered markup.

/// Accumulates rendered output.
///
/// The renderer gives every open tag its own sink, so implementations must be cheap to
/// create through `Default`.
pub trait HtmlSink: Default {
    /// Append a run of literal text
    fn write_text(&mut self, text: &str);

    fn write_char(&mut self, ch: char) {
        let mut buf = [0; 4];
        self.write_text(ch.encode_utf8(&mut buf));
    }

    /// Append already-rendered `content` wrapped in `<name>` and `</name>`
    fn write_tag(&mut self, name: &str, content: &str);

    /// Consume the sink, returning everything written to it
    fn finish(self) -> String;
}

/// In-memory HTML accumulator
#[derive(Debug, Default, Clone)]
pub struct HtmlWriter {
    buf: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HtmlSink for HtmlWriter {
    fn write_text(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn write_char(&mut self, ch: char) {
        self.buf.push(ch);
    }

    fn write_tag(&mut self, name: &str, content: &str) {
        self.buf.reserve(name.len() * 2 + content.len() + 5);
        self.buf.push('<');
        self.buf.push_str(name);
        self.buf.push('>');
        self.buf.push_str(content);
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    fn finish(self) -> String {
        self.buf
    }
}
