//! Line-oriented builder for indented Rust source.

const INDENT: &str = "    ";

/// Accumulates lines at the current indentation level.
///
/// # Example
///
/// ```
/// use mibgen_codegen_rust::CodeBuilder;
///
/// let code = CodeBuilder::new()
///     .line("pub mod if_mib {")
///     .indent()
///     .line("pub const MODULE_NAME: &str = \"IF-MIB\";")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "pub mod if_mib {\n    pub const MODULE_NAME: &str = \"IF-MIB\";\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    level: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Blank lines carry no trailing indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("/// {text}"))
    }

    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("// {text}"))
    }

    /// Write `header`, the indented body, then `close`.
    pub fn push_block(
        &mut self,
        header: &str,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.push_line(header);
        self.push_indent();
        body(self);
        self.push_dedent();
        self.push_line(close)
    }

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    pub fn build(self) -> String {
        self.buffer
    }
}
