use std::io::{self, BufRead, Write};

/// Reads command lines, showing the prompt first when interactive.
pub struct ShellPrompt<R> {
    reader: R,
    prompt: String,
    interactive: bool,
}

impl<R: BufRead> ShellPrompt<R> {
    pub fn new(reader: R, prompt: &str, interactive: bool) -> Self {
        ShellPrompt {
            reader,
            prompt: prompt.to_string(),
            interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn show_prompt(&self) -> io::Result<()> {
        if self.interactive {
            let mut stdout = io::stdout();
            stdout.write_all(self.prompt.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Next line without its line terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let bytes_read = self.reader.read_line(&mut buf)?;
        if bytes_read == 0 {
            // EOF (e.g., Ctrl-D)
            if self.interactive {
                println!();
            }
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}
