//! Line-based console front end

use std::io::{BufRead, Write};

use twenty_engine::{EngineError, Interaction, Result};

/// Prompts on a writer, reads answers from a reader (stdin/stdout in the binary).
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }
}

impl<R: BufRead, W: Write> Interaction for Console<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}").map_err(|e| EngineError::io("writing prompt", e))?;
        self.output
            .flush()
            .map_err(|e| EngineError::io("flushing prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| EngineError::io("reading answer", e))?;
        if read == 0 {
            return Err(EngineError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").map_err(|e| EngineError::io("writing message", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_lines_and_writes_prompts() {
        let mut output = Vec::new();
        let mut console = Console::new("yes\r\nno\n".as_bytes(), &mut output);

        assert_eq!(console.ask("Meows? ").unwrap(), "yes");
        assert_eq!(console.ask("Barks? ").unwrap(), "no");
        console.say("done").unwrap();
        assert!(console.ask("More? ").unwrap_err().is_input_closed());

        assert_eq!(String::from_utf8(output).unwrap(), "Meows? Barks? done\nMore? ");
    }
}
