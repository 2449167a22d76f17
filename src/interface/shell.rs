use rustyline::{Editor, error::ReadlineError};

use crate::interface::arguments::{ArgumentParser, ParsedCommand};
use crate::util::errors::ShellError;


pub struct InteractiveShell {
    prompt: String,
    parser: ArgumentParser,
    editor: Editor<()>,
}


impl InteractiveShell {
    pub fn new(prompt: Option<&str>, parser: ArgumentParser) -> InteractiveShell {
        let default_prompt = ">>> ";
        return InteractiveShell {
            prompt: String::from( match prompt { Some(x) => x, None => default_prompt } ),
            parser: parser,
            editor: Editor::<()>::new(),
        }
    }

    pub fn empty_line(&self) {
        println!();
    }

    pub fn output(&self, output: &str) {
        println!("{}", output);
    }

    /// Reads one trimmed line. Ctrl-C and Ctrl-D both close the shell.
    pub fn input(&mut self, prompt: &str) -> Result<String, ShellError> {
        return match self.editor.readline(prompt) {
            Ok(line) => Ok(String::from(line.trim())),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Err(ShellError::Closed),
            Err(e) => Err(ShellError::Readline(e)),
        }
    }

    pub fn get_command(&mut self) -> Result<ParsedCommand, ShellError> {
        let prompt = self.prompt.clone();
        let line = self.input(&prompt)?;
        if !line.is_empty() {
            self.editor.add_history_entry(line.as_str());
        }
        return Ok(self.parser.parse(&line)?);
    }
}
