use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::util::errors::InputError;


#[derive(Clone, Debug)]
struct Argument {
    pub name: String,
    pub is_required: bool,
    pub is_flag: bool,
}


#[derive(Default, Debug, PartialEq, Eq)]
pub struct ParsedArgs {
    args: HashMap<String, String>,
    flags: HashSet<String>,
}

impl ParsedArgs {
    pub fn get_arg(&self, name: &str) -> Option<String> {
        return self.args.get(name).map(|arg| String::from(arg));
    }

    pub fn get_flag(&self, name: &str) -> bool {
        return self.flags.contains(name)
    }

    /// Converts a supplied value, `Ok(None)` when the argument was omitted.
    pub fn get_parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, InputError> {
        return match self.args.get(name) {
            None => Ok(None),
            Some(value) => match value.parse::<T>() {
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => Err(InputError::new(&format!("'{}' is not a valid value for {}.", value, name))),
            }
        }
    }
}


#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: ParsedArgs,
}


/// Argument layout for one subcommand.
#[derive(Clone, Debug, Default)]
pub struct CommandParser {
    positional: Vec<Argument>,
    named: HashMap<String, Argument>,
    has_optional_positional: bool,
}

impl CommandParser {
    pub fn add_positional_arg(&mut self, name: &str, required: bool) -> Result<&mut Self, InputError> {
        if self.has_optional_positional && required {
            return Err(InputError::new("Required positional arguments cannot be added after optional ones."))
        }
        self.positional.push(Argument {
            name: String::from(name),
            is_required: required,
            is_flag: false,
        });
        if !required {
            self.has_optional_positional = true;
        }
        return Ok(self);
    }

    pub fn add_named_arg(&mut self, name: &str, keys: HashSet<&str>, required: bool) -> Result<&mut Self, InputError> {
        return self.add_keyed(name, keys, required, false);
    }

    pub fn add_flag_arg(&mut self, name: &str, keys: HashSet<&str>) -> Result<&mut Self, InputError> {
        return self.add_keyed(name, keys, false, true);
    }

    fn add_keyed(&mut self, name: &str, keys: HashSet<&str>, required: bool, flag: bool) -> Result<&mut Self, InputError> {
        if keys.is_empty() {
            return Err(InputError::new("Named arguments must supply at least one key."))
        }
        if keys.iter().any(|key| self.named.contains_key(*key)) {
            return Err(InputError::new("Some of the provided keys already belong to other arguments."))
        }
        for key in keys {
            self.named.insert(String::from(key), Argument {
                name: String::from(name),
                is_required: required,
                is_flag: flag,
            });
        }
        return Ok(self);
    }

    fn parse(&self, tokens: &[String]) -> Result<ParsedArgs, InputError> {
        let mut parsed: ParsedArgs = Default::default();
        let mut positional = self.positional.iter();
        let mut tokens = tokens.iter();
        while let Some(token) = tokens.next() {
            match self.named.get(token) {
                Some(arg) if arg.is_flag => { parsed.flags.insert(String::from(&arg.name)); },
                Some(arg) => match tokens.next() {
                    Some(value) => { parsed.args.insert(String::from(&arg.name), String::from(value)); },
                    None => return Err(InputError::new(&format!("No value was specified for {}.", token))),
                },
                None => match positional.next() {
                    Some(arg) => { parsed.args.insert(String::from(&arg.name), String::from(token)); },
                    None => return Err(InputError::new(&format!("Unexpected argument encountered: {}.", token))),
                },
            }
        }
        let required = self.positional.iter().chain(self.named.values()).filter(|arg| arg.is_required);
        for arg in required {
            if !parsed.args.contains_key(&arg.name) {
                return Err(InputError::new(&format!("Missing required argument '{}'.", arg.name)));
            }
        }
        return Ok(parsed);
    }
}


#[derive(Default)]
pub struct ArgumentParserBuilder {
    commands: HashMap<String, CommandParser>,
}

impl ArgumentParserBuilder {
    fn new() -> ArgumentParserBuilder {
        return Default::default();
    }

    pub fn add_subcommand(&mut self, name: &str) -> Result<&mut CommandParser, InputError> {
        if self.commands.contains_key(name) {
            return Err(InputError::new(&format!("Subcommand {} was registered twice.", name)))
        }
        return Ok(self.commands.entry(String::from(name)).or_default());
    }

    pub fn build(&self) -> ArgumentParser {
        return ArgumentParser {
            commands: self.commands.clone(),
        }
    }
}


pub struct ArgumentParser {
    commands: HashMap<String, CommandParser>,
}

impl ArgumentParser {
    pub fn builder() -> ArgumentParserBuilder {
        return ArgumentParserBuilder::new();
    }

    /// Tokenizes a line with shell quoting rules and parses it against the
    /// registered subcommands.
    pub fn parse(&self, input: &str) -> Result<ParsedCommand, InputError> {
        let tokens = shell_words::split(input)
            .map_err(|e| InputError::new(&format!("Could not split the input into words: {}.", e)))?;
        let (name, rest) = match tokens.split_first() {
            Some(split) => split,
            None => return Err(InputError::new("No command entered.")),
        };
        return match self.commands.get(name) {
            Some(command) => Ok(ParsedCommand {
                name: String::from(name),
                args: command.parse(rest)?,
            }),
            None => Err(InputError::new(&format!("Unknown command '{}'. Type 'help' for a list of commands.", name))),
        }
    }
}
