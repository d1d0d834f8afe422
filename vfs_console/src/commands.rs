//! Console commands for the VFS engine
//!
//! This module maps shell-style command lines onto engine operations and
//! turns engine errors into the messages a terminal user sees.

use services_logger::{LogEntry, LogLevel};
use services_vfs::{KeyValueStore, VfsEngine, VfsError, VfsOperations, WriteMode};
use vfs_tree::{Completion, Entry};

const HELP: &str = "\
Available commands:
  ls [path]             List directory contents
  cd [path]             Change directory (default: home)
  pwd                   Print working directory
  cat <name>            Display file contents
  touch <name>          Create an empty file
  mkdir <name>          Create a directory
  rm <name>             Remove a file or directory
  stat <path>           Show entry details
  echo <text> [> name]  Print text, or write it to a file (>> appends)
  reset                 Restore the default filesystem
  help                  Display this help message";

/// Result of completing a partially typed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCompletion {
    /// The whole input with its last token completed
    Replaced(String),
    /// Several names could follow; directories carry a trailing `/`
    Candidates(Vec<String>),
    /// Nothing to complete
    Unchanged,
}

/// CLI Command handler
pub struct CommandHandler<S: KeyValueStore> {
    engine: VfsEngine<S>,
}

impl<S: KeyValueStore> CommandHandler<S> {
    /// Creates a handler that dispatches to `engine`
    pub fn new(engine: VfsEngine<S>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &VfsEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut VfsEngine<S> {
        &mut self.engine
    }

    /// Shuts the console down, handing back its engine
    pub fn into_engine(self) -> VfsEngine<S> {
        self.engine
    }

    /// Runs one command line
    ///
    /// Commands without output return an empty string. An empty line is
    /// not an error.
    pub fn execute(&mut self, line: &str) -> Result<String, String> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(String::new());
        };
        let args: Vec<&str> = words.collect();
        let first = args.first().copied();

        match command.to_lowercase().as_str() {
            "ls" => self.ls(first.unwrap_or("")),
            "cd" => self.cd(first),
            "pwd" => Ok(self.pwd()),
            "cat" => self.cat(first.ok_or("cat: missing file operand")?),
            "touch" => self.touch(first.ok_or("touch: missing file operand")?),
            "mkdir" => self.mkdir(first.ok_or("mkdir: missing operand")?),
            "rm" => self.rm(first.ok_or("rm: missing operand")?),
            "stat" => self.stat(first.ok_or("stat: missing operand")?),
            "echo" => self.echo(&args),
            "reset" => Ok(self.reset()),
            "help" => Ok(HELP.to_string()),
            _ => Err(format!("Command not found: {}", command)),
        }
    }

    /// Lists directory contents
    ///
    /// Example: `ls /home/user`
    pub fn ls(&self, path: &str) -> Result<String, String> {
        let target = if path.is_empty() { None } else { Some(path) };
        let entries = self
            .engine
            .list(target)
            .map_err(|_| format!("ls: cannot access '{}': No such file or directory", path))?;

        if entries.is_empty() {
            return Ok("Empty directory".to_string());
        }
        let names: Vec<String> = entries.iter().map(display_name).collect();
        Ok(names.join("  "))
    }

    /// Changes the working directory; `None` goes home
    ///
    /// Example: `cd ../docs`
    pub fn cd(&mut self, path: Option<&str>) -> Result<String, String> {
        let path = match path {
            Some(path) => path.to_string(),
            None => self.engine.config().home_path(),
        };
        self.engine
            .change_directory(&path)
            .map_err(|_| format!("cd: {}: No such directory", path))?;
        Ok(String::new())
    }

    pub fn pwd(&self) -> String {
        self.engine.current_path_string()
    }

    /// Prints a file in the working directory
    ///
    /// Example: `cat readme.txt`
    pub fn cat(&self, name: &str) -> Result<String, String> {
        self.engine
            .read(name)
            .map(str::to_string)
            .map_err(|_| format!("cat: {}: No such file", name))
    }

    /// Creates an empty file
    ///
    /// Example: `touch todo.txt`
    pub fn touch(&mut self, name: &str) -> Result<String, String> {
        match self.engine.create(name, "") {
            Ok(()) => Ok(String::new()),
            Err(VfsError::AlreadyExists(_)) => Err(format!("touch: {}: File already exists", name)),
            Err(e) => Err(describe("touch", name, &e)),
        }
    }

    /// Creates a directory
    ///
    /// Example: `mkdir projects`
    pub fn mkdir(&mut self, name: &str) -> Result<String, String> {
        match self.engine.mkdir(name) {
            Ok(()) => Ok(String::new()),
            Err(VfsError::AlreadyExists(_)) => Err(format!(
                "mkdir: cannot create directory '{}': Already exists",
                name
            )),
            Err(e) => Err(describe("mkdir", name, &e)),
        }
    }

    /// Removes an entry and everything below it
    ///
    /// Example: `rm notes.txt`
    pub fn rm(&mut self, name: &str) -> Result<String, String> {
        match self.engine.delete(name) {
            Ok(()) => Ok(String::new()),
            Err(VfsError::NotFound(_)) => Err(format!(
                "rm: cannot remove '{}': No such file or directory",
                name
            )),
            Err(e) => Err(describe("rm", name, &e)),
        }
    }

    /// Displays entry information
    ///
    /// Example: `stat /etc/hostname`
    pub fn stat(&self, path: &str) -> Result<String, String> {
        let entry = self
            .engine
            .stat(path)
            .map_err(|_| format!("stat: cannot stat '{}': No such file or directory", path))?;

        let mut output = format!("Name: {}\n", entry.name);
        if let Some(size) = entry.size() {
            output.push_str("Type: file\n");
            output.push_str(&format!("Size: {} bytes\n", size));
        } else {
            output.push_str("Type: directory\n");
            let count = entry.children().map_or(0, <[Entry]>::len);
            output.push_str(&format!("Entries: {}\n", count));
        }
        output.push_str(&format!("Permissions: {}\n", entry.permissions));
        output.push_str(&format!("Created: {}\n", entry.created));
        output.push_str(&format!("Modified: {}", entry.modified));
        Ok(output)
    }

    /// Prints its arguments, or writes them to a file
    ///
    /// Example: `echo hello >> notes.txt`
    pub fn echo(&mut self, args: &[&str]) -> Result<String, String> {
        let Some(index) = args.iter().position(|a| *a == ">" || *a == ">>") else {
            return Ok(args.join(" "));
        };

        let mode = if args[index] == ">>" {
            WriteMode::Append
        } else {
            WriteMode::Replace
        };
        let name = *args.get(index + 1).ok_or("echo: missing file operand")?;
        let text = args[..index].join(" ");

        match self.engine.write(name, &text, mode) {
            Ok(()) => Ok(String::new()),
            Err(VfsError::AlreadyExists(_)) => Err(format!("echo: {}: Is a directory", name)),
            Err(e) => Err(describe("echo", name, &e)),
        }
    }

    pub fn reset(&mut self) -> String {
        self.engine.reset();
        "Filesystem reset to defaults".to_string()
    }

    /// Completes the last token of `input`
    ///
    /// The command word itself is never completed. A token that cannot be
    /// resolved leaves the input unchanged.
    pub fn complete(&self, input: &str) -> TabCompletion {
        let Some((index, space)) = input.char_indices().rev().find(|(_, c)| c.is_whitespace())
        else {
            return TabCompletion::Unchanged;
        };
        let (head, token) = input.split_at(index + space.len_utf8());
        if head.trim().is_empty() {
            return TabCompletion::Unchanged;
        }

        match self.engine.complete(token) {
            Ok(Completion::Unique(completed)) => {
                TabCompletion::Replaced(format!("{}{}", head, completed))
            }
            Ok(Completion::Candidates(candidates)) => TabCompletion::Candidates(
                candidates
                    .into_iter()
                    .map(|c| {
                        if c.is_directory {
                            format!("{}/", c.name)
                        } else {
                            c.name
                        }
                    })
                    .collect(),
            ),
            Ok(Completion::NoMatch) | Err(_) => TabCompletion::Unchanged,
        }
    }

    /// Drains the engine log, returning warnings and errors
    pub fn take_warnings(&mut self) -> Vec<LogEntry> {
        self.engine
            .drain_logs()
            .into_iter()
            .filter(|e| e.level >= LogLevel::Warn)
            .collect()
    }
}

fn display_name(entry: &Entry) -> String {
    if entry.is_directory() {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

fn describe(command: &str, name: &str, error: &VfsError) -> String {
    match error {
        VfsError::InvalidName(_) => format!("{}: {}: Invalid name", command, name),
        other => format!("{}: {}", command, other),
    }
}
