//! Interactive demo of the VFS console
//!
//! Usage: `cargo run --example vfs_demo -- [DATA_DIR] [CONFIG_JSON]`
//!
//! With a data directory the filesystem survives restarts; without one it
//! lives in memory. End a line with a tab character to complete it instead
//! of running it. `exit` quits.

use services_vfs::{KeyValueStore, VfsConfig};
use std::io::{self, BufRead, Write};
use std::path::Path;
use vfs_console::{bootstrap_in_directory, bootstrap_in_memory, CommandHandler, TabCompletion};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.get(1) {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        },
        None => VfsConfig::default(),
    };

    println!("=== VFS Console Demo ===");
    println!("Type 'help' for commands, 'exit' to quit.\n");

    match args.first() {
        Some(dir) => match bootstrap_in_directory(Path::new(dir), config) {
            Ok(console) => repl(console),
            Err(e) => {
                eprintln!("cannot open {}: {}", dir, e);
                std::process::exit(1);
            }
        },
        None => repl(bootstrap_in_memory(config)),
    }
}

fn load_config(path: &Path) -> Result<VfsConfig, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    VfsConfig::from_json(&bytes).map_err(|e| format!("{}: {}", path.display(), e))
}

fn repl<S: KeyValueStore>(mut console: CommandHandler<S>) {
    report_warnings(&mut console);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("user@vfs:{}$ ", console.pwd());
        if io::stdout().flush().is_err() {
            return;
        }

        let Some(Ok(line)) = lines.next() else {
            return;
        };

        if let Some(partial) = line.strip_suffix('\t') {
            match console.complete(partial) {
                TabCompletion::Replaced(completed) => println!("{}", completed),
                TabCompletion::Candidates(names) => println!("{}", names.join("  ")),
                TabCompletion::Unchanged => println!("{}", partial),
            }
            continue;
        }

        if line.trim() == "exit" {
            return;
        }

        match console.execute(&line) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => println!("{}", output),
            Err(message) => eprintln!("{}", message),
        }
        report_warnings(&mut console);
    }
}

fn report_warnings<S: KeyValueStore>(console: &mut CommandHandler<S>) {
    for entry in console.take_warnings() {
        eprintln!("warning: {}", entry);
    }
}
