//! Seed layout
//!
//! The canonical namespace restored by a reset or when no usable state
//! was persisted.

use vfs_tree::{Entry, Timestamp, EXEC_PERMISSIONS};

const PASSWD: &str =
    "root:x:0:0:root:/root:/bin/bash\nuser:x:1000:1000:User:/home/user:/bin/bash";

const HOSTNAME: &str = "miniOS";

const README: &str = "Welcome to miniOS!\n\n\
This is a simulated mini operating system with a functional CLI.\n\n\
Available commands:\n\
- ls: List directory contents\n\
- cat: Display file contents\n\
- echo: Display a message\n\
- mkdir: Create a directory\n\
- touch: Create a file\n\
- rm: Remove a file or directory\n\
- cd: Change directory\n\
- pwd: Print current directory\n\
- ps: List processes\n\
- kill: Terminate a process\n\
- help: Show available commands";

const NOTES: &str = "TODO: Learn more about operating systems\n\
Check out resources on:\n\
- Process management\n\
- Memory allocation\n\
- File systems\n\
- I/O handling";

const SYSTEM_LOG: &str = "System boot completed successfully\n\
Kernel initialized\n\
File system mounted\n\
Network interfaces configured\n\
Services started";

fn program(name: &str, now: Timestamp) -> Entry {
    Entry::file(name, "", now).with_permissions(EXEC_PERMISSIONS)
}

/// Builds the seed tree with every timestamp set to `now`
pub fn seed_tree(now: Timestamp) -> Entry {
    Entry::root(now)
        .with_child(
            Entry::directory("bin", now)
                .with_child(program("ls", now))
                .with_child(program("cat", now))
                .with_child(program("echo", now))
                .with_child(program("mkdir", now)),
        )
        .with_child(
            Entry::directory("etc", now)
                .with_child(Entry::file("passwd", PASSWD, now))
                .with_child(Entry::file("hostname", HOSTNAME, now)),
        )
        .with_child(
            Entry::directory("home", now).with_child(
                Entry::directory("user", now)
                    .with_child(Entry::file("readme.txt", README, now))
                    .with_child(Entry::file("notes.txt", NOTES, now)),
            ),
        )
        .with_child(
            Entry::directory("var", now).with_child(
                Entry::directory("log", now)
                    .with_child(Entry::file("system.log", SYSTEM_LOG, now)),
            ),
        )
}
