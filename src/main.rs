use std::io::{self, Write};
use std::sync::atomic::Ordering;

use miniline::{Completions, Editor, EditorError, SESSION_ACTIVE, print_key_codes_stdio};

/// Demo shell commands: name and one-line description, in the order `help`
/// lists them.
const COMMANDS: &[(&str, &str)] = &[
    ("help", "list available commands"),
    ("history", "show the history ring"),
    ("clear", "clear the screen"),
    ("multiline", "switch to multi-line editing"),
    ("singleline", "switch back to single-line editing"),
    ("keycodes", "echo raw key codes until 'quit' is typed"),
    ("echo", "print the arguments"),
    ("exit", "leave the shell"),
];

fn main() {
    env_logger::init();

    // Between edits the terminal is cooked and Ctrl-C arrives as SIGINT;
    // print the newline the terminal swallowed. While a session holds raw
    // mode the byte is handled inside the editor instead.
    ctrlc::set_handler(|| {
        if !SESSION_ACTIVE.load(Ordering::Relaxed) {
            println!();
            let _ = io::stdout().flush();
        }
    })
    .expect("Failed to set Ctrl-C handler");

    let mut editor = Editor::new();
    editor.set_completion_callback(complete);

    println!("Welcome to the miniline demo shell");
    loop {
        let line = match editor.read_line("mini> ") {
            Ok(line) => line,
            Err(EditorError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(EditorError::Eof) => {
                println!();
                break;
            }
            Err(EditorError::Io(error)) => {
                eprintln!("miniline: {error}");
                break;
            }
        };

        // The session leaves the cursor at the end of the prompt row;
        // command output starts on the next one.
        println!();

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.history_add(line);

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "help" => {
                for (name, desc) in COMMANDS {
                    println!("{name} - {desc}");
                }
            }
            "history" => {
                for (i, entry) in editor.history().iter().enumerate() {
                    println!("{:>4}  {entry}", i + 1);
                }
            }
            "clear" => editor.clear_screen(),
            "multiline" => {
                editor.set_multiline(true);
                println!("multi-line editing on");
            }
            "singleline" => {
                editor.set_multiline(false);
                println!("multi-line editing off");
            }
            "keycodes" => {
                println!("echoing key codes; type 'quit' to leave");
                if let Err(error) = print_key_codes_stdio() {
                    eprintln!("keycodes: {error}");
                }
            }
            "echo" => println!("{}", args.join(" ")),
            "exit" => break,
            _ => println!("\"{line}\" command not found."),
        }
    }
}

/// Tab completion for the demo shell: the first word completes against the
/// command table, later words complete as filesystem paths.
fn complete(line: &str, out: &mut Completions) {
    match line.rsplit_once(' ') {
        None => {
            for (name, _) in COMMANDS {
                if name.starts_with(line) {
                    out.add(*name);
                }
            }
        }
        Some((head, word)) => {
            let pattern = format!("{word}*");
            let Ok(paths) = glob::glob(&pattern) else {
                return;
            };
            let mut matches: Vec<String> = paths
                .filter_map(|entry| entry.ok())
                .map(|path| path.to_string_lossy().into_owned())
                .collect();
            matches.sort();
            for m in matches {
                out.add(format!("{head} {m}"));
            }
        }
    }
}
