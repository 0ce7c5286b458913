// marl - A small Lisp interpreter written in Rust
// Copyright (c) 2026 the Marl authors. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use marl_core::{Env, eval, register_builtins};
use marl_parser::{ReadError, Reader, read_str};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Marl v0.1.0");
        return;
    }

    // Create environment with builtins
    let env = Env::new();
    register_builtins(&env);

    // If files provided, evaluate them; otherwise start REPL
    if args.len() > 1 {
        run_files(&args[1..], &env);
    } else {
        run_repl(&env);
    }
}

/// Evaluate a sequence of source files
fn run_files(files: &[String], env: &Env) {
    for file_path in files {
        if let Err(e) = eval_file(file_path, env) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Evaluate a single source file
fn eval_file(file_path: &str, env: &Env) -> Result<(), String> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("marl") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}'",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .marl)",
                file_path
            ));
        }
    }

    // Read and evaluate the file
    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    let mut reader =
        Reader::new(&source).map_err(|e| format!("Read error in '{}': {}", file_path, e))?;

    // Evaluate all forms in the file
    loop {
        match reader.next_form() {
            Ok(Some(form)) => {
                eval(&form, env).map_err(|e| format!("Error in '{}': {}", file_path, e))?;
            }
            Ok(None) => break,
            Err(e) => return Err(format!("Read error in '{}': {}", file_path, e)),
        }
    }

    Ok(())
}

/// Run the interactive REPL
fn run_repl(env: &Env) {
    println!("Marl v0.1.0");

    loop {
        print!("marl=> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => match read_str(&input) {
                Ok(form) => match eval(&form, env) {
                    Ok(result) => println!("{}", result),
                    Err(e) => eprintln!("Error: {}", e),
                },
                // Blank and comment-only lines print nothing
                Err(ReadError::NoTokens) => {}
                Err(e) => eprintln!("{}", e),
            },
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}
