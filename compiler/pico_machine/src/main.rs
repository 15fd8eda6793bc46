//! Pico CLI

use pico_machine::commands::{check_file, lex_file, parse_file, parse_run_options, run_file};

fn main() {
    pico_machine::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: pico run <file> [--frames=N] [--seed=N]");
                std::process::exit(1);
            }
            let options = match parse_run_options(&args[3..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    std::process::exit(1);
                }
            };
            run_file(&args[2], &options);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: pico check <file>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: pico parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: pico lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("pico {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: pico <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Load a cart, call _init, then tick frames");
    println!("  check <file>     Parse and compile without running");
    println!("  parse <file>     Parse and list top-level statements");
    println!("  lex <file>       Tokenize and display tokens");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --frames=<n>     Frames to tick after _init (default: 0)");
    println!("  --seed=<n>       Fixed seed for rnd");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=pico_eval=debug) for trace output.");
}
