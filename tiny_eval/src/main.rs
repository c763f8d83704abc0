use std::{
    env, fs,
    io::{self, Stdin, Stdout, Write},
};

use tiny_eval::{execute, interpret::Interpreter, parse, types::Value, Outcome};

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 1 {
        panic!("Too many arguments");
    }
    let mut interpreter = Interpreter::default();
    if args.is_empty() {
        run_repl(&mut interpreter);
    } else {
        run_file(&args[0], &mut interpreter);
    }
}

fn run_repl(interpreter: &mut Interpreter) {
    let (stdin, mut stdout) = (io::stdin(), io::stdout());
    while let Some(input) = read_input(&stdin, &mut stdout) {
        match input.trim() {
            "exit" => break,
            "" => continue,
            _ => run(&input, interpreter, &stdin, &mut stdout),
        }
    }
}

fn run_file(file_path: &str, interpreter: &mut Interpreter) {
    let source = fs::read_to_string(file_path).expect("Failed to read file");
    let (stdin, mut stdout) = (io::stdin(), io::stdout());
    run(&source, interpreter, &stdin, &mut stdout);
}

/// Reads one input, asking for more lines while a block is open.
fn read_input(stdin: &Stdin, stdout: &mut Stdout) -> Option<String> {
    let mut input = prompt(">>> ", stdin, stdout)?;
    while brace_depth(&input) > 0 {
        input.push_str(&prompt("... ", stdin, stdout)?);
    }
    Some(input)
}

fn prompt(text: &str, stdin: &Stdin, stdout: &mut Stdout) -> Option<String> {
    print!("{text}");
    stdout.flush().expect("Failed to flush stdout");
    let mut line = String::default();
    let n = stdin.read_line(&mut line).expect("Failed to read line");
    // If zero bytes are read, then exit (usually triggered by Ctrl-D)
    (n != 0).then_some(line)
}

fn brace_depth(input: &str) -> i32 {
    input.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

fn run(source: &str, interpreter: &mut Interpreter, stdin: &Stdin, stdout: &mut Stdout) {
    let parsed = parse(source);
    println!("Tokens:");
    for t in &parsed.tokens {
        println!(
            "  {:?}({}) line {}, position {}",
            t.kind,
            t,
            t.line + 1,
            t.range.start
        );
    }
    let probe = match &parsed.source {
        Ok(root) if root.has_switch() => {
            prompt("probe> ", stdin, stdout).map(|line| Value::from_probe(&line))
        }
        _ => None,
    };
    report(execute(parsed, interpreter, probe));
}

fn report(outcome: Outcome) {
    outcome.diagnostics.iter().for_each(|d| eprintln!("{d}"));
    outcome.output.iter().for_each(|v| println!("{v}"));
    match outcome.result {
        Ok(value) => println!("=> {value}"),
        Err(e) => eprintln!("{e}"),
    }
}
