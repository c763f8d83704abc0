pub mod controller;
pub mod dispatch;
pub mod error;
pub mod interpret;
pub mod symbols;
pub mod types;

use error::{Diagnostic, Exception};
use interpret::Interpreter;
use log::{trace, warn};
use tiny_syntax::{
    ast::Source,
    error::{LexError, ParseError},
    lex::Lexer,
    parse::Parser,
    token::Token,
};
use types::Value;

/// One input, lexed and parsed but not yet run.
#[derive(Debug)]
pub struct Parsed {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
    pub source: Result<Source, ParseError>,
}

/// Everything a front end needs to show for one input.
#[derive(Debug)]
pub struct Outcome {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    pub output: Vec<Value>,
    pub result: Result<Value, Exception>,
}

pub fn parse(source: &str) -> Parsed {
    trace!("Lexing {source}");
    let (tokens, errors) = Lexer::new(source).lex_all();
    errors.iter().for_each(|e| warn!("{e}"));
    trace!("Parsing {tokens:#?}");
    let source = Parser::new(&tokens).parse_all();
    Parsed {
        tokens,
        errors,
        source,
    }
}

/// Runs a parsed input against the session. Nothing is evaluated when
/// parsing failed. The probe, if any, only applies to this input.
pub fn execute(parsed: Parsed, interpreter: &mut Interpreter, probe: Option<Value>) -> Outcome {
    let Parsed {
        tokens,
        errors,
        source,
    } = parsed;
    let result = match source {
        Ok(root) => {
            trace!("Interpreting {root:#?}");
            interpreter.set_probe(probe);
            let result = interpreter.interpret_all(&root.items);
            interpreter.set_probe(None);
            result
        }
        Err(e) => Err(Exception::from(e)),
    };

    let mut diagnostics: Vec<Diagnostic> = errors.into_iter().map(Diagnostic::Lex).collect();
    diagnostics.append(&mut interpreter.take_diagnostics());
    Outcome {
        tokens,
        diagnostics,
        output: interpreter.take_output(),
        result,
    }
}

pub fn run_one(source: &str, interpreter: &mut Interpreter, probe: Option<Value>) -> Outcome {
    execute(parse(source), interpreter, probe)
}
