//! Debug commands: `parse` and `lex` for inspecting front-end output.

use pico_ir::LineIndex;

use super::{read_file, report_and_exit};

/// Parse a file and list its top-level statements.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let block = match pico_parse::parse(&content) {
        Ok(block) => block,
        Err(err) => report_and_exit(path, &content, &pico_eval::Error::from(err)),
    };
    let index = LineIndex::new(&content);

    println!("Parse result for '{path}':");
    println!("  Statements: {}", block.stmts.len());
    for stmt in &block.stmts {
        let (line, col) = index.line_col(stmt.span.start);
        println!("  {line}:{col} {}", stmt.kind.kind_name());
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = match pico_lexer::lex(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            let err = pico_eval::Error::Parse(err.into());
            report_and_exit(path, &content, &err)
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in &tokens {
        println!("  {tok:?}");
    }
}
