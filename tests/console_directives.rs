// tests/console_directives.rs

use sardine_bridge::cli::{ConsoleCommand, ConsoleParser};

#[test]
fn directives_map_to_commands() {
    let mut parser = ConsoleParser::new();
    assert_eq!(parser.feed(":start"), Some(ConsoleCommand::Start));
    assert_eq!(parser.feed(":stop"), Some(ConsoleCommand::Stop));
    assert_eq!(parser.feed(":silence"), Some(ConsoleCommand::Silence));
    assert_eq!(parser.feed(":panic"), Some(ConsoleCommand::Panic));
    assert_eq!(parser.feed(":help"), Some(ConsoleCommand::Help));
    assert_eq!(parser.feed(":quit"), Some(ConsoleCommand::Quit));
    assert_eq!(parser.feed(":q"), Some(ConsoleCommand::Quit));
}

#[test]
fn blank_line_flushes_buffered_block() {
    let mut parser = ConsoleParser::new();
    assert_eq!(parser.feed("d1 >> play()"), None);
    assert_eq!(parser.feed("d2 >> play()"), None);
    assert_eq!(
        parser.feed(""),
        Some(ConsoleCommand::SendBlock(
            "d1 >> play()\nd2 >> play()".to_string()
        ))
    );
    // The buffer is gone; another blank line sends nothing.
    assert_eq!(parser.feed(""), None);
}

#[test]
fn leading_indentation_is_preserved() {
    let mut parser = ConsoleParser::new();
    parser.feed("def f():");
    parser.feed("    pass");
    assert_eq!(
        parser.feed(""),
        Some(ConsoleCommand::SendBlock("def f():\n    pass".to_string()))
    );
}

#[test]
fn send_directive_parses_file_and_line() {
    let mut parser = ConsoleParser::new();
    assert_eq!(
        parser.feed(":send boids.py 12"),
        Some(ConsoleCommand::SendAt {
            file: "boids.py".to_string(),
            line: 12,
        })
    );
}

#[test]
fn sendline_directive_parses_file_and_line() {
    let mut parser = ConsoleParser::new();
    assert_eq!(
        parser.feed(":sendline boids.py 3"),
        Some(ConsoleCommand::SendLineAt {
            file: "boids.py".to_string(),
            line: 3,
        })
    );
}

#[test]
fn malformed_directives_are_ignored() {
    let mut parser = ConsoleParser::new();
    assert_eq!(parser.feed(":send boids.py"), None);
    assert_eq!(parser.feed(":sendline boids.py"), None);
    assert_eq!(parser.feed(":send boids.py twelve"), None);
    assert_eq!(parser.feed(":frobnicate"), None);
}

#[test]
fn flush_drains_pending_block_on_eof() {
    let mut parser = ConsoleParser::new();
    parser.feed("tail block");
    assert_eq!(
        parser.flush(),
        Some(ConsoleCommand::SendBlock("tail block".to_string()))
    );
    assert_eq!(parser.flush(), None);
}
