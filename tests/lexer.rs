use marmoset::interpreter::lexer::{Lexer, Token, TokenKind};

fn kinds(source: &str) -> Vec<(TokenKind, String)> {
    Lexer::new(source).map(|token| (token.kind, token.literal))
                      .collect()
}

#[test]
fn tokenizes_a_small_program() {
    let source = "let five = 5;\nlet add = fn(x, y) { x + y; };\nadd(five, 10.5);";
    let expected = [(TokenKind::Let, "let"),
                    (TokenKind::Ident, "five"),
                    (TokenKind::Assign, "="),
                    (TokenKind::Int, "5"),
                    (TokenKind::Semicolon, ";"),
                    (TokenKind::Let, "let"),
                    (TokenKind::Ident, "add"),
                    (TokenKind::Assign, "="),
                    (TokenKind::Function, "fn"),
                    (TokenKind::LParen, "("),
                    (TokenKind::Ident, "x"),
                    (TokenKind::Comma, ","),
                    (TokenKind::Ident, "y"),
                    (TokenKind::RParen, ")"),
                    (TokenKind::LBrace, "{"),
                    (TokenKind::Ident, "x"),
                    (TokenKind::Plus, "+"),
                    (TokenKind::Ident, "y"),
                    (TokenKind::Semicolon, ";"),
                    (TokenKind::RBrace, "}"),
                    (TokenKind::Semicolon, ";"),
                    (TokenKind::Ident, "add"),
                    (TokenKind::LParen, "("),
                    (TokenKind::Ident, "five"),
                    (TokenKind::Comma, ","),
                    (TokenKind::Float, "10.5"),
                    (TokenKind::RParen, ")"),
                    (TokenKind::Semicolon, ";")];

    let expected = expected.iter()
                           .map(|(kind, literal)| (*kind, (*literal).to_string()))
                           .collect::<Vec<_>>();
    assert_eq!(kinds(source), expected);
}

#[test]
fn recognizes_operators_and_keywords() {
    let source = "== != <= >= < > ! - / * : [ ] macro while for break if else return true false";
    let expected = vec![TokenKind::Eq,
                        TokenKind::NotEq,
                        TokenKind::LtEq,
                        TokenKind::GtEq,
                        TokenKind::Lt,
                        TokenKind::Gt,
                        TokenKind::Bang,
                        TokenKind::Minus,
                        TokenKind::Slash,
                        TokenKind::Asterisk,
                        TokenKind::Colon,
                        TokenKind::LBracket,
                        TokenKind::RBracket,
                        TokenKind::Macro,
                        TokenKind::While,
                        TokenKind::For,
                        TokenKind::Break,
                        TokenKind::If,
                        TokenKind::Else,
                        TokenKind::Return,
                        TokenKind::True,
                        TokenKind::False];

    let actual = Lexer::new(source).map(|token| token.kind).collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn keywords_inside_longer_names_are_identifiers() {
    let actual = kinds("format iffy letter fnord");
    assert!(actual.iter().all(|(kind, _)| *kind == TokenKind::Ident));
    assert_eq!(actual.len(), 4);
}

#[test]
fn strings_drop_their_quotes() {
    let actual = kinds(r#""foo bar" "";"#);
    assert_eq!(actual,
               vec![(TokenKind::String, "foo bar".to_string()),
                    (TokenKind::String, String::new()),
                    (TokenKind::Semicolon, ";".to_string())]);
}

#[test]
fn comments_are_skipped() {
    let actual = kinds("1 // one\n/* two\n three */ 3");
    assert_eq!(actual,
               vec![(TokenKind::Int, "1".to_string()), (TokenKind::Int, "3".to_string())]);
}

#[test]
fn tracks_line_numbers() {
    let source = "let a = 1;\n/* two\nlines */\nlet b = \"x\ny\";\nb";
    let tokens = Lexer::new(source).collect::<Vec<Token>>();

    let lines = tokens.iter()
                      .map(|token| (token.literal.as_str(), token.line))
                      .collect::<Vec<_>>();
    assert_eq!(lines,
               vec![("let", 1),
                    ("a", 1),
                    ("=", 1),
                    ("1", 1),
                    (";", 1),
                    ("let", 4),
                    ("b", 4),
                    ("=", 4),
                    ("x\ny", 4),
                    (";", 5),
                    ("b", 6)]);
}

#[test]
fn unknown_characters_become_illegal_tokens() {
    let actual = kinds("let x = @;");
    assert_eq!(actual[3], (TokenKind::Illegal, "@".to_string()));
}

#[test]
fn unterminated_string_is_illegal() {
    let tokens = Lexer::new("let s = \"abc").collect::<Vec<_>>();
    let last = tokens.last().unwrap();

    assert_eq!(last.kind, TokenKind::Illegal);
    assert_eq!(last.literal, "\"abc");
}

#[test]
fn end_of_input_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn token_kinds_display_like_the_error_messages_expect() {
    assert_eq!(TokenKind::Ident.to_string(), "IDENT");
    assert_eq!(TokenKind::Int.to_string(), "INT");
    assert_eq!(TokenKind::Semicolon.to_string(), ";");
    assert_eq!(TokenKind::Let.to_string(), "LET");
    assert_eq!(TokenKind::Illegal.to_string(), "ILLEGAL");
}
