#[cfg(test)]
use super::*;
#[cfg(test)]
use crate::ast::Relation;

use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static TRACES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Records parser log lines for the current test thread.
struct ParserLog;

impl log::Log for ParserLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target().starts_with("brik::parser")
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            TRACES.with(|t| t.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn capture_logs(f: impl FnOnce()) -> Vec<String> {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&ParserLog).expect("Logger already installed");
        log::set_max_level(log::LevelFilter::Trace);
    });
    TRACES.with(|t| t.borrow_mut().clear());
    f();
    TRACES.with(|t| t.take())
}

fn parse_ok(input: &str) -> Document {
    parse(input).expect("Failed to parse document")
}

fn block_at<'a>(doc: &'a Document, path: &str) -> &'a Block {
    doc.lookup(path)
        .and_then(Value::as_block)
        .unwrap_or_else(|| panic!("Expected '{}' to be a block", path))
}

#[test]
fn test_parser_basic_document() {
    let input = r#"
// Snake
parametros_generales {
    mi_juego = "Snake",
    version = "1.0.0"
    cuadricula = [50, 50]
    celda = 10,
}

reglas {
    vidas_iniciales = 3
    tick_base = 0.5
    hard_drop = false
}
"#;

    let doc = parse_ok(input);
    let keys: Vec<_> = doc.items.keys().cloned().collect();
    assert_eq!(keys, vec!["parametros_generales", "reglas"]);

    assert_eq!(doc.lookup("parametros_generales.mi_juego"), Some(&Value::String("Snake".into())));
    assert_eq!(
        doc.lookup("parametros_generales.cuadricula"),
        Some(&Value::List(vec![Value::Int(50), Value::Int(50)]))
    );
    assert_eq!(doc.lookup("reglas.vidas_iniciales"), Some(&Value::Int(3)));
    assert_eq!(doc.lookup("reglas.tick_base"), Some(&Value::Float(0.5)));
    assert_eq!(doc.lookup("reglas.hard_drop"), Some(&Value::Bool(false)));
}

#[test]
fn test_empty_input_is_empty_document() {
    assert_eq!(parse_ok(""), Document::default());
    assert_eq!(parse_ok("  // nada\n/* tampoco */"), Document::default());
}

#[test]
fn test_integer_and_float_kinds() {
    for n in [0i64, 7, -12, 123456789, i64::MAX, i64::MIN] {
        let doc = parse_ok(&format!("x = {}", n));
        assert_eq!(doc.get("x"), Some(&Value::Int(n)));
    }

    let doc = parse_ok("x = 2.0 y = -0.25");
    assert_eq!(doc.get("x"), Some(&Value::Float(2.0)));
    assert_eq!(doc.get("y"), Some(&Value::Float(-0.25)));
}

#[test]
fn test_string_escape_decoding() {
    let doc = parse_ok(r#"x = "a\nb""#);
    assert_eq!(doc.get("x"), Some(&Value::String("a\nb".into())));
    assert_eq!(doc.get("x").and_then(Value::as_str).map(str::len), Some(3));
}

#[test]
fn test_top_level_block_merge() {
    let doc = parse_ok("a { x = 1 } a { y = 2 }");
    let a = block_at(&doc, "a");
    let keys: Vec<_> = a.entries.keys().cloned().collect();
    assert_eq!(keys, vec!["x", "y"]);
    assert_eq!(a.get("x"), Some(&Value::Int(1)));
    assert_eq!(a.get("y"), Some(&Value::Int(2)));
}

#[test]
fn test_assigned_block_merges_with_declared_block() {
    let doc = parse_ok("a { x = 1, y = 1 } a = { y = 2 }");
    let a = block_at(&doc, "a");
    assert_eq!(a.get("x"), Some(&Value::Int(1)));
    assert_eq!(a.get("y"), Some(&Value::Int(2)));
}

#[test]
fn test_incompatible_duplicate_both_orders() {
    let err = parse("a = 1\na { x = 2 }").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(202), .. }));
    assert_eq!((err.line(), err.column()), (Some(2), Some(1)));

    let err = parse("a { x = 2 }\na = 1").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(202), .. }));
}

#[test]
fn test_incompatible_duplicate_inside_block() {
    let err = parse("s { k = [1] k { z = 1 } }").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("'k'"));
}

#[test]
fn test_scalar_redeclaration_last_wins() {
    let doc = parse_ok("a = 1 b = 2 a = \"uno\"");
    let keys: Vec<_> = doc.items.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(doc.get("a"), Some(&Value::String("uno".into())));
}

#[test]
fn test_list_trailing_comma_is_insignificant() {
    assert_eq!(parse_ok("x = [1,2,3,]"), parse_ok("x = [1,2,3]"));
    assert_eq!(parse_ok("x = []").get("x"), Some(&Value::List(vec![])));
}

#[test]
fn test_nested_lists_and_blocks_in_lists() {
    let doc = parse_ok(r#"forma = [[0, 1], [1, 1], { c = "rojo" }]"#);
    let list = doc.get("forma").and_then(Value::as_list).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0], Value::List(vec![Value::Int(0), Value::Int(1)]));
    assert_eq!(
        list[2].as_block().and_then(|b| b.get("c")),
        Some(&Value::String("rojo".into()))
    );
}

#[test]
fn test_list_rejects_double_comma_and_missing_close() {
    let err = parse("x = [1,,2]").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.column(), Some(8));

    let err = parse("x = [1 2]").unwrap_err();
    assert!(err.to_string().contains("',' or ']'"));
}

#[test]
fn test_adjacency_equals_commas() {
    assert_eq!(parse_ok("b { a = 1 b = 2 }"), parse_ok("b { a = 1, b = 2 }"));
    assert_eq!(parse_ok("b {\n a = 1\n b = 2\n}"), parse_ok("b { a = 1, b = 2, }"));

    let doc = parse_ok("b { a = 1 b = 2 }");
    let b = block_at(&doc, "b");
    assert_eq!(b.get("a"), Some(&Value::Int(1)));
    assert_eq!(b.get("b"), Some(&Value::Int(2)));
}

#[test]
fn test_separator_rejects_other_tokens() {
    let err = parse("b { a = 1 2 }").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.column(), Some(11));

    let err = parse("b { a = 1,, b = 2 }").unwrap_err();
    assert_eq!(err.column(), Some(11));
}

#[test]
fn test_relations_preserve_order() {
    let doc = parse_ok("eventos { colision -> perder_vida, gano -> siguiente_nivel }");
    let eventos = block_at(&doc, "eventos");
    assert!(eventos.entries.is_empty());
    assert_eq!(
        eventos.relations,
        vec![
            Relation { from: "colision".into(), to: "perder_vida".into() },
            Relation { from: "gano".into(), to: "siguiente_nivel".into() },
        ]
    );
}

#[test]
fn test_relation_target_may_be_string() {
    let doc = parse_ok(r#"controles { izquierda -> "mover izq" arriba -> rotar }"#);
    let controles = block_at(&doc, "controles");
    assert_eq!(controles.relations[0].to, "mover izq");
    assert_eq!(controles.relations[1].to, "rotar");
}

#[test]
fn test_relation_target_must_be_ident_or_string() {
    let err = parse("e { a -> 1 }").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.column(), Some(10));
}

#[test]
fn test_relations_and_keys_coexist() {
    let doc = parse_ok("e { a -> b, vidas = 3, c -> d }");
    let e = block_at(&doc, "e");
    assert_eq!(e.entries.len(), 1);
    assert_eq!(e.relations.len(), 2);
}

#[test]
fn test_arrow_not_allowed_at_top_level() {
    let err = parse("a -> b").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!((err.line(), err.column()), (Some(1), Some(3)));
    assert!(err.to_string().contains("'->'"));
}

#[test]
fn test_missing_operator_inside_block() {
    let err = parse("b {\n  a 1\n}").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!((err.line(), err.column()), (Some(2), Some(5)));
    assert!(err.to_string().contains("number 1"));
}

#[test]
fn test_unterminated_block_and_list_fail_at_eof() {
    let err = parse("a { x = 1").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("end of input"));
    assert_eq!((err.line(), err.column()), (Some(1), Some(10)));

    let err = parse("a = [1, 2").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("end of input"));
}

#[test]
fn test_top_level_must_start_with_identifier() {
    let err = parse("= 1").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.column(), Some(1));

    let err = parse("a = 1,").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_lex_errors_surface_through_parse() {
    let err = parse("a = 1\n/* sin cerrar").unwrap_err();
    assert!(err.is_lex_error());
    assert_eq!((err.line(), err.column()), (Some(2), Some(1)));
}

#[test]
fn test_reserved_key_with_relations_is_rejected() {
    let err = parse("e { a -> b, _mappings = 1 }").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(203), .. }));

    // Merging can also produce the collision.
    let err = parse("e { a -> b } e { _mappings = 1 }").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(203), .. }));
}

#[test]
fn test_reserved_key_is_rejected_without_relations() {
    // A list of from/to blocks under this name would read back as relations.
    let err = parse(r#"e { _mappings = [{ from = "a", to = "b" }] }"#).unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(203), .. }));
    assert_eq!((err.line(), err.column()), (Some(1), Some(5)));

    let err = parse("e { _mappings { from = a } }").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(203), .. }));

    let err = parse("_mappings = 1").unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(203), .. }));
    assert_eq!((err.line(), err.column()), (Some(1), Some(1)));
}

#[test]
fn test_merge_replaces_relations_only_when_incoming_has_them() {
    let doc = parse_ok("e { a -> b } e { x = 1 }");
    assert_eq!(block_at(&doc, "e").relations.len(), 1);

    let doc = parse_ok("e { a -> b } e { c -> d }");
    assert_eq!(
        block_at(&doc, "e").relations,
        vec![Relation { from: "c".into(), to: "d".into() }]
    );
}

#[test]
fn test_parse_single_value() {
    let mut parser = Parser::new("{ a = [true, \"s\"] }").unwrap();
    let value = parser.parse_value().unwrap();
    let block = value.as_block().unwrap();
    assert_eq!(
        block.get("a"),
        Some(&Value::List(vec![Value::Bool(true), Value::String("s".into())]))
    );
}

#[test]
fn test_every_token_is_traced_including_the_first() {
    let lines = capture_logs(|| {
        parse("a = 1").unwrap();
    });
    let tokens: Vec<_> = lines.iter().filter(|l| l.starts_with("token ")).cloned().collect();
    assert_eq!(
        tokens,
        vec![
            "token identifier 'a' at 1:1",
            "token '=' at 1:3",
            "token number 1 at 1:5",
            "token end of input at 1:6",
        ]
    );
}

#[test]
fn test_nesting_at_the_limit_parses() {
    let source = format!("x = {}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
    let doc = parse_ok(&source);

    let mut depth = 0;
    let mut value = doc.get("x").unwrap();
    while let Some(items) = value.as_list() {
        depth += 1;
        match items.first() {
            Some(inner) => value = inner,
            None => break,
        }
    }
    assert_eq!(depth, MAX_DEPTH);
}

#[test]
fn test_deep_lists_fail_cleanly() {
    let source = format!("x = {}{}", "[".repeat(50_000), "]".repeat(50_000));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(204), .. }));
    // Reported at the first bracket past the limit.
    assert_eq!((err.line(), err.column()), (Some(1), Some(5 + MAX_DEPTH)));
}

#[test]
fn test_deep_blocks_fail_cleanly() {
    let source = format!("a {}{}", "{ b ".repeat(50_000), "}".repeat(50_000));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(204), .. }));

    // Blocks and lists count toward the same limit.
    let source = format!("a = {}{}", "[{ b = ".repeat(MAX_DEPTH), "1");
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, BrikError::ParseError { code: Some(204), .. }));
}

#[test]
fn test_deepest_document_survives_export() {
    let mut source = String::from("e ");
    for _ in 1..MAX_DEPTH {
        source.push_str("{ b ");
    }
    source.push_str("{ a -> b }");
    source.push_str(&"}".repeat(MAX_DEPTH - 1));

    let doc = parse_ok(&source);
    let json = crate::export::to_json_string(&doc, crate::export::Format::Compact).unwrap();
    assert_eq!(crate::export::document_from_json_str(&json).unwrap(), doc);
}
