// Integration tests for the N4 front end pipeline

use n4c::parser::ast::*;
use n4c::parser::lexer::TokenKind;
use n4c::{compile, compile_with_config, FrontendConfig, Stage};

#[test]
fn test_minimal_function() {
    let result = compile("min.n4", "fn f(): int\n  return 1\nend\n");

    assert!(result.lexical_errors.is_empty());
    assert!(result.syntax_errors.is_empty());
    assert!(result.semantic_errors.is_empty());

    assert_eq!(result.program.items.len(), 1);
    match &result.program.items[0] {
        Item::Function(function) => {
            assert_eq!(function.name(), "f");
            assert!(function.params.is_empty());
            assert_eq!(function.return_type, Type::int());
            assert_eq!(function.body.len(), 1);
            assert!(matches!(
                function.body.statements[0],
                Statement::Return { line: 2, .. }
            ));
        }
        other => panic!("Expected function definition, got {:?}", other),
    }
}

#[test]
fn test_full_program() {
    let source = r#"; sums the numbers below a limit
fn sum_below(limit: uint): ulong
  total : ulong = 0
  i : uint = 0
  while i < limit
    total = total + i
    i = i + 1
  end
  return total
end

fn bump(p: ptr<int>): void
  *p = *p + 1
  return 0
end

count : int = 3
bump(&count)
result : ulong = sum_below(count)
if result >= 3
  result = result - 3
else
  result = 0
end
"#;
    let result = compile("sum.n4", source);

    assert!(!result.has_errors(), "{:?}", result.diagnostics().collect::<Vec<_>>());
    assert_eq!(result.program.functions().count(), 2);
    assert_eq!(result.program.items.len(), 6);
    assert_eq!(result.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_tokens_end_with_single_eof() {
    for source in ["", "x", "x : int = 1\n", "$$$", "fn\n\n\n"] {
        let result = compile("t.n4", source);
        let eofs = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eof)
            .count();

        assert_eq!(eofs, 1, "source {:?}", source);
        assert_eq!(result.tokens.last().map(|t| t.line), Some(0));
    }
}

#[test]
fn test_token_lines_count_newlines() {
    let source = "a\n\nb ; comment\n  c\n";
    let result = compile("lines.n4", source);
    let idents: Vec<(String, usize)> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| (t.literal.clone(), t.line))
        .collect();

    assert_eq!(
        idents,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 3),
            ("c".to_string(), 4)
        ]
    );
}

#[test]
fn test_keywords_need_exact_match() {
    let result = compile("kw.n4", "fnx intx fn int\n");
    let kinds: Vec<TokenKind> = result.tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Fn,
            TokenKind::Type,
            TokenKind::Newline,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_one_bad_statement_among_good_ones() {
    let source = "fn f(): int\n  a : int = 1\n  b = = 2\n  c : int = 3\n  d : int = 4\nend\n";
    let result = compile("bad.n4", source);

    assert_eq!(result.syntax_errors.len(), 1);
    assert_eq!(result.syntax_errors[0].line, 3);
    match &result.program.items[0] {
        Item::Function(function) => assert_eq!(function.body.len(), 3),
        other => panic!("Expected function definition, got {:?}", other),
    }
}

#[test]
fn test_invalid_lvalue_only() {
    let result = compile("lv.n4", "(1 + 2) = 3\n");

    let messages: Vec<&str> = result
        .diagnostics()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages, vec!["invalid lvalue"]);
}

#[test]
fn test_all_stages_report() {
    let source = "x : int = 1 @\nfn g(: int\nend\ny = x\n";
    let result = compile("mixed.n4", source);

    assert_eq!(result.lexical_errors.len(), 1);
    assert_eq!(result.lexical_errors[0].message, "invalid character: @");
    assert!(!result.syntax_errors.is_empty());
    assert_eq!(result.semantic_errors.len(), 1);
    assert_eq!(result.semantic_errors[0].message, "'y' used before definition");
    assert_eq!(result.semantic_errors[0].line, 4);
}

#[test]
fn test_emit_renders_every_stage() {
    let result = compile("emit.n4", "a = 1 ?\n2 = 3\n");
    let mut out = Vec::new();
    result.emit(&mut out, false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(
        text,
        "emit.n4:1: lexical error: invalid character: ?\n\
         emit.n4:2: syntax error: invalid lvalue\n\
         emit.n4:1: semantic error: 'a' used before definition\n"
    );
}

#[test]
fn test_emit_colored_keeps_text() {
    let result = compile("c.n4", "a = 1\n");
    let mut out = Vec::new();
    result.emit(&mut out, true).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("c.n4:1: "));
    assert!(text.contains("semantic error:"));
    assert!(text.trim_end().ends_with("'a' used before definition"));
}

#[test]
fn test_deep_parentheses_are_reported() {
    let depth = 500;
    let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
    let result = compile("deep.n4", &source);

    assert_eq!(result.syntax_errors.len(), 1);
    assert_eq!(result.syntax_errors[0].stage, Stage::Syntax);
    assert_eq!(
        result.syntax_errors[0].message,
        format!("nesting too deep (limit {})", n4c::config::DEFAULT_MAX_NESTING_DEPTH)
    );
}

#[test]
fn test_configured_nesting_limit() {
    let source = "x : int = 1\ny : int = ((((x))))\n";
    let config = FrontendConfig::default().with_max_nesting_depth(4);
    let result = compile_with_config("cfg.n4", source, &config);

    assert_eq!(result.syntax_errors.len(), 1);
    assert_eq!(result.syntax_errors[0].message, "nesting too deep (limit 4)");
    assert_eq!(result.syntax_errors[0].line, 2);

    let relaxed = compile_with_config("cfg.n4", source, &FrontendConfig::default());
    assert!(!relaxed.has_errors());
}

#[test]
fn test_very_long_operator_chain() {
    let terms = vec!["x"; 200_000].join(" + ");
    let source = format!("x : int = 1\ny : int = {}\nz : int = y\n", terms);
    let result = compile("chain.n4", &source);

    assert!(!result.has_errors());
    assert_eq!(result.program.items.len(), 3);
    drop(result);
}
