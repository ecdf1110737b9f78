// Scope and name-binding tests through the public API

use n4c::parser::ast::*;
use n4c::parser::{parse, tokenize};
use n4c::semantic::{analyze, SemanticAnalyzer};
use n4c::{compile, Diagnostic};

fn semantic_messages(source: &str) -> Vec<String> {
    compile("test.n4", source)
        .semantic_errors
        .into_iter()
        .map(|d| d.message)
        .collect()
}

#[test]
fn test_undefined_name_reported_once() {
    let source = "x = 1\nx = x\nif x\n  x = 2\nend\nwhile x < 3\n  x = x + 1\nend\n";
    assert_eq!(semantic_messages(source), vec!["'x' used before definition"]);
}

#[test]
fn test_if_local_not_visible_after_end() {
    let source = "flag : int = 1\nif flag\n  local : int = 5\nend\nafter : int = local\n";
    let result = compile("scope.n4", source);

    assert_eq!(result.semantic_errors.len(), 1);
    assert_eq!(result.semantic_errors[0].message, "'local' used before definition");
    assert_eq!(result.semantic_errors[0].line, 5);
}

#[test]
fn test_redefinition_in_one_scope() {
    let result = compile("redef.n4", "x : int = 1\nx : int = 2\n");

    assert_eq!(result.semantic_errors.len(), 1);
    assert_eq!(result.semantic_errors[0].message, "redefinition of 'x'");
    assert_eq!(result.semantic_errors[0].line, 2);
}

#[test]
fn test_same_name_in_sibling_functions() {
    let source = "fn a(v: int): int\n  t : int = v\n  return t\nend\nfn b(v: int): int\n  t : int = v\n  return t\nend\n";
    assert!(semantic_messages(source).is_empty());
}

#[test]
fn test_function_name_clashes_with_variable() {
    let source = "f : int = 0\nfn f(): int\n  return 1\nend\n";
    assert_eq!(semantic_messages(source), vec!["redefinition of 'f'"]);
}

#[test]
fn test_condition_resolves_against_outer_scope() {
    let source = "n : int = 2\nwhile n > 0\n  n = n - 1\nend\n";
    assert!(semantic_messages(source).is_empty());
}

#[test]
fn test_identifiers_annotated_with_types() {
    let source = "fn id(p: ptr<byte>): ptr<byte>\n  return p\nend\n";
    let result = compile("types.n4", source);
    assert!(!result.has_errors());

    let function = result.program.functions().next().cloned();
    let Some(function) = function else {
        panic!("Expected function definition");
    };
    let byte_ptr = Type::new(BaseType::Byte).with_pointer();

    assert_eq!(function.name.dtype, Some(byte_ptr.clone()));
    match &function.body.statements[0] {
        Statement::Return {
            expr: Expr::Primary(primary),
            ..
        } => {
            assert_eq!(primary.dtype, Some(byte_ptr.clone()));
            assert_eq!(primary.dtype.as_ref().map(Type::size), Some(8));
            assert_eq!(primary.dtype.as_ref().map(Type::is_signed), Some(false));
        }
        other => panic!("Expected return, got {:?}", other),
    }
}

#[test]
fn test_unresolved_identifier_has_no_type() {
    let result = compile("none.n4", "y : int = missing\n");

    match &result.program.items[0] {
        Item::Statement(Statement::Definition {
            value: Expr::Primary(primary),
            ..
        }) => assert_eq!(primary.dtype, None),
        other => panic!("Expected definition, got {:?}", other),
    }
}

#[test]
fn test_analysis_twice_is_identical() {
    let source = "a = b\nc : int = 1\nc : int = 2\nfn f(): int\n  return g()\nend\n";
    let (tokens, _) = tokenize(source);
    let (program, _) = parse(tokens);

    let mut first_tree = program.clone();
    let mut second_tree = program;
    let first: Vec<Diagnostic> = analyze(&mut first_tree);
    let second: Vec<Diagnostic> = SemanticAnalyzer::new().analyze(&mut second_tree);

    assert_eq!(first, second);
    assert_eq!(first_tree, second_tree);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_analyzes_partial_program() {
    let source = "x : int = 1\ny = = 2\nz : int = x\nw = nope\n";
    let result = compile("partial.n4", source);

    assert_eq!(result.syntax_errors.len(), 1);
    let names: Vec<&str> = result
        .semantic_errors
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["'w' used before definition", "'nope' used before definition"]
    );
}
