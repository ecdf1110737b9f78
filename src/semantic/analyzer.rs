// Name resolution and type binding for the N4 front end

use crate::config::FrontendConfig;
use crate::diagnostics::Diagnostic;
use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::semantic::scope::ScopeStack;
use rustc_hash::FxHashSet;

/// Deduplication key for the nesting diagnostic; never a valid identifier
const NESTING_REPORT_KEY: &str = "<nesting>";

/// Walks a program post-order, resolving every identifier against a stack of
/// lexical scopes and recording the bound type on the AST.
///
/// One analyzer serves one [`analyze`](SemanticAnalyzer::analyze) call: scopes
/// and the set of already-reported names start empty and are dropped with it.
pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    reports: Vec<Diagnostic>,
    /// Names already reported; each name is reported at most once
    reported: FxHashSet<String>,
    depth: usize,
    max_depth: usize,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&FrontendConfig::default())
    }

    pub fn with_config(config: &FrontendConfig) -> Self {
        SemanticAnalyzer {
            scopes: ScopeStack::new(),
            reports: Vec::new(),
            reported: FxHashSet::default(),
            depth: 0,
            max_depth: config.max_nesting_depth,
        }
    }

    /// Analyze `program` in the global scope, annotating it in place.
    ///
    /// Assumes the tree came out of the parser; structure is not re-checked.
    pub fn analyze(mut self, program: &mut Program) -> Vec<Diagnostic> {
        for item in &mut program.items {
            match item {
                Item::Function(function) => self.visit_function(function),
                Item::Statement(statement) => self.visit_statement(statement),
            }
        }
        self.reports
    }

    fn report(&mut self, key: &str, message: String, line: usize) {
        if self.reported.insert(key.to_string()) {
            self.reports.push(Diagnostic::semantic(message, line));
        }
    }

    /// Resolve a use of the name held by `primary`
    fn access(&mut self, primary: &mut Primary) {
        match self.scopes.lookup(primary.name()) {
            Some(ty) => primary.dtype = Some(ty.clone()),
            None => {
                let name = primary.name().to_string();
                let message = format!("'{}' used before definition", name);
                self.report(&name, message, primary.line());
            }
        }
    }

    /// Bind the name held by `ident` in the current scope
    fn define(&mut self, ident: &mut Primary, ty: &Type) {
        if self.scopes.define(ident.name(), ty.clone()) {
            ident.dtype = Some(ty.clone());
        } else {
            let name = ident.name().to_string();
            let message = format!("redefinition of '{}'", name);
            self.report(&name, message, ident.line());
        }
    }

    /// Run `visit` one level deeper, or report and skip it past the limit
    fn nested(&mut self, line: usize, visit: impl FnOnce(&mut Self)) {
        if self.depth >= self.max_depth {
            let message = format!("nesting too deep (limit {})", self.max_depth);
            self.report(NESTING_REPORT_KEY, message, line);
            return;
        }

        self.depth += 1;
        visit(self);
        self.depth -= 1;
    }

    fn visit_function(&mut self, function: &mut FunctionDefinition) {
        // Functions share the variable namespace, typed by their return type
        self.define(&mut function.name, &function.return_type);

        self.scopes.push();
        for param in &mut function.params {
            self.define(&mut param.ident, &param.param_type);
        }
        self.visit_body(&mut function.body);
        self.scopes.pop();
    }

    fn visit_body(&mut self, body: &mut Body) {
        self.nested(body.line, |this| {
            for statement in &mut body.statements {
                this.visit_statement(statement);
            }
        });
    }

    fn visit_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::Definition {
                ident,
                declared_type,
                value,
                ..
            } => {
                self.define(ident, declared_type);
                self.visit_expr(value);
            }
            Statement::Assignment { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            // The condition is resolved inside the branch scope, not the parent
            Statement::If {
                condition,
                true_body,
                false_body,
                ..
            } => {
                self.scopes.push();
                self.visit_expr(condition);
                self.visit_body(true_body);
                if let Some(false_body) = false_body {
                    self.visit_body(false_body);
                }
                self.scopes.pop();
            }
            Statement::While {
                condition, body, ..
            } => {
                self.scopes.push();
                self.visit_expr(condition);
                self.visit_body(body);
                self.scopes.pop();
            }
            Statement::Return { expr, .. } => self.visit_expr(expr),
            Statement::Expression(expr) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        self.nested(expr.line(), |this| this.walk_expr(expr));
    }

    fn walk_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Primary(primary) => match primary.token.kind {
                TokenKind::Ident => self.access(primary),
                TokenKind::Number => primary.dtype = Some(fitting_int_type(primary.name())),
                _ => {}
            },
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Binary { left, right, .. } => self.walk_operator_chain(left, right),
            Expr::Call { callee, args, .. } => {
                self.access(callee);
                for arg in args {
                    self.visit_expr(arg);
                }
            }
        }
    }

    /// Walk a left-nested chain like a + b + c in a loop: leftmost operand
    /// first, then each right operand in source order. Only the right
    /// operands count toward the depth limit.
    fn walk_operator_chain(&mut self, left: &mut Expr, right: &mut Expr) {
        let mut rights = vec![right];
        let mut current = left;
        loop {
            match current {
                Expr::Binary { left, right, .. } => {
                    rights.push(&mut **right);
                    current = &mut **left;
                }
                leftmost => {
                    self.walk_expr(leftmost);
                    break;
                }
            }
        }

        for right in rights.into_iter().rev() {
            self.visit_expr(right);
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Type given to a number literal. Always `int`, whatever the value.
fn fitting_int_type(_literal: &str) -> Type {
    Type::int()
}

/// Analyze `program` with a fresh analyzer, returning semantic diagnostics.
pub fn analyze(program: &mut Program) -> Vec<Diagnostic> {
    SemanticAnalyzer::new().analyze(program)
}

pub fn analyze_with_config(program: &mut Program, config: &FrontendConfig) -> Vec<Diagnostic> {
    SemanticAnalyzer::with_config(config).analyze(program)
}
