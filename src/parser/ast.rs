// AST (Abstract Syntax Tree) definitions for the N4 front end

use crate::parser::lexer::{Token, TokenKind};
use std::fmt;
use std::mem;

/// Types from the fixed type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Void,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Ptr,
    Long,
    ULong,
}

impl BaseType {
    pub const ALL: [BaseType; 10] = [
        BaseType::Void,
        BaseType::Byte,
        BaseType::UByte,
        BaseType::Short,
        BaseType::UShort,
        BaseType::Int,
        BaseType::UInt,
        BaseType::Ptr,
        BaseType::Long,
        BaseType::ULong,
    ];

    pub fn from_name(name: &str) -> Option<BaseType> {
        Self::ALL.into_iter().find(|base| base.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseType::Void => "void",
            BaseType::Byte => "byte",
            BaseType::UByte => "ubyte",
            BaseType::Short => "short",
            BaseType::UShort => "ushort",
            BaseType::Int => "int",
            BaseType::UInt => "uint",
            BaseType::Ptr => "ptr",
            BaseType::Long => "long",
            BaseType::ULong => "ulong",
        }
    }

    pub fn size(self) -> usize {
        match self {
            BaseType::Void => 0,
            BaseType::Byte | BaseType::UByte => 1,
            BaseType::Short | BaseType::UShort => 2,
            BaseType::Int | BaseType::UInt | BaseType::Ptr => 4,
            BaseType::Long | BaseType::ULong => 8,
        }
    }

    /// Signedness follows the spelling: unsigned iff the name starts with `u`
    pub fn is_signed(self) -> bool {
        !self.name().starts_with('u')
    }
}

/// A table type behind zero or more pointer layers.
///
/// Two types are equal exactly when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub base: BaseType,
    pub pointer_depth: usize, // 0 = not pointer, 1 = ptr<base>, 2 = ptr<ptr<base>>, ...
}

/// Size of every pointer type in bytes
pub const POINTER_SIZE: usize = 8;

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            pointer_depth: 0,
        }
    }

    /// Default type given to number literals
    pub fn int() -> Self {
        Type::new(BaseType::Int)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BaseType::from_name(name).map(Type::new)
    }

    pub fn with_pointer(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    pub fn name(&self) -> String {
        format!(
            "{}{}{}",
            "ptr<".repeat(self.pointer_depth),
            self.base.name(),
            ">".repeat(self.pointer_depth)
        )
    }

    pub fn size(&self) -> usize {
        if self.is_pointer() {
            POINTER_SIZE
        } else {
            self.base.size()
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.is_pointer() && self.base.is_signed()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A leaf expression wrapping an identifier or number token.
///
/// `dtype` stays `None` until the semantic analyzer resolves it, and stays
/// `None` for identifiers it could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primary {
    pub token: Token,
    pub dtype: Option<Type>,
}

impl Primary {
    pub fn new(token: Token) -> Self {
        Primary { token, dtype: None }
    }

    pub fn name(&self) -> &str {
        &self.token.literal
    }

    pub fn line(&self) -> usize {
        self.token.line
    }

    pub fn is_identifier(&self) -> bool {
        self.token.kind == TokenKind::Ident
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Primary(Primary),
    Unary {
        op: Token, // '-', '*' or '&'
        operand: Box<Expr>,
        line: usize,
    },
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
        line: usize,
    },
    Call {
        callee: Primary,
        args: Vec<Expr>,
        line: usize,
    },
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Primary(primary) => primary.line(),
            Expr::Unary { line, .. } | Expr::Binary { line, .. } | Expr::Call { line, .. } => {
                *line
            }
        }
    }

    /// Cheap leaf swapped in while a tree is taken apart
    fn placeholder() -> Expr {
        Expr::Primary(Primary::new(Token::eof()))
    }

    /// Assignable forms: a bare identifier or a `*` dereference
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Primary(primary) => primary.is_identifier(),
            Expr::Unary { op, .. } => op.kind == TokenKind::Star,
            Expr::Binary { .. } | Expr::Call { .. } => false,
        }
    }
}

// Operator chains (a + b + c + ...) have unbounded left spines; drop them in a loop
impl Drop for Expr {
    fn drop(&mut self) {
        let mut spine = match self {
            Expr::Binary { left, .. } => mem::replace(left.as_mut(), Expr::placeholder()),
            _ => return,
        };
        while let Expr::Binary { left, .. } = &mut spine {
            let next = mem::replace(left.as_mut(), Expr::placeholder());
            spine = next;
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name : type = value`
    Definition {
        ident: Primary,
        declared_type: Type,
        value: Expr,
        line: usize,
    },
    Assignment {
        lhs: Expr,
        rhs: Expr,
        line: usize,
    },
    If {
        condition: Expr,
        true_body: Body,
        false_body: Option<Body>,
        line: usize,
    },
    While {
        condition: Expr,
        body: Body,
        line: usize,
    },
    Return {
        expr: Expr,
        line: usize,
    },
    /// A bare expression such as a call
    Expression(Expr),
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::Definition { line, .. }
            | Statement::Assignment { line, .. }
            | Statement::If { line, .. }
            | Statement::While { line, .. }
            | Statement::Return { line, .. } => *line,
            Statement::Expression(expr) => expr.line(),
        }
    }
}

/// Ordered statements of a function, branch or loop
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    pub statements: Vec<Statement>,
    pub line: usize, // line of the first statement, 0 when empty
}

impl Body {
    pub fn new(statements: Vec<Statement>) -> Self {
        let line = statements.first().map_or(0, Statement::line);
        Body { statements, line }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ident: Primary,
    pub param_type: Type,
}

impl Param {
    pub fn name(&self) -> &str {
        self.ident.name()
    }
}

/// `fn name(params): return_type` followed by a body and `end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: Primary,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Body,
    pub line: usize,
}

impl FunctionDefinition {
    pub fn name(&self) -> &str {
        self.name.name()
    }
}

/// A top-level entry of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Function(FunctionDefinition),
    Statement(Statement),
}

impl Item {
    pub fn line(&self) -> usize {
        match self {
            Item::Function(function) => function.line,
            Item::Statement(statement) => statement.line(),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn line(&self) -> usize {
        1
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(function) => Some(function),
            Item::Statement(_) => None,
        })
    }
}
