//! Abstract Syntax Tree (AST) definitions
//!
//! The tree is built bottom-up by the parser and never mutated afterwards.
//! Function bodies are held behind an `Rc` so that function values created
//! at run time can share them without cloning statements.

use crate::span::Span;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// AST schema version
///
/// Included in JSON dumps. Increment when making breaking changes to the
/// serialized shape.
pub const AST_VERSION: u32 = 1;

/// Root of a parsed unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Versioned AST wrapper for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionedProgram<'a> {
    pub ast_version: u32,
    pub program: &'a Program,
}

impl<'a> VersionedProgram<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarDecl(VarDecl),
    FunctionDecl(FunctionDecl),
    If(IfStmt),
    Expr(Expr),
}

/// `rezerviraj x = 1;` or `konstanta y = 2;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub name: Identifier,
    pub constant: bool,
    /// Absent only for non-constant declarations; evaluates to null
    pub init: Option<Expr>,
    pub span: Span,
}

/// `funkcija ime(a, b) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Rc<[Stmt]>,
    pub span: Span,
}

/// `ce (test) { ... } sicer { ... }`
///
/// An `sicer ce` chain is stored as an alternate holding a single nested
/// `If` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Vec<Stmt>,
    pub alternate: Vec<Stmt>,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal, Span),
    Identifier(Identifier),
    Assign(AssignExpr),
    Binary(BinaryExpr),
    Member(MemberExpr),
    Call(CallExpr),
    Object(ObjectLiteral),
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// `target = value`
///
/// The parser accepts any expression on the left; only identifiers and
/// member expressions are valid targets at run time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignExpr {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `object.name` or `object[expr]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: MemberProperty,
    pub span: Span,
}

/// Property part of a member expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MemberProperty {
    /// `.name`, used literally as the key
    Named(Identifier),
    /// `[expr]`, evaluated at run time
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `{ a: 1, b }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
    pub span: Span,
}

/// One entry of an object literal. A missing value is shorthand for a
/// variable lookup of `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: Identifier,
    pub value: Option<Expr>,
    pub span: Span,
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    /// Map operator text from a token onto an operator
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Mod),
            "==" => Some(BinaryOp::Eq),
            "!=" => Some(BinaryOp::Ne),
            "<" => Some(BinaryOp::Lt),
            "<=" => Some(BinaryOp::Le),
            ">" => Some(BinaryOp::Gt),
            ">=" => Some(BinaryOp::Ge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Helper methods for getting spans from AST nodes

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span) => *span,
            Expr::Identifier(id) => id.span,
            Expr::Assign(a) => a.span,
            Expr::Binary(b) => b.span,
            Expr::Member(m) => m.span,
            Expr::Call(c) => c.span,
            Expr::Object(o) => o.span,
        }
    }
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl(v) => v.span,
            Stmt::FunctionDecl(f) => f.span,
            Stmt::If(i) => i.span,
            Stmt::Expr(e) => e.span(),
        }
    }
}
