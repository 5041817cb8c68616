//! AST for fixture scripts.

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralType {
    NumberLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    UndefinedLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOperator {
    Minus,
    Plus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `a.name`
    Name(String),
    /// `a[expr]`
    Computed(Box<ExpressionType>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionType {
    Literal(LiteralType),
    Identifier(String),
    /// `None` entries are elisions: `[1, , 3]`.
    ArrayExpression(Vec<Option<ExpressionType>>),
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<ExpressionType>,
    },
    MemberExpression {
        object: Box<ExpressionType>,
        property: MemberProperty,
    },
    CallExpression {
        callee: Box<ExpressionType>,
        arguments: Vec<ExpressionType>,
    },
    NewExpression {
        callee: String,
        arguments: Vec<ExpressionType>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub id: String,
    pub init: Option<ExpressionType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementType {
    EmptyStatement,
    VarDeclaration(Vec<VariableDeclarator>),
    /// `target` is an identifier or member expression.
    AssignmentStatement {
        target: ExpressionType,
        value: ExpressionType,
    },
    DeleteStatement(ExpressionType),
    ExpressionStatement(ExpressionType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramData {
    pub body: Vec<StatementType>,
}
