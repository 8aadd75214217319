//! Output AST definitions
//!
//! The output AST is the immutable, JavaScript-shaped tree produced by lowering.
//! Every node lives behind an `Arc`, so a rewrite pass can tell an untouched
//! subtree apart from a rebuilt one with a pointer comparison instead of a deep
//! structural walk.

use std::sync::Arc;

/// An ordered, shared sequence of child nodes.
///
/// The sequence itself has identity: a rewrite that changes nothing hands back
/// the same allocation.
pub type NodeList<T> = Arc<[T]>;

/// Identity comparison for nodes, aggregates and sequences.
///
/// Two nodes built from identical field values are still different nodes.
/// Rewrite logic must only ever ask this question, never structural equality.
pub trait SameNode {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SameNode for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: SameNode> SameNode for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Leaf data
// ============================================================================

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,       // ==
    Ne,       // !=
    StrictEq, // ===
    StrictNe, // !==
    LogicalAnd,
    LogicalOr,
    In,
    InstanceOf,
    /// Computed member access: `a[b]`
    Index,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
}

impl BinaryOp {
    /// Whether this operator writes to its left operand
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::AddAssign
                | BinaryOp::SubAssign
                | BinaryOp::MulAssign
                | BinaryOp::DivAssign
                | BinaryOp::ModAssign
                | BinaryOp::BitAndAssign
                | BinaryOp::BitOrAssign
                | BinaryOp::BitXorAssign
                | BinaryOp::ShlAssign
                | BinaryOp::ShrAssign
                | BinaryOp::UShrAssign
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::Index => "[]",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::ModAssign => "%=",
            BinaryOp::BitAndAssign => "&=",
            BinaryOp::BitOrAssign => "|=",
            BinaryOp::BitXorAssign => "^=",
            BinaryOp::ShlAssign => "<<=",
            BinaryOp::ShrAssign => ">>=",
            BinaryOp::UShrAssign => ">>>=",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    TypeOf,
    Void,
    Delete,
    Not,
    BitNot,
    Neg,
    Pos,
    PrefixInc,
    PrefixDec,
    PostfixInc,
    PostfixDec,
}

/// Literal values carried by a constant expression
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Regexp { pattern: String, flags: String },
}

// ============================================================================
// Expressions
// ============================================================================

/// An output-language expression.
///
/// Cloning an `Expr` clones a handle, not the subtree.
#[derive(Debug, Clone)]
pub enum Expr {
    ArrayLiteral(Arc<ArrayLiteralExpr>),
    Binary(Arc<BinaryExpr>),
    Comma(Arc<CommaExpr>),
    Conditional(Arc<ConditionalExpr>),
    Constant(Arc<ConstantExpr>),
    Function(Arc<FunctionExpr>),
    Identifier(Arc<IdentifierExpr>),
    Invocation(Arc<InvocationExpr>),
    ObjectLiteral(Arc<ObjectLiteralExpr>),
    MemberAccess(Arc<MemberAccessExpr>),
    New(Arc<NewExpr>),
    Unary(Arc<UnaryExpr>),
    TypeReference(Arc<TypeReferenceExpr>),
    This(Arc<ThisExpr>),
    /// Verbatim-emit template with `{n}` placeholders (inline-code intrinsics)
    Literal(Arc<LiteralExpr>),
}

impl Expr {
    fn addr(&self) -> *const () {
        match self {
            Expr::ArrayLiteral(n) => Arc::as_ptr(n).cast(),
            Expr::Binary(n) => Arc::as_ptr(n).cast(),
            Expr::Comma(n) => Arc::as_ptr(n).cast(),
            Expr::Conditional(n) => Arc::as_ptr(n).cast(),
            Expr::Constant(n) => Arc::as_ptr(n).cast(),
            Expr::Function(n) => Arc::as_ptr(n).cast(),
            Expr::Identifier(n) => Arc::as_ptr(n).cast(),
            Expr::Invocation(n) => Arc::as_ptr(n).cast(),
            Expr::ObjectLiteral(n) => Arc::as_ptr(n).cast(),
            Expr::MemberAccess(n) => Arc::as_ptr(n).cast(),
            Expr::New(n) => Arc::as_ptr(n).cast(),
            Expr::Unary(n) => Arc::as_ptr(n).cast(),
            Expr::TypeReference(n) => Arc::as_ptr(n).cast(),
            Expr::This(n) => Arc::as_ptr(n).cast(),
            Expr::Literal(n) => Arc::as_ptr(n).cast(),
        }
    }

    pub fn array_literal(elements: impl Into<NodeList<Expr>>) -> Self {
        Expr::ArrayLiteral(Arc::new(ArrayLiteralExpr { elements: elements.into() }))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(Arc::new(BinaryExpr { op, left, right }))
    }

    pub fn comma(expressions: impl Into<NodeList<Expr>>) -> Self {
        Expr::Comma(Arc::new(CommaExpr { expressions: expressions.into() }))
    }

    pub fn conditional(test: Expr, true_part: Expr, false_part: Expr) -> Self {
        Expr::Conditional(Arc::new(ConditionalExpr { test, true_part, false_part }))
    }

    pub fn constant(value: Constant) -> Self {
        Expr::Constant(Arc::new(ConstantExpr { value }))
    }

    pub fn number(value: f64) -> Self {
        Self::constant(Constant::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Constant::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::constant(Constant::Boolean(value))
    }

    pub fn null() -> Self {
        Self::constant(Constant::Null)
    }

    pub fn function(
        params: Vec<String>,
        body: Arc<BlockStmt>,
        name: Option<String>,
    ) -> Self {
        Expr::Function(Arc::new(FunctionExpr { params, body, name }))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(Arc::new(IdentifierExpr { name: name.into() }))
    }

    pub fn invocation(method: Expr, arguments: impl Into<NodeList<Expr>>) -> Self {
        Expr::Invocation(Arc::new(InvocationExpr { method, arguments: arguments.into() }))
    }

    pub fn object_literal(properties: impl Into<NodeList<Arc<ObjectProperty>>>) -> Self {
        Expr::ObjectLiteral(Arc::new(ObjectLiteralExpr { properties: properties.into() }))
    }

    pub fn member(target: Expr, member: impl Into<String>) -> Self {
        Expr::MemberAccess(Arc::new(MemberAccessExpr { target, member: member.into() }))
    }

    /// `new constructor(arguments...)`
    pub fn construct(constructor: Expr, arguments: impl Into<NodeList<Expr>>) -> Self {
        Expr::New(Arc::new(NewExpr { constructor, arguments: arguments.into() }))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(Arc::new(UnaryExpr { op, operand }))
    }

    pub fn type_reference(name: impl Into<String>) -> Self {
        Expr::TypeReference(Arc::new(TypeReferenceExpr { name: name.into() }))
    }

    pub fn this() -> Self {
        Expr::This(Arc::new(ThisExpr))
    }

    pub fn literal(format: impl Into<String>, arguments: impl Into<NodeList<Expr>>) -> Self {
        Expr::Literal(Arc::new(LiteralExpr { format: format.into(), arguments: arguments.into() }))
    }

    /// Returns the constant value if this is a constant expression
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Expr::Constant(c) => Some(c.value()),
            _ => None,
        }
    }

    /// Returns the identifier name if this is an identifier expression
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(id) => Some(id.name()),
            _ => None,
        }
    }
}

impl SameNode for Expr {
    fn same(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

#[derive(Debug)]
pub struct ArrayLiteralExpr {
    elements: NodeList<Expr>,
}

impl ArrayLiteralExpr {
    pub fn elements(&self) -> &NodeList<Expr> {
        &self.elements
    }
}

#[derive(Debug)]
pub struct BinaryExpr {
    op: BinaryOp,
    left: Expr,
    right: Expr,
}

impl BinaryExpr {
    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn left(&self) -> &Expr {
        &self.left
    }

    pub fn right(&self) -> &Expr {
        &self.right
    }
}

/// `a, b, c`
#[derive(Debug)]
pub struct CommaExpr {
    expressions: NodeList<Expr>,
}

impl CommaExpr {
    pub fn expressions(&self) -> &NodeList<Expr> {
        &self.expressions
    }
}

#[derive(Debug)]
pub struct ConditionalExpr {
    test: Expr,
    true_part: Expr,
    false_part: Expr,
}

impl ConditionalExpr {
    pub fn test(&self) -> &Expr {
        &self.test
    }

    pub fn true_part(&self) -> &Expr {
        &self.true_part
    }

    pub fn false_part(&self) -> &Expr {
        &self.false_part
    }
}

#[derive(Debug)]
pub struct ConstantExpr {
    value: Constant,
}

impl ConstantExpr {
    pub fn value(&self) -> &Constant {
        &self.value
    }
}

/// Function definition expression: `function name?(params) { body }`
#[derive(Debug)]
pub struct FunctionExpr {
    params: Vec<String>,
    body: Arc<BlockStmt>,
    name: Option<String>,
}

impl FunctionExpr {
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Debug)]
pub struct IdentifierExpr {
    name: String,
}

impl IdentifierExpr {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct InvocationExpr {
    method: Expr,
    arguments: NodeList<Expr>,
}

impl InvocationExpr {
    pub fn method(&self) -> &Expr {
        &self.method
    }

    pub fn arguments(&self) -> &NodeList<Expr> {
        &self.arguments
    }
}

#[derive(Debug)]
pub struct ObjectLiteralExpr {
    properties: NodeList<Arc<ObjectProperty>>,
}

impl ObjectLiteralExpr {
    pub fn properties(&self) -> &NodeList<Arc<ObjectProperty>> {
        &self.properties
    }
}

#[derive(Debug)]
pub struct MemberAccessExpr {
    target: Expr,
    member: String,
}

impl MemberAccessExpr {
    pub fn target(&self) -> &Expr {
        &self.target
    }

    pub fn member(&self) -> &str {
        &self.member
    }
}

#[derive(Debug)]
pub struct NewExpr {
    constructor: Expr,
    arguments: NodeList<Expr>,
}

impl NewExpr {
    pub fn constructor(&self) -> &Expr {
        &self.constructor
    }

    pub fn arguments(&self) -> &NodeList<Expr> {
        &self.arguments
    }
}

#[derive(Debug)]
pub struct UnaryExpr {
    op: UnaryOp,
    operand: Expr,
}

impl UnaryExpr {
    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

/// Reference to a type by its fully qualified output name
#[derive(Debug)]
pub struct TypeReferenceExpr {
    name: String,
}

impl TypeReferenceExpr {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct ThisExpr;

#[derive(Debug)]
pub struct LiteralExpr {
    format: String,
    arguments: NodeList<Expr>,
}

impl LiteralExpr {
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn arguments(&self) -> &NodeList<Expr> {
        &self.arguments
    }
}

/// A `name: value` entry in an object literal
#[derive(Debug)]
pub struct ObjectProperty {
    name: String,
    value: Expr,
}

impl ObjectProperty {
    pub fn new(name: impl Into<String>, value: Expr) -> Arc<Self> {
        Arc::new(Self { name: name.into(), value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }
}

// ============================================================================
// Statements
// ============================================================================

/// An output-language statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Arc<BlockStmt>),
    Break(Arc<BreakStmt>),
    Continue(Arc<ContinueStmt>),
    Comment(Arc<CommentStmt>),
    DoWhile(Arc<DoWhileStmt>),
    Empty(Arc<EmptyStmt>),
    Expression(Arc<ExpressionStmt>),
    ForEachIn(Arc<ForEachInStmt>),
    For(Arc<ForStmt>),
    If(Arc<IfStmt>),
    Return(Arc<ReturnStmt>),
    Switch(Arc<SwitchStmt>),
    Throw(Arc<ThrowStmt>),
    Try(Arc<TryStmt>),
    VariableDeclaration(Arc<VariableDeclarationStmt>),
    While(Arc<WhileStmt>),
    With(Arc<WithStmt>),
    Labelled(Arc<LabelledStmt>),
    Function(Arc<FunctionStmt>),
    Goto(Arc<GotoStmt>),
    Yield(Arc<YieldStmt>),
}

impl Stmt {
    fn addr(&self) -> *const () {
        match self {
            Stmt::Block(n) => Arc::as_ptr(n).cast(),
            Stmt::Break(n) => Arc::as_ptr(n).cast(),
            Stmt::Continue(n) => Arc::as_ptr(n).cast(),
            Stmt::Comment(n) => Arc::as_ptr(n).cast(),
            Stmt::DoWhile(n) => Arc::as_ptr(n).cast(),
            Stmt::Empty(n) => Arc::as_ptr(n).cast(),
            Stmt::Expression(n) => Arc::as_ptr(n).cast(),
            Stmt::ForEachIn(n) => Arc::as_ptr(n).cast(),
            Stmt::For(n) => Arc::as_ptr(n).cast(),
            Stmt::If(n) => Arc::as_ptr(n).cast(),
            Stmt::Return(n) => Arc::as_ptr(n).cast(),
            Stmt::Switch(n) => Arc::as_ptr(n).cast(),
            Stmt::Throw(n) => Arc::as_ptr(n).cast(),
            Stmt::Try(n) => Arc::as_ptr(n).cast(),
            Stmt::VariableDeclaration(n) => Arc::as_ptr(n).cast(),
            Stmt::While(n) => Arc::as_ptr(n).cast(),
            Stmt::With(n) => Arc::as_ptr(n).cast(),
            Stmt::Labelled(n) => Arc::as_ptr(n).cast(),
            Stmt::Function(n) => Arc::as_ptr(n).cast(),
            Stmt::Goto(n) => Arc::as_ptr(n).cast(),
            Stmt::Yield(n) => Arc::as_ptr(n).cast(),
        }
    }

    pub fn block(statements: impl Into<NodeList<Stmt>>) -> Self {
        Stmt::Block(BlockStmt::new(statements))
    }

    pub fn break_(label: Option<String>) -> Self {
        Stmt::Break(Arc::new(BreakStmt { label }))
    }

    pub fn continue_(label: Option<String>) -> Self {
        Stmt::Continue(Arc::new(ContinueStmt { label }))
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(Arc::new(CommentStmt { text: text.into() }))
    }

    pub fn do_while(condition: Expr, body: Arc<BlockStmt>) -> Self {
        Stmt::DoWhile(Arc::new(DoWhileStmt { condition, body }))
    }

    pub fn empty() -> Self {
        Stmt::Empty(Arc::new(EmptyStmt))
    }

    pub fn expression(expression: Expr) -> Self {
        Stmt::Expression(Arc::new(ExpressionStmt { expression }))
    }

    pub fn for_each_in(
        variable: impl Into<String>,
        object: Expr,
        body: Stmt,
        declares_variable: bool,
    ) -> Self {
        Stmt::ForEachIn(Arc::new(ForEachInStmt {
            variable: variable.into(),
            object,
            body,
            declares_variable,
        }))
    }

    pub fn for_loop(
        init: Option<Stmt>,
        condition: Option<Expr>,
        iterator: Option<Expr>,
        body: Arc<BlockStmt>,
    ) -> Self {
        Stmt::For(Arc::new(ForStmt { init, condition, iterator, body }))
    }

    pub fn if_else(
        test: Expr,
        then_branch: Arc<BlockStmt>,
        else_branch: Option<Arc<BlockStmt>>,
    ) -> Self {
        Stmt::If(Arc::new(IfStmt { test, then_branch, else_branch }))
    }

    pub fn return_(value: Option<Expr>) -> Self {
        Stmt::Return(Arc::new(ReturnStmt { value }))
    }

    pub fn switch(
        discriminant: Expr,
        sections: impl Into<NodeList<Arc<SwitchSection>>>,
    ) -> Self {
        Stmt::Switch(Arc::new(SwitchStmt { discriminant, sections: sections.into() }))
    }

    pub fn throw(expression: Expr) -> Self {
        Stmt::Throw(Arc::new(ThrowStmt { expression }))
    }

    pub fn try_catch(
        guarded: Arc<BlockStmt>,
        catch: Option<Arc<CatchClause>>,
        finally: Option<Arc<BlockStmt>>,
    ) -> Self {
        Stmt::Try(Arc::new(TryStmt { guarded, catch, finally }))
    }

    pub fn var_decl(declarations: impl Into<NodeList<Arc<VariableDeclaration>>>) -> Self {
        Stmt::VariableDeclaration(Arc::new(VariableDeclarationStmt {
            declarations: declarations.into(),
        }))
    }

    pub fn while_loop(condition: Expr, body: Arc<BlockStmt>) -> Self {
        Stmt::While(Arc::new(WhileStmt { condition, body }))
    }

    pub fn with(object: Expr, body: Stmt) -> Self {
        Stmt::With(Arc::new(WithStmt { object, body }))
    }

    pub fn labelled(label: impl Into<String>, statement: Stmt) -> Self {
        Stmt::Labelled(Arc::new(LabelledStmt { label: label.into(), statement }))
    }

    pub fn function(name: impl Into<String>, params: Vec<String>, body: Arc<BlockStmt>) -> Self {
        Stmt::Function(Arc::new(FunctionStmt { name: name.into(), params, body }))
    }

    pub fn goto(label: impl Into<String>) -> Self {
        Stmt::Goto(Arc::new(GotoStmt { label: label.into() }))
    }

    pub fn yield_(value: Option<Expr>) -> Self {
        Stmt::Yield(Arc::new(YieldStmt { value }))
    }
}

impl SameNode for Stmt {
    fn same(&self, other: &Self) -> bool {
        std::ptr::eq(self.addr(), other.addr())
    }
}

/// `{ statements... }`
///
/// Blocks also appear as typed children (loop bodies, branches, function
/// bodies), which is why they are built through [`BlockStmt::new`] as well as
/// [`Stmt::block`].
#[derive(Debug)]
pub struct BlockStmt {
    statements: NodeList<Stmt>,
}

impl BlockStmt {
    pub fn new(statements: impl Into<NodeList<Stmt>>) -> Arc<Self> {
        Arc::new(Self { statements: statements.into() })
    }

    pub fn statements(&self) -> &NodeList<Stmt> {
        &self.statements
    }
}

#[derive(Debug)]
pub struct BreakStmt {
    label: Option<String>,
}

impl BreakStmt {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[derive(Debug)]
pub struct ContinueStmt {
    label: Option<String>,
}

impl ContinueStmt {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[derive(Debug)]
pub struct CommentStmt {
    text: String,
}

impl CommentStmt {
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug)]
pub struct DoWhileStmt {
    condition: Expr,
    body: Arc<BlockStmt>,
}

impl DoWhileStmt {
    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }
}

#[derive(Debug)]
pub struct EmptyStmt;

#[derive(Debug)]
pub struct ExpressionStmt {
    expression: Expr,
}

impl ExpressionStmt {
    pub fn expression(&self) -> &Expr {
        &self.expression
    }
}

/// `for (var? variable in object) body`
#[derive(Debug)]
pub struct ForEachInStmt {
    variable: String,
    object: Expr,
    body: Stmt,
    declares_variable: bool,
}

impl ForEachInStmt {
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn object(&self) -> &Expr {
        &self.object
    }

    pub fn body(&self) -> &Stmt {
        &self.body
    }

    /// True for `for (var k in o)`, false for `for (k in o)`
    pub fn declares_variable(&self) -> bool {
        self.declares_variable
    }
}

#[derive(Debug)]
pub struct ForStmt {
    init: Option<Stmt>,
    condition: Option<Expr>,
    iterator: Option<Expr>,
    body: Arc<BlockStmt>,
}

impl ForStmt {
    pub fn init(&self) -> Option<&Stmt> {
        self.init.as_ref()
    }

    pub fn condition(&self) -> Option<&Expr> {
        self.condition.as_ref()
    }

    pub fn iterator(&self) -> Option<&Expr> {
        self.iterator.as_ref()
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }
}

#[derive(Debug)]
pub struct IfStmt {
    test: Expr,
    then_branch: Arc<BlockStmt>,
    else_branch: Option<Arc<BlockStmt>>,
}

impl IfStmt {
    pub fn test(&self) -> &Expr {
        &self.test
    }

    pub fn then_branch(&self) -> &Arc<BlockStmt> {
        &self.then_branch
    }

    pub fn else_branch(&self) -> Option<&Arc<BlockStmt>> {
        self.else_branch.as_ref()
    }
}

#[derive(Debug)]
pub struct ReturnStmt {
    value: Option<Expr>,
}

impl ReturnStmt {
    pub fn value(&self) -> Option<&Expr> {
        self.value.as_ref()
    }
}

#[derive(Debug)]
pub struct SwitchStmt {
    discriminant: Expr,
    sections: NodeList<Arc<SwitchSection>>,
}

impl SwitchStmt {
    pub fn discriminant(&self) -> &Expr {
        &self.discriminant
    }

    pub fn sections(&self) -> &NodeList<Arc<SwitchSection>> {
        &self.sections
    }
}

/// One label of a switch section
#[derive(Debug, Clone)]
pub enum CaseLabel {
    /// `case value:`
    Value(Expr),
    /// `default:`
    Default,
}

impl SameNode for CaseLabel {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (CaseLabel::Value(a), CaseLabel::Value(b)) => a.same(b),
            (CaseLabel::Default, CaseLabel::Default) => true,
            _ => false,
        }
    }
}

/// A run of case labels sharing one body
#[derive(Debug)]
pub struct SwitchSection {
    labels: NodeList<CaseLabel>,
    body: Arc<BlockStmt>,
}

impl SwitchSection {
    pub fn new(labels: impl Into<NodeList<CaseLabel>>, body: Arc<BlockStmt>) -> Arc<Self> {
        Arc::new(Self { labels: labels.into(), body })
    }

    pub fn labels(&self) -> &NodeList<CaseLabel> {
        &self.labels
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }

    pub fn has_default(&self) -> bool {
        self.labels.iter().any(|l| matches!(l, CaseLabel::Default))
    }
}

#[derive(Debug)]
pub struct ThrowStmt {
    expression: Expr,
}

impl ThrowStmt {
    pub fn expression(&self) -> &Expr {
        &self.expression
    }
}

#[derive(Debug)]
pub struct TryStmt {
    guarded: Arc<BlockStmt>,
    catch: Option<Arc<CatchClause>>,
    finally: Option<Arc<BlockStmt>>,
}

impl TryStmt {
    pub fn guarded(&self) -> &Arc<BlockStmt> {
        &self.guarded
    }

    pub fn catch(&self) -> Option<&Arc<CatchClause>> {
        self.catch.as_ref()
    }

    pub fn finally(&self) -> Option<&Arc<BlockStmt>> {
        self.finally.as_ref()
    }
}

/// `catch (identifier) { body }`
#[derive(Debug)]
pub struct CatchClause {
    identifier: String,
    body: Arc<BlockStmt>,
}

impl CatchClause {
    pub fn new(identifier: impl Into<String>, body: Arc<BlockStmt>) -> Arc<Self> {
        Arc::new(Self { identifier: identifier.into(), body })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }
}

/// `var a = 1, b;`
#[derive(Debug)]
pub struct VariableDeclarationStmt {
    declarations: NodeList<Arc<VariableDeclaration>>,
}

impl VariableDeclarationStmt {
    pub fn declarations(&self) -> &NodeList<Arc<VariableDeclaration>> {
        &self.declarations
    }
}

#[derive(Debug)]
pub struct VariableDeclaration {
    name: String,
    initializer: Option<Expr>,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, initializer: Option<Expr>) -> Arc<Self> {
        Arc::new(Self { name: name.into(), initializer })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initializer(&self) -> Option<&Expr> {
        self.initializer.as_ref()
    }
}

#[derive(Debug)]
pub struct WhileStmt {
    condition: Expr,
    body: Arc<BlockStmt>,
}

impl WhileStmt {
    pub fn condition(&self) -> &Expr {
        &self.condition
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }
}

#[derive(Debug)]
pub struct WithStmt {
    object: Expr,
    body: Stmt,
}

impl WithStmt {
    pub fn object(&self) -> &Expr {
        &self.object
    }

    pub fn body(&self) -> &Stmt {
        &self.body
    }
}

#[derive(Debug)]
pub struct LabelledStmt {
    label: String,
    statement: Stmt,
}

impl LabelledStmt {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn statement(&self) -> &Stmt {
        &self.statement
    }
}

/// Named function declaration: `function name(params) { body }`
#[derive(Debug)]
pub struct FunctionStmt {
    name: String,
    params: Vec<String>,
    body: Arc<BlockStmt>,
}

impl FunctionStmt {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &Arc<BlockStmt> {
        &self.body
    }
}

#[derive(Debug)]
pub struct GotoStmt {
    label: String,
}

impl GotoStmt {
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug)]
pub struct YieldStmt {
    value: Option<Expr>,
}

impl YieldStmt {
    pub fn value(&self) -> Option<&Expr> {
        self.value.as_ref()
    }
}
