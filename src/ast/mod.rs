/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser
///
/// Submodules:
/// - ast: The `Node` tagged union, its smart constructors and its s-expression rendering
pub mod ast;
