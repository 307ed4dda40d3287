//! An in-memory AST, textual printer, and local-rewrite reducer for
//! ECMAScript 3 source.
//!
//! There is no parser or lexer in this crate: callers construct trees
//! through [`Node`]'s constructor functions (by hand, or from their own
//! front end), then [`Node::render`] to produce source text and/or
//! [`Node::reduce`] to apply the local rewrites in [`reduce`] before
//! rendering.
//!
//! ```
//! use ecma3_ast::{Node, RenderOptions};
//!
//! let call = Node::function_call(
//!     Node::identifier("print", 1),
//!     Node::arg_list(vec![Node::string_literal("hi", false, 1)], 1),
//!     1,
//! );
//! assert_eq!(call.render(RenderOptions::NONE), "print(\"hi\")");
//! ```

#[macro_use]
extern crate lazy_static;

pub mod ast;
pub mod error;
pub mod lexical;
pub mod numfmt;
pub mod printer;
pub mod reduce;

pub use ast::{
    AssignOp, BinOp, ChildSlot, Node, NodeKind, PostfixOp, StmtExprKind, UnaryOp,
};
pub use error::AstError;
pub use printer::RenderOptions;
