//! The narrow error taxonomy for this crate.
//!
//! The AST is constructed programmatically (there is no parser in this
//! crate), so the only failures that can occur are ones a caller induces by
//! building an ill-formed tree or handing the printer a non-finite number.

use failure::Fail;

/// Errors produced while constructing, reducing or rendering a [`Node`](crate::ast::Node).
///
/// Arity mismatches and reduce-time invariant violations are not represented
/// here: `Node`'s constructors fix each variant's arity at construction, and
/// the accessors in `ast.rs` (`child`, `child_opt`) assert that invariant
/// holds on every subsequent access rather than threading a `Result` through
/// every traversal for a condition a well-formed tree can never hit — the
/// "assert and abort" option spec §7 allows alongside a typed error.
#[derive(Debug, Fail)]
pub enum AstError {
    /// A `NumericLiteral` payload was not finite (NaN or ±infinity). The
    /// external formatter's contract covers only finite values; callers must
    /// materialize non-finite values as an expression (e.g. `1/0`) instead.
    #[fail(display = "numeric literal payload out of range: {}", value)]
    PayloadOutOfRange {
        /// The rejected value, printed via `Debug` so NaN/inf render sensibly.
        value: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AstError>;
