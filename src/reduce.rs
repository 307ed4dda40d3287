//! Local, single-pass, bottom-up rewriting: constant folding, dead-branch
//! elimination, and member-access canonicalization.
//!
//! Every rule here only ever looks at a node and its immediate children —
//! there is no fixpoint loop and no whole-program analysis. A caller that
//! wants folding to cascade (e.g. `!!(1 && 1)` collapsing all the way to
//! `true`) reduces bottom-up and may call `reduce` again on the result if
//! it wants a second pass; this module does not do that for you.

use crate::ast::{BinOp, Node, NodeKind, UnaryOp};
use crate::lexical;

/// Reduces `self`, consuming it. Returns `None` when the node should be
/// removed entirely from its parent (the caller is expected to drop the
/// corresponding child slot); returns `Some` with either the original node
/// or a replacement otherwise.
///
/// Children are always reduced first (bottom-up); the per-variant rules
/// below then look only at the already-reduced children.
pub fn reduce(node: Node) -> Option<Node> {
    let node = reduce_children(node);
    let kind_name = node.kind_name();
    let reduced = reduce_self(node);
    if let Some(ref r) = reduced {
        log::trace!(target: "ecma3_ast::reduce", "{} -> {}", kind_name, r.kind_name());
    } else {
        log::trace!(target: "ecma3_ast::reduce", "{} -> <removed>", kind_name);
    }
    reduced
}

/// Recursively reduces every child slot in place, dropping slots whose
/// reduction returns `None`. Fixed-arity slots that come back `None` are
/// left as an absent slot (`None`) rather than removed from the vector, so
/// arity is preserved; variadic slots are compacted.
fn reduce_children(mut node: Node) -> Node {
    let is_variadic = matches!(
        node.kind(),
        NodeKind::StatementList
            | NodeKind::Program
            | NodeKind::ArgList
            | NodeKind::ObjectLiteral
            | NodeKind::ArrayLiteral
            | NodeKind::VarDeclaration { .. }
    );

    let old_children = std::mem::take(node.child_nodes_mut());
    let mut new_children = Vec::with_capacity(old_children.len());
    for slot in old_children {
        match slot {
            None => new_children.push(None),
            Some(child) => match reduce(*child) {
                Some(reduced_child) => new_children.push(Some(Box::new(reduced_child))),
                None if is_variadic => {}
                None => new_children.push(None),
            },
        }
    }
    *node.child_nodes_mut() = new_children;
    node
}

/// The per-variant rewrite rules. Everything not listed here passes through
/// unchanged (its children have already been reduced).
fn reduce_self(node: Node) -> Option<Node> {
    match node.kind() {
        NodeKind::StatementList | NodeKind::Program => Some(reduce_statement_list(node)),
        NodeKind::Operator(op) => reduce_operator(*op, node),
        NodeKind::ConditionalExpression => Some(reduce_conditional(node)),
        NodeKind::Unary(UnaryOp::Not) => Some(reduce_not(node)),
        NodeKind::If => reduce_if(node),
        NodeKind::FunctionCall => Some(reduce_bagofholding_call(node)),
        NodeKind::ObjectLiteralProperty => Some(reduce_property_key(node)),
        NodeKind::DynamicMemberExpression => Some(reduce_member_access(node)),
        _ => Some(node),
    }
}

/// Drops statements whose expression is a statically decidable constant
/// (`compare(true)` or `compare(false)` — see I4): such a statement has no
/// observable effect. Nothing else qualifies, even a bare identifier or
/// `this` reference, since referencing an unresolved binding can itself
/// throw — I4's conservatism about what may claim constant truthiness
/// applies here too.
fn reduce_statement_list(mut node: Node) -> Node {
    let kept: Vec<_> = std::mem::take(node.child_nodes_mut())
        .into_iter()
        .filter(|slot| match slot {
            Some(child) => !is_constant(child),
            None => true,
        })
        .collect();
    *node.child_nodes_mut() = kept;
    node
}

/// A statically decidable constant: `compare(true)` or `compare(false)`.
/// Per I4 this is limited to `NumericLiteral`, `BooleanLiteral`, and a
/// `Parenthetical` wrapping one — nothing else may claim it.
fn is_constant(node: &Node) -> bool {
    node.compare(true) || node.compare(false)
}

/// Short-circuit folding for `||`, `&&`, and the comma operator.
fn reduce_operator(op: BinOp, mut node: Node) -> Option<Node> {
    match op {
        BinOp::Or => {
            let left = node.remove_child(0).expect("Operator left slot must not be absent");
            if left.compare(true) {
                return Some(*left);
            }
            let right = node.remove_child(0).expect("Operator right slot must not be absent");
            if left.compare(false) {
                return Some(*right);
            }
            Some(Node::operator(op, *left, *right, node.lineno()))
        }
        BinOp::And => {
            let left = node.remove_child(0).expect("Operator left slot must not be absent");
            if left.compare(false) {
                return Some(*left);
            }
            let right = node.remove_child(0).expect("Operator right slot must not be absent");
            if left.compare(true) {
                return Some(*right);
            }
            Some(Node::operator(op, *left, *right, node.lineno()))
        }
        BinOp::Comma => {
            let left = node.remove_child(0).expect("Operator left slot must not be absent");
            let right = node.remove_child(0).expect("Operator right slot must not be absent");
            if is_constant(&left) {
                return Some(*right);
            }
            Some(Node::operator(op, *left, *right, node.lineno()))
        }
        _ => Some(node),
    }
}

/// `cond ? a : b` collapses to `a` or `b` when `cond` is a statically
/// decidable constant.
fn reduce_conditional(mut node: Node) -> Node {
    let cond = node.child(0);
    if cond.compare(true) {
        let then_branch = node.remove_child(1).expect("ConditionalExpression then slot must not be absent");
        return *then_branch;
    }
    if cond.compare(false) {
        let else_branch = node.remove_child(2).expect("ConditionalExpression else slot must not be absent");
        return *else_branch;
    }
    node
}

/// `!true` / `!false` fold to the opposite literal; anything else passes
/// through unchanged.
fn reduce_not(node: Node) -> Node {
    let arg = node.child(0);
    if arg.compare(true) {
        return Node::boolean_literal(false, node.lineno());
    }
    if arg.compare(false) {
        return Node::boolean_literal(true, node.lineno());
    }
    node
}

/// True for a block position occupied by an empty `StatementList`.
fn is_empty_block(node: &Node) -> bool {
    matches!(node.kind(), NodeKind::StatementList) && node.child_nodes().is_empty()
}

/// The `If` sub-rules, in spec order:
///
/// a. a constant-true condition collapses to the then-branch; a
///    constant-false condition collapses to the else-branch, or to
///    *absent* (`None`) if there is no else at all — the whole `if`
///    disappears rather than surviving as a placeholder empty statement.
/// b. a present-but-empty else is dropped, as if it had never been there.
/// c. if both branches are now empty, the `if` is replaced by the
///    condition expression alone (its side effects, if any, survive).
/// d. if only the then-branch is empty, the condition is negated and the
///    else-block is promoted into the then-slot, clearing the else-slot.
///
/// Returns `None` only for case (a)'s else-less branch; every other case
/// returns a surviving node.
fn reduce_if(mut node: Node) -> Option<Node> {
    let lineno = node.lineno();
    let cond = node.child(0);
    if cond.compare(true) {
        let then_block = node.remove_child(1).expect("If then slot must not be absent");
        return Some(*then_block);
    }
    if cond.compare(false) {
        return match node.remove_child(2) {
            Some(else_block) => Some(*else_block),
            None => None,
        };
    }

    let cond = node.remove_child(0).expect("If cond slot must not be absent");
    let then_block = node.remove_child(0).expect("If then slot must not be absent");
    let else_block = node.remove_child(0);

    // 5b: a present-but-empty else is no else at all.
    let else_block = else_block.filter(|b| !is_empty_block(b));
    let then_is_empty = is_empty_block(&then_block);

    match (then_is_empty, else_block) {
        (true, Some(else_block)) => {
            // 5d: `if (c) {} else { body }` -> `if (!c) { body }`.
            let negated = negate(*cond);
            Some(Node::if_stmt(negated, *else_block, None, lineno))
        }
        (true, None) => {
            // 5c: both branches empty -> the condition alone.
            Some(*cond)
        }
        (false, else_block) => Some(Node::if_stmt(*cond, *then_block, else_block.map(|b| *b), lineno)),
    }
}

/// Wraps `cond` in a `Parenthetical` inside a `Unary(!)`, per the empty-then
/// rewrite rule. The condition is already known non-constant at the call
/// site (the constant cases are handled earlier in `reduce_if`), so this
/// never folds further on its own.
fn negate(cond: Node) -> Node {
    let lineno = cond.lineno();
    let wrapped = Node::parenthetical(cond, lineno);
    Node::unary(UnaryOp::Not, wrapped, lineno)
}

/// Stubs out a feature-flag check (`bagofholding(...)`) to `false`. The
/// flag always resolves false at this stage of the pipeline; folding the
/// call lets dead-branch elimination remove whatever it guards.
fn reduce_bagofholding_call(node: Node) -> Node {
    let is_bagofholding = matches!(node.child(0).kind(), NodeKind::Identifier(name) if name == "bagofholding");
    if is_bagofholding {
        Node::boolean_literal(false, node.lineno())
    } else {
        node
    }
}

/// Canonicalizes a quoted string property key into a bare identifier key
/// when its unquoted content is a valid, non-reserved identifier
/// (`{"foo": 1}` -> `{foo: 1}`).
fn reduce_property_key(mut node: Node) -> Node {
    let key = node.child(0);
    let replacement = if matches!(key.kind(), NodeKind::StringLiteral { .. }) {
        key.unquoted_value()
            .filter(|unquoted| lexical::is_identifier(unquoted))
            .map(|unquoted| Node::identifier(unquoted, key.lineno()))
    } else {
        None
    };
    if let Some(new_key) = replacement {
        node.replace_child(new_key, 0);
    }
    node
}

/// Canonicalizes `obj["prop"]` into `obj.prop` when the bracketed key is a
/// string literal whose content is a valid, non-reserved identifier.
fn reduce_member_access(mut node: Node) -> Node {
    let identifier_info = match node.child(1).kind() {
        NodeKind::StringLiteral { .. } => {
            let property = node.child(1);
            property
                .unquoted_value()
                .filter(|name| lexical::is_identifier(name))
                .map(|name| (name.to_string(), property.lineno()))
        }
        _ => None,
    };
    match identifier_info {
        Some((name, prop_lineno)) => {
            let lineno = node.lineno();
            let object = node.remove_child(0).expect("DynamicMemberExpression object slot must not be absent");
            Node::static_member(*object, Node::identifier(name, prop_lineno), lineno)
        }
        None => node,
    }
}

impl Node {
    /// Reduces this tree in place, per the rewrite rules above. Consumes
    /// `self`; returns `None` if the whole tree reduces away (only possible
    /// when `self` is itself a dead expression statement).
    pub fn reduce(self) -> Option<Node> {
        reduce(self)
    }

    /// A short, stable name for the node's variant, used only for
    /// diagnostic logging.
    fn kind_name(&self) -> &'static str {
        match self.kind() {
            NodeKind::NumericLiteral(_) => "NumericLiteral",
            NodeKind::StringLiteral { .. } => "StringLiteral",
            NodeKind::RegexLiteral { .. } => "RegexLiteral",
            NodeKind::BooleanLiteral(_) => "BooleanLiteral",
            NodeKind::NullLiteral => "NullLiteral",
            NodeKind::This => "This",
            NodeKind::EmptyExpression => "EmptyExpression",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Parenthetical => "Parenthetical",
            NodeKind::Unary(_) => "Unary",
            NodeKind::Postfix(_) => "Postfix",
            NodeKind::Operator(_) => "Operator",
            NodeKind::Assignment(_) => "Assignment",
            NodeKind::ConditionalExpression => "ConditionalExpression",
            NodeKind::FunctionCall => "FunctionCall",
            NodeKind::FunctionConstructor => "FunctionConstructor",
            NodeKind::StaticMemberExpression => "StaticMemberExpression",
            NodeKind::DynamicMemberExpression => "DynamicMemberExpression",
            NodeKind::ObjectLiteral => "ObjectLiteral",
            NodeKind::ObjectLiteralProperty => "ObjectLiteralProperty",
            NodeKind::ArrayLiteral => "ArrayLiteral",
            NodeKind::Program => "Program",
            NodeKind::StatementList => "StatementList",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArgList => "ArgList",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::DoWhile => "DoWhile",
            NodeKind::ForLoop => "ForLoop",
            NodeKind::ForIn => "ForIn",
            NodeKind::With => "With",
            NodeKind::Try => "Try",
            NodeKind::Switch => "Switch",
            NodeKind::CaseClause => "CaseClause",
            NodeKind::DefaultClause => "DefaultClause",
            NodeKind::VarDeclaration { .. } => "VarDeclaration",
            NodeKind::StatementWithExpression(_) => "StatementWithExpression",
            NodeKind::Label => "Label",
        }
    }
}
