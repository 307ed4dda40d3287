//! End-to-end pipelines: build a tree by hand, reduce it, render it under
//! more than one option set, and check the exact output text. Unit-level
//! behavior for each individual rule already lives next to the code in
//! `src/printer.rs` and `src/reduce.rs`; these tests exercise the
//! construct -> reduce -> render path as a whole, the way a caller actually
//! uses the crate.

use ecma3_ast::ast::{AssignOp, BinOp, PostfixOp, StmtExprKind, UnaryOp};
use ecma3_ast::{Node, RenderOptions};

fn ident(name: &str) -> Node {
    Node::identifier(name, 0)
}

fn call(name: &str) -> Node {
    Node::function_call(ident(name), Node::arg_list(vec![], 0), 0)
}

/// A function body mixing dead statements, a constant-folded `if`, and a
/// canonicalizable member access all reduces and renders as the minimal
/// surviving program, in both compact and pretty form.
#[test]
fn function_body_with_mixed_dead_code_reduces_and_renders() {
    let body = Node::statement_list(
        vec![
            // dead: bare literal in statement position
            Node::numeric_literal(1.0, 2).unwrap(),
            // constant-true if: collapses to its then-branch
            Node::if_stmt(
                Node::boolean_literal(true, 3),
                Node::statement_list(vec![call("setup")], 3),
                Some(Node::statement_list(vec![call("neverRuns")], 3)),
                3,
            ),
            // obj["cache"] canonicalizes to obj.cache
            Node::statement_with_expression(
                StmtExprKind::Return,
                Some(Node::dynamic_member(
                    ident("obj"),
                    Node::string_literal("cache", false, 4),
                    4,
                )),
                4,
            ),
        ],
        1,
    );
    let func = Node::function_declaration(
        ident("build"),
        Node::arg_list(vec![], 1),
        body,
        1,
    );

    let reduced = func.reduce().expect("function declaration never reduces away");

    assert_eq!(
        reduced.render(RenderOptions::NONE),
        "function build(){setup();return obj.cache;}"
    );
    assert_eq!(
        reduced.render(RenderOptions::PRETTY),
        "function build() {\n  setup();\n  return obj.cache;\n}"
    );
}

/// A `Program` with a mix of statements that fold away entirely (an
/// always-false `if` with no `else`, a short-circuited `&&`) still lines up
/// its remaining statements' line numbers correctly under
/// `MAINTAIN_LINENO`, since the dropped statements never emitted newlines
/// for the lines they used to occupy.
#[test]
fn reduced_program_still_catches_up_lineno_for_survivors() {
    let program = Node::program(vec![
        // line 1: constant-false if with no else -> vanishes entirely
        Node::if_stmt(Node::boolean_literal(false, 1), Node::statement_list(vec![call("dead")], 1), None, 1),
        // line 2: `false && sideEffect()` -> `false`, a dead statement, drops too
        Node::operator(BinOp::And, Node::boolean_literal(false, 2), call("sideEffect"), 2),
        // line 3: survives unchanged
        call("visible"),
    ]);

    let reduced = program.reduce().expect("program never reduces away");
    assert_eq!(
        reduced.render(RenderOptions::MAINTAIN_LINENO),
        "\n\nvisible();"
    );
}

/// The empty-then/else negation rule moves the surviving `else` body into
/// the then-slot and wraps the (possibly already-negated) condition in a
/// fresh `Parenthetical`/`Unary(!)` pair, cascading straight into an inline
/// `if(b)` body from the promoted branch.
#[test]
fn negated_empty_then_feeds_into_else_if_chain_render() {
    let inner_if = Node::if_stmt(ident("b"), Node::statement_list(vec![call("work")], 0), None, 0);
    let outer_if = Node::if_stmt(
        Node::unary(UnaryOp::Not, ident("a"), 0),
        Node::statement_list(vec![], 0),
        Some(Node::statement_list(vec![inner_if], 0)),
        0,
    );

    let reduced = outer_if.reduce().unwrap();
    assert_eq!(reduced.render(RenderOptions::NONE), "if(!(!a))if(b)work();");
}

/// A `for` loop whose header canonicalizes a property key inside an object
/// literal used in its body renders correctly end to end, with the
/// iterator-position `var` declaration still suppressing its semicolon.
#[test]
fn for_loop_with_property_key_canonicalization_in_body() {
    let init = Node::var_declaration(
        vec![Node::assignment(AssignOp::Assign, ident("i"), Node::numeric_literal(0.0, 0).unwrap(), 0)],
        true,
        0,
    );
    let cond = Node::operator(BinOp::Lt, ident("i"), Node::numeric_literal(3.0, 0).unwrap(), 0);
    let update = Node::postfix(PostfixOp::Increment, ident("i"), 0);
    let body_stmt = Node::statement_with_expression(
        StmtExprKind::Return,
        Some(Node::object_literal(
            vec![Node::object_literal_property(
                Node::string_literal("index", false, 0),
                ident("i"),
                0,
            )],
            0,
        )),
        0,
    );
    let loop_node = Node::for_loop(init, cond, update, Node::statement_list(vec![body_stmt], 0), 0);

    let reduced = loop_node.reduce().unwrap();
    assert_eq!(
        reduced.render(RenderOptions::NONE),
        "for(var i=0;i<3;i++)return {index:i};"
    );
}

/// `bagofholding(...)` stubbing composes with dead-branch elimination: a
/// feature check guarding a whole branch disappears along with the branch
/// it guarded, leaving only the surviving code.
#[test]
fn bagofholding_guarded_branch_disappears_entirely() {
    let if_stmt = Node::if_stmt(
        Node::function_call(
            ident("bagofholding"),
            Node::arg_list(vec![Node::string_literal("newPath", false, 0)], 0),
            0,
        ),
        Node::statement_list(vec![call("newBehavior")], 0),
        Some(Node::statement_list(vec![call("oldBehavior")], 0)),
        0,
    );
    let reduced = if_stmt.reduce().unwrap();
    assert_eq!(reduced.render(RenderOptions::NONE), "oldBehavior();");
}

/// Exercises the full reduce contract for a statement list where several
/// members are individually foldable (constant conditional, short-circuited
/// `||`) alongside a `this` reference that must survive reduction, since
/// `this` is never `compare()`-decidable (I4) even as a bare statement.
#[test]
fn statement_list_with_every_kind_of_foldable_member() {
    let list = Node::statement_list(
        vec![
            Node::conditional(Node::boolean_literal(true, 0), call("pickedBranch"), call("droppedBranch"), 0),
            Node::operator(BinOp::Or, Node::boolean_literal(true, 0), call("neverEvaluated"), 0),
            Node::this_expr(0),
            call("realWork"),
        ],
        0,
    );

    let reduced = list.reduce().unwrap();
    // The conditional folds to its picked branch call, which retains its
    // side effect and survives; the `||` folds to the constant `true`,
    // which is dead and dropped; `this` is not constant so it survives
    // even though it has no other effect; `realWork()` survives.
    assert_eq!(reduced.render(RenderOptions::NONE), "pickedBranch();this;realWork();");
}
