//! Textual serialization of a [`Node`] tree.
//!
//! There is no precedence logic in this module: the AST already carries an
//! explicit [`NodeKind::Parenthetical`] node wherever source parentheses are
//! syntactically required, so the printer only ever prints parens where one
//! of those nodes appears — it never has to reconstruct precedence from an
//! operator table.

use crate::ast::{BinOp, Node, NodeKind, StmtExprKind};

/// Render mode flags, combinable as a bitset (`RenderOptions::PRETTY |
/// RenderOptions::MAINTAIN_LINENO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions(u8);

impl RenderOptions {
    /// Minimum whitespace.
    pub const NONE: RenderOptions = RenderOptions(0);
    /// Spaces around binary operators (except comma), spaces inside
    /// control-statement parens, two-space indentation, newlines between
    /// statements, and braces always added around single-statement bodies.
    pub const PRETTY: RenderOptions = RenderOptions(1 << 0);
    /// Emit newlines before a node so the output's line count catches up to
    /// that node's source `lineno`. Orthogonal to `PRETTY`.
    pub const MAINTAIN_LINENO: RenderOptions = RenderOptions(1 << 1);

    pub fn pretty(self) -> bool {
        self.0 & Self::PRETTY.0 != 0
    }

    pub fn maintain_lineno(self) -> bool {
        self.0 & Self::MAINTAIN_LINENO.0 != 0
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::NONE
    }
}

impl std::ops::BitOr for RenderOptions {
    type Output = RenderOptions;
    fn bitor(self, rhs: Self) -> Self {
        RenderOptions(self.0 | rhs.0)
    }
}

/// The printer's mutable state: where we are in the logical line count, and
/// the active option flags. Indentation is a traversal parameter, not
/// state, since it varies by position in the tree rather than by time.
struct PrinterState {
    line: u32,
    options: RenderOptions,
}

impl PrinterState {
    fn new(options: RenderOptions) -> Self {
        PrinterState { line: 1, options }
    }
}

fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

/// True iff the variant is one whose `renderStatement` simply delegates to
/// `render` (no trailing `;` is appended) — i.e. its own textual form
/// already *is* the complete statement.
fn is_statement_kind(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::If
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::ForLoop
            | NodeKind::ForIn
            | NodeKind::With
            | NodeKind::Try
            | NodeKind::Switch
            | NodeKind::FunctionDeclaration
            | NodeKind::Label
            | NodeKind::CaseClause
            | NodeKind::DefaultClause
            | NodeKind::Program
            | NodeKind::StatementList
    )
}

/// If `node` is a `StatementList` wrapping exactly one `If` statement,
/// returns that inner `If` — used to detect an `else` clause eligible for
/// inline `else if (...)` printing.
fn as_single_if(node: &Node) -> Option<&Node> {
    if !matches!(node.kind(), NodeKind::StatementList) {
        return None;
    }
    let children = node.child_nodes();
    if children.len() != 1 {
        return None;
    }
    let only = children[0].as_deref()?;
    if matches!(only.kind(), NodeKind::If) {
        Some(only)
    } else {
        None
    }
}

/// Emits enough newlines onto `out` to catch the printer's logical line
/// counter up to `target`. A `target` of 0 means "unknown/synthetic" and is
/// never caught up to. Returns whether any newline was emitted.
fn catchup(state: &mut PrinterState, out: &mut String, target: u32) -> bool {
    if !state.options.maintain_lineno() || target == 0 {
        return false;
    }
    let mut emitted = false;
    while state.line < target {
        out.push('\n');
        state.line += 1;
        emitted = true;
    }
    emitted
}

/// Appends the separator (if any) a statement needs before it, then the
/// statement's own text. `is_first` suppresses the pretty-mode leading
/// newline for the very first statement of a sequence (top-level program
/// text shouldn't open with a blank line; block-interior sequences always
/// pass `false` since the newline after `{` is wanted).
fn render_indented_statement(node: &Node, state: &mut PrinterState, indent: usize, is_first: bool, out: &mut String) {
    let mut newline_emitted = catchup(state, out, node.lineno());
    if state.options.pretty() && !is_first && !newline_emitted {
        out.push('\n');
        state.line += 1;
        newline_emitted = true;
    }
    if newline_emitted {
        out.push_str(&indent_str(indent));
    }
    out.push_str(&render_statement(node, state, indent));
}

/// Renders a sequence of statements with no surrounding braces — used both
/// for the top-level `Program`/`StatementList` and, via [`render_block`],
/// inside braces.
fn render_statement_sequence(stmts: &[Option<Box<Node>>], state: &mut PrinterState, indent: usize, suppress_first: bool) -> String {
    let mut out = String::new();
    for (i, slot) in stmts.iter().enumerate() {
        let node = slot.as_deref().expect("statement list slot must not be absent");
        render_indented_statement(node, state, indent, suppress_first && i == 0, &mut out);
    }
    out
}

/// `renderBlock(must, state, indent)`.
fn render_block(node: &Node, must: bool, state: &mut PrinterState, indent: usize) -> String {
    if !matches!(node.kind(), NodeKind::StatementList) {
        // A block position was handed something other than a StatementList.
        // Wrap it as a single statement rather than panicking, since this is
        // still printable.
        let mut out = String::from("{");
        render_indented_statement(node, state, indent + 1, false, &mut out);
        if state.options.pretty() {
            out.push('\n');
            out.push_str(&indent_str(indent));
        }
        out.push('}');
        return out;
    }

    let stmts = node.child_nodes();
    if !must && !state.options.pretty() && stmts.len() == 1 {
        let only = stmts[0].as_deref().expect("statement list slot must not be absent");
        return render_statement(only, state, indent);
    }
    if stmts.is_empty() && !must {
        return ";".to_string();
    }

    let mut out = String::from("{");
    out.push_str(&render_statement_sequence(stmts, state, indent + 1, false));
    if state.options.pretty() {
        out.push('\n');
        out.push_str(&indent_str(indent));
    }
    out.push('}');
    out
}

fn join_rendered<'a, I: Iterator<Item = &'a Node>>(items: I, state: &mut PrinterState, indent: usize, pretty: bool) -> String {
    let sep = if pretty { ", " } else { "," };
    let mut out = String::new();
    let mut first = true;
    for item in items {
        if !first {
            out.push_str(sep);
        }
        first = false;
        out.push_str(&render_expr(item, state, indent));
    }
    out
}

fn children_iter(node: &Node) -> impl Iterator<Item = &Node> {
    node.child_nodes()
        .iter()
        .map(|c| c.as_deref().expect("variadic child list slot must not be absent"))
}

fn binop_padding(op: BinOp, pretty: bool) -> (&'static str, &'static str) {
    if op == BinOp::Comma {
        if pretty {
            ("", " ")
        } else {
            ("", "")
        }
    } else if pretty || op.is_alphabetic() {
        (" ", " ")
    } else {
        ("", "")
    }
}

fn assignop_padding(pretty: bool) -> (&'static str, &'static str) {
    if pretty {
        (" ", " ")
    } else {
        ("", "")
    }
}

/// `render(state, indent)`: the node's own textual form, with no leading or
/// trailing indentation/newline.
fn render_expr(node: &Node, state: &mut PrinterState, indent: usize) -> String {
    let pretty = state.options.pretty();
    match node.kind() {
        NodeKind::NumericLiteral(value) => {
            crate::numfmt::format_number(*value).unwrap_or_else(|e| panic!("{}", e))
        }
        NodeKind::StringLiteral { value, quoted } => {
            if *quoted {
                value.clone()
            } else {
                format!("\"{}\"", value)
            }
        }
        NodeKind::RegexLiteral { body, flags } => format!("/{}/{}", body, flags),
        NodeKind::BooleanLiteral(value) => if *value { "true" } else { "false" }.to_string(),
        NodeKind::NullLiteral => "null".to_string(),
        NodeKind::This => "this".to_string(),
        NodeKind::EmptyExpression => String::new(),
        NodeKind::Identifier(name) => name.clone(),
        NodeKind::Parenthetical => {
            format!("({})", render_expr(node.child(0), state, indent))
        }
        NodeKind::Unary(op) => {
            let arg = node.child(0);
            let arg_text = render_expr(arg, state, indent);
            if op.is_word() {
                if matches!(arg.kind(), NodeKind::Parenthetical) {
                    format!("{}{}", op.as_str(), arg_text)
                } else {
                    format!("{} {}", op.as_str(), arg_text)
                }
            } else {
                format!("{}{}", op.as_str(), arg_text)
            }
        }
        NodeKind::Postfix(op) => {
            format!("{}{}", render_expr(node.child(0), state, indent), op.as_str())
        }
        NodeKind::Operator(op) => {
            let left = render_expr(node.child(0), state, indent);
            let right = render_expr(node.child(1), state, indent);
            let (before, after) = binop_padding(*op, pretty);
            format!("{}{}{}{}{}", left, before, op.as_str(), after, right)
        }
        NodeKind::Assignment(op) => {
            let left = render_expr(node.child(0), state, indent);
            let right = render_expr(node.child(1), state, indent);
            let (before, after) = assignop_padding(pretty);
            format!("{}{}{}{}{}", left, before, op.as_str(), after, right)
        }
        NodeKind::ConditionalExpression => {
            let cond = render_expr(node.child(0), state, indent);
            let then_b = render_expr(node.child(1), state, indent);
            let else_b = render_expr(node.child(2), state, indent);
            if pretty {
                format!("{} ? {} : {}", cond, then_b, else_b)
            } else {
                format!("{}?{}:{}", cond, then_b, else_b)
            }
        }
        NodeKind::FunctionCall => {
            let callee = render_expr(node.child(0), state, indent);
            let args = render_expr(node.child(1), state, indent);
            format!("{}({})", callee, args)
        }
        NodeKind::FunctionConstructor => {
            let callee = render_expr(node.child(0), state, indent);
            let args = render_expr(node.child(1), state, indent);
            format!("new {}({})", callee, args)
        }
        NodeKind::StaticMemberExpression => {
            let object = render_expr(node.child(0), state, indent);
            let property = render_expr(node.child(1), state, indent);
            format!("{}.{}", object, property)
        }
        NodeKind::DynamicMemberExpression => {
            let object = render_expr(node.child(0), state, indent);
            let property = render_expr(node.child(1), state, indent);
            format!("{}[{}]", object, property)
        }
        NodeKind::ObjectLiteral => {
            let inner = join_rendered(children_iter(node), state, indent, pretty);
            if pretty && !inner.is_empty() {
                format!("{{ {} }}", inner)
            } else {
                format!("{{{}}}", inner)
            }
        }
        NodeKind::ObjectLiteralProperty => {
            let key = render_expr(node.child(0), state, indent);
            let value = render_expr(node.child(1), state, indent);
            if pretty {
                format!("{}: {}", key, value)
            } else {
                format!("{}:{}", key, value)
            }
        }
        NodeKind::ArrayLiteral => {
            format!("[{}]", join_rendered(children_iter(node), state, indent, pretty))
        }
        NodeKind::Program | NodeKind::StatementList => {
            render_statement_sequence(node.child_nodes(), state, indent, true)
        }
        NodeKind::FunctionDeclaration => {
            let id = render_expr(node.child(0), state, indent);
            let params = render_expr(node.child(1), state, indent);
            let body = render_block(node.child(2), true, state, indent);
            if pretty {
                format!("function {}({}) {}", id, params, body)
            } else {
                format!("function {}({}){}", id, params, body)
            }
        }
        NodeKind::FunctionExpression => {
            let id_text = node.child_opt(0).map(|id| render_expr(id, state, indent));
            let params = render_expr(node.child(1), state, indent);
            let body = render_block(node.child(2), true, state, indent);
            let head = match id_text {
                Some(id) => format!("function {}", id),
                None => "function".to_string(),
            };
            if pretty {
                format!("{}({}) {}", head, params, body)
            } else {
                format!("{}({}){}", head, params, body)
            }
        }
        NodeKind::ArgList => join_rendered(children_iter(node), state, indent, pretty),
        NodeKind::If => render_if(node, state, indent),
        NodeKind::While => {
            let cond = render_expr(node.child(0), state, indent);
            let body = render_block(node.child(1), pretty, state, indent);
            if pretty {
                format!("while ({}) {}", cond, body)
            } else {
                format!("while({}){}", cond, body)
            }
        }
        NodeKind::DoWhile => {
            let body = render_block(node.child(0), pretty, state, indent);
            let cond = render_expr(node.child(1), state, indent);
            if pretty {
                format!("do {} while ({})", body, cond)
            } else {
                format!("do{}while({})", body, cond)
            }
        }
        NodeKind::ForLoop => {
            let init = render_expr(node.child(0), state, indent);
            let cond = render_expr(node.child(1), state, indent);
            let update = render_expr(node.child(2), state, indent);
            let body = render_block(node.child(3), pretty, state, indent);
            if pretty {
                format!("for ({}; {}; {}) {}", init, cond, update, body)
            } else {
                format!("for({};{};{}){}", init, cond, update, body)
            }
        }
        NodeKind::ForIn => {
            let lhs = render_expr(node.child(0), state, indent);
            let rhs = render_expr(node.child(1), state, indent);
            let body = render_block(node.child(2), pretty, state, indent);
            if pretty {
                format!("for ({} in {}) {}", lhs, rhs, body)
            } else {
                format!("for({} in {}){}", lhs, rhs, body)
            }
        }
        NodeKind::With => {
            let object = render_expr(node.child(0), state, indent);
            let body = render_block(node.child(1), pretty, state, indent);
            if pretty {
                format!("with ({}) {}", object, body)
            } else {
                format!("with({}){}", object, body)
            }
        }
        NodeKind::Try => render_try(node, state, indent),
        NodeKind::Switch => render_switch(node, state, indent),
        NodeKind::CaseClause => {
            format!("case {}:", render_expr(node.child(0), state, indent))
        }
        NodeKind::DefaultClause => "default:".to_string(),
        NodeKind::VarDeclaration { .. } => {
            let decls = join_rendered(children_iter(node), state, indent, pretty);
            format!("var {}", decls)
        }
        NodeKind::StatementWithExpression(kind) => render_stmt_expr(*kind, node, state, indent),
        NodeKind::Label => {
            let label = render_expr(node.child(0), state, indent);
            let body = render_statement(node.child(1), state, indent);
            if pretty {
                format!("{}: {}", label, body)
            } else {
                format!("{}:{}", label, body)
            }
        }
    }
}

fn render_stmt_expr(kind: StmtExprKind, node: &Node, state: &mut PrinterState, indent: usize) -> String {
    match node.child_opt(0) {
        Some(arg) => format!("{} {}", kind.as_str(), render_expr(arg, state, indent)),
        None => kind.as_str().to_string(),
    }
}

fn render_if(node: &Node, state: &mut PrinterState, indent: usize) -> String {
    let pretty = state.options.pretty();
    let cond = render_expr(node.child(0), state, indent);
    let then_node = node.child(1);
    let else_opt = node.child_opt(2);

    let must = pretty;
    let then_text = render_block(then_node, must, state, indent);

    let mut out = if pretty {
        format!("if ({}) {}", cond, then_text)
    } else {
        format!("if({}){}", cond, then_text)
    };

    if let Some(else_node) = else_opt {
        out.push_str(if pretty { " else" } else { "else" });
        if let Some(inner_if) = as_single_if(else_node) {
            catchup(state, &mut out, inner_if.lineno());
            out.push(' ');
            out.push_str(&render_statement(inner_if, state, indent));
        } else {
            let else_text = render_block(else_node, false, state, indent);
            if !else_text.starts_with('{') && !else_text.starts_with(' ') {
                out.push(' ');
            }
            out.push_str(&else_text);
        }
    }
    out
}

fn render_try(node: &Node, state: &mut PrinterState, indent: usize) -> String {
    let try_block = render_block(node.child(0), true, state, indent);
    let mut out = format!("try{}", try_block);
    if let (Some(param), Some(block)) = (node.child_opt(1), node.child_opt(2)) {
        let param_text = render_expr(param, state, indent);
        let block_text = render_block(block, true, state, indent);
        if state.options.pretty() {
            out.push_str(&format!(" catch ({}) {}", param_text, block_text));
        } else {
            out.push_str(&format!("catch({}){}", param_text, block_text));
        }
    }
    if let Some(finally_node) = node.child_opt(3) {
        let finally_text = render_block(finally_node, true, state, indent);
        if state.options.pretty() {
            out.push_str(&format!(" finally {}", finally_text));
        } else {
            out.push_str(&format!("finally{}", finally_text));
        }
    }
    out
}

fn render_switch(node: &Node, state: &mut PrinterState, indent: usize) -> String {
    let pretty = state.options.pretty();
    let discriminant = render_expr(node.child(0), state, indent);
    let body = node.child(1);
    let base_indent = indent + 1;

    let mut inner = String::new();
    for slot in body.child_nodes() {
        let item = slot.as_deref().expect("switch body slot must not be absent");
        let this_indent = if matches!(item.kind(), NodeKind::CaseClause | NodeKind::DefaultClause) {
            base_indent.saturating_sub(1)
        } else {
            base_indent
        };
        render_indented_statement(item, state, this_indent, false, &mut inner);
    }

    let mut out = if pretty {
        format!("switch ({}) {{", discriminant)
    } else {
        format!("switch({}){{", discriminant)
    };
    out.push_str(&inner);
    if pretty {
        out.push('\n');
        out.push_str(&indent_str(indent));
    }
    out.push('}');
    out
}

/// `renderStatement(state, indent)`.
fn render_statement(node: &Node, state: &mut PrinterState, indent: usize) -> String {
    match node.kind() {
        _ if is_statement_kind(node.kind()) => render_expr(node, state, indent),
        NodeKind::VarDeclaration { iterator } => {
            let text = render_expr(node, state, indent);
            if *iterator {
                text
            } else {
                format!("{};", text)
            }
        }
        NodeKind::StatementWithExpression(_) => format!("{};", render_expr(node, state, indent)),
        _ => format!("{};", render_expr(node, state, indent)),
    }
}

impl Node {
    /// Renders this node as JavaScript source text under `options`.
    pub fn render(&self, options: RenderOptions) -> String {
        let mut state = PrinterState::new(options);
        match self.kind() {
            NodeKind::Program | NodeKind::StatementList => {
                render_statement_sequence(self.child_nodes(), &mut state, 0, true)
            }
            _ if is_statement_kind(self.kind()) => render_statement(self, &mut state, 0),
            _ => render_expr(self, &mut state, 0),
        }
    }
}
