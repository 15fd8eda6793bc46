use super::*;
use crate::Span;

#[test]
fn binary_op_symbols() {
    assert_eq!(BinaryOp::NotEq.as_symbol(), "~=");
    assert_eq!(BinaryOp::Concat.as_symbol(), "..");
    assert_eq!(UnaryOp::Len.as_symbol(), "#");
}

#[test]
fn precedence_ordering() {
    let (or, _) = BinaryOp::Or.binding_power();
    let (and, _) = BinaryOp::And.binding_power();
    let (add, _) = BinaryOp::Add.binding_power();
    let (mul, _) = BinaryOp::Mul.binding_power();
    let (pow, _) = BinaryOp::Pow.binding_power();
    assert!(or < and && and < add && add < mul);
    assert!(mul < UnaryOp::PRECEDENCE && UnaryOp::PRECEDENCE < pow);
}

#[test]
fn right_associative_operators() {
    let (l, r) = BinaryOp::Concat.binding_power();
    assert!(l > r);
    let (l, r) = BinaryOp::Pow.binding_power();
    assert!(l > r);
    let (l, r) = BinaryOp::Sub.binding_power();
    assert!(l < r);
}

#[test]
fn call_is_multi_valued() {
    let callee = Expr::new(ExprKind::Identifier("f".into()), Span::new(0, 1));
    let call = Expr::new(
        ExprKind::FunctionCall {
            callee: Box::new(callee.clone()),
            args: vec![],
        },
        Span::new(0, 3),
    );
    assert!(call.is_multi_valued());
    assert!(!callee.is_multi_valued());
    let wrapped = Expr::new(ExprKind::Paren(Box::new(call)), Span::new(0, 5));
    assert!(!wrapped.is_multi_valued());
}

#[test]
fn kind_names() {
    assert_eq!(StmtKind::Goto(Ident::new("x", Span::DUMMY)).kind_name(), "goto statement");
    assert_eq!(ExprKind::RestArgument.kind_name(), "rest argument");
}
