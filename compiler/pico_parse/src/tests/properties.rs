//! Property tests: generated arithmetic nests parse and keep their shape.

use pico_ir::{ExprKind, StmtKind};
use proptest::prelude::*;

use crate::parse;

fn arith() -> impl Strategy<Value = String> {
    let leaf = (0u32..1000).prop_map(|n| n.to_string());
    leaf.prop_recursive(6, 64, 2, |inner| {
        (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "..", "^"]), inner)
            .prop_map(|(l, op, r)| format!("({l} {op} {r})"))
    })
}

proptest! {
    #[test]
    fn generated_expressions_parse(src in arith()) {
        let block = parse(&format!("return {src}"));
        prop_assert!(block.is_ok(), "failed on {}", src);
    }

    #[test]
    fn deep_parentheses_parse(depth in 1usize..200) {
        let src = format!("return {}1{}", "(".repeat(depth), ")".repeat(depth));
        let block = parse(&src).map_err(|e| TestCaseError::fail(e.message))?;
        let is_return = matches!(block.stmts[0].kind, StmtKind::Return(ref v) if matches!(v[0].kind, ExprKind::Paren(_)));
        prop_assert!(is_return);
    }
}
