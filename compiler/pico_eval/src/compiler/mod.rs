//! Compiler from the syntax tree to executable closures.
//!
//! Compilation runs once per `evaluate` call and either produces a complete
//! chunk or fails before anything executes.
//!
//! # Scoping
//!
//! Each function being compiled keeps a stack of block scopes mapping
//! names to slot indices in its frame. A name resolves to the nearest
//! enclosing local; names owned by an enclosing function become upvalues,
//! threaded through every function in between; anything else is a global.

mod expr;
mod stmt;

use std::rc::Rc;

use pico_ir::Block;
use rustc_hash::FxHashMap;

use crate::exec::{Proto, UpvalueSource};
use crate::CompileError;

/// How an identifier resolves at the point of use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    Local(usize),
    Upvalue(usize),
    Global,
}

/// Compile-time state of one function.
struct FunctionState {
    name: String,
    blocks: Vec<FxHashMap<String, usize>>,
    slot_count: usize,
    upvalues: Vec<(String, UpvalueSource)>,
    is_variadic: bool,
    loop_depth: usize,
}

impl FunctionState {
    fn new(name: String, is_variadic: bool) -> Self {
        FunctionState {
            name,
            blocks: vec![FxHashMap::default()],
            slot_count: 0,
            upvalues: Vec::new(),
            is_variadic,
            loop_depth: 0,
        }
    }

    fn find_local(&self, name: &str) -> Option<usize> {
        self.blocks.iter().rev().find_map(|block| block.get(name).copied())
    }

    fn find_upvalue(&self, name: &str) -> Option<usize> {
        self.upvalues.iter().position(|(n, _)| n == name)
    }

    fn add_upvalue(&mut self, name: &str, source: UpvalueSource) -> usize {
        self.upvalues.push((name.to_string(), source));
        self.upvalues.len() - 1
    }
}

/// AST to closure-tree compiler.
pub(crate) struct Compiler {
    functions: Vec<FunctionState>,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            functions: Vec::new(),
        }
    }

    /// Compile a chunk into a zero-parameter function body.
    pub(crate) fn compile_chunk(mut self, block: &Block) -> Result<Rc<Proto>, CompileError> {
        self.functions.push(FunctionState::new("main chunk".to_string(), false));
        let body = self.compile_stmts(&block.stmts)?;
        let state = self.pop_function();
        tracing::debug!(slots = state.slot_count, stmts = block.stmts.len(), "compiled chunk");
        Ok(Rc::new(Proto {
            name: state.name,
            param_count: 0,
            is_variadic: false,
            slot_count: state.slot_count,
            upvalues: Vec::new(),
            body,
        }))
    }

    fn current(&mut self) -> &mut FunctionState {
        let last = self.functions.len() - 1;
        &mut self.functions[last]
    }

    fn pop_function(&mut self) -> FunctionState {
        self.functions
            .pop()
            .unwrap_or_else(|| FunctionState::new(String::new(), false))
    }

    fn push_scope(&mut self) {
        self.current().blocks.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.current().blocks.pop();
    }

    /// Allocate a fresh slot for `name` in the innermost scope, shadowing any
    /// outer binding.
    fn declare_local(&mut self, name: &str) -> usize {
        let state = self.current();
        let slot = state.slot_count;
        state.slot_count += 1;
        if let Some(block) = state.blocks.last_mut() {
            block.insert(name.to_string(), slot);
        }
        slot
    }

    fn resolve(&mut self, name: &str) -> Resolved {
        let level = self.functions.len() - 1;
        self.resolve_at(level, name)
    }

    fn resolve_at(&mut self, level: usize, name: &str) -> Resolved {
        let state = &self.functions[level];
        if let Some(slot) = state.find_local(name) {
            return Resolved::Local(slot);
        }
        if let Some(index) = state.find_upvalue(name) {
            return Resolved::Upvalue(index);
        }
        if level == 0 {
            return Resolved::Global;
        }
        let source = match self.resolve_at(level - 1, name) {
            Resolved::Local(slot) => UpvalueSource::Local(slot),
            Resolved::Upvalue(index) => UpvalueSource::Upvalue(index),
            Resolved::Global => return Resolved::Global,
        };
        Resolved::Upvalue(self.functions[level].add_upvalue(name, source))
    }

    /// Resolution without registering upvalues, for diagnostics.
    fn peek(&self, name: &str) -> Resolved {
        for (depth, state) in self.functions.iter().rev().enumerate() {
            if state.find_local(name).is_some() {
                return if depth == 0 {
                    Resolved::Local(0)
                } else {
                    Resolved::Upvalue(0)
                };
            }
            if state.find_upvalue(name).is_some() {
                return Resolved::Upvalue(0);
            }
        }
        Resolved::Global
    }

    fn enter_loop(&mut self) {
        self.current().loop_depth += 1;
    }

    fn exit_loop(&mut self) {
        let state = self.current();
        state.loop_depth = state.loop_depth.saturating_sub(1);
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}
