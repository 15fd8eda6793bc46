//! Binary and Unary Operators
//!
//! Precedence follows the cartridge dialect (a Lua subset), lowest first:
//! `or`, `and`, comparison, `..`, additive, multiplicative, unary, `^`.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    NotEq,
    Eq,

    // String
    Concat,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::NotEq => "~=",
            Self::Eq => "==",
            Self::Concat => "..",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    /// Binding power on the left and right side.
    ///
    /// Right-associative operators bind tighter on their left.
    pub const fn binding_power(self) -> (u8, u8) {
        match self {
            Self::Or => (1, 2),
            Self::And => (3, 4),
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq | Self::NotEq | Self::Eq => (5, 6),
            Self::Concat => (8, 7),
            Self::Add | Self::Sub => (9, 10),
            Self::Mul | Self::Div | Self::Mod => (11, 12),
            Self::Pow => (15, 14),
        }
    }

    /// `and`/`or` evaluate their right operand lazily.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Logical not: `not x`
    Not,
    /// Length: `#x`
    Len,
    /// Arithmetic negation: `-x`
    Neg,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Len => "#",
            Self::Neg => "-",
        }
    }

    /// Operand binding power; sits between multiplicative operators and `^`.
    pub const PRECEDENCE: u8 = 13;
}
