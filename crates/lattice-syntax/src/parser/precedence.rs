//! Binary operator precedence table (§4.4.1), lowest to highest. Pratt
//! parsing in `expr.rs` climbs this table directly rather than encoding it
//! as nested grammar productions, the way the teacher's
//! `grammar::expressions` module climbs tree-sitter's query operators.

use crate::astdb::AstKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(pub u8);

impl Precedence {
    pub const NONE: Precedence = Precedence(0);

    pub fn next(self) -> Precedence {
        Precedence(self.0 + 1)
    }
}

/// `None` for non-operator tokens and unary-only operators (`!`, `~`, `not`).
///
/// Levels follow §4.4.1 exactly, lowest to highest: `assignment < logical_or
/// < null_coalesce < logical_and < equality < comparison < bitwise_or <
/// bitwise_xor < bitwise_and < shift < range < term < factor < power <
/// unary < pipeline < call/postfix < primary`. Unary and call/postfix
/// aren't rows here — they're handled by `is_unary_prefix`/`UNARY_PRECEDENCE`
/// and the postfix loop in `expr.rs` respectively.
pub fn infix_binding_power(kind: AstKind) -> Option<(Precedence, Precedence)> {
    use AstKind::*;
    let level = match kind {
        Eq | PlusEq | MinusEq | StarEq | SlashEq | PercentEq | AmpEq | PipeEq | CaretEq | ShlEq | ShrEq => 1,
        KwOr => 2,
        NullCoalesce => 3,
        KwAnd => 4,
        EqEq | NotEq => 5,
        Lt | LtEq | Gt | GtEq => 6,
        Pipe => 7,
        Caret => 8,
        Amp => 9,
        Shl | Shr => 10,
        RangeInclusiveOp | RangeExclusiveOp => 11,
        Plus | Minus => 12,
        Star | Slash | Percent => 13,
        Pow => 14,
        Pipeline => 15,
        _ => return None,
    };
    // Left-associative except `**`, which binds tighter on the right so
    // `2 ** 3 ** 2` parses as `2 ** (3 ** 2)`, and assignment, which is
    // right-associative so `a = b = 1` parses as `a = (b = 1)`.
    if kind == Pow || level == 1 {
        Some((Precedence(level), Precedence(level)))
    } else {
        Some((Precedence(level), Precedence(level + 1)))
    }
}

pub fn is_unary_prefix(kind: AstKind) -> bool {
    matches!(kind, AstKind::Minus | AstKind::Bang | AstKind::Tilde | AstKind::KwNot)
}

/// Prefix operators bind tighter than every infix operator except `**`
/// and field/call/index postfix chains, which are handled separately in
/// the primary-expression parser.
pub const UNARY_PRECEDENCE: Precedence = Precedence(14);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_is_right_associative() {
        let (l, r) = infix_binding_power(AstKind::Pow).unwrap();
        assert!(r <= l);
    }

    #[test]
    fn plus_is_left_associative() {
        let (l, r) = infix_binding_power(AstKind::Plus).unwrap();
        assert!(l < r);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (_, add_r) = infix_binding_power(AstKind::Plus).unwrap();
        let (mul_l, _) = infix_binding_power(AstKind::Star).unwrap();
        assert!(mul_l.0 > add_r.0 - 1);
    }
}
