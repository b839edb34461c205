//! Constant evaluation of expressions after reference substitution.
//!
//! Expression semantics belong to an external expression parser. The
//! elaborator only needs integers for a few decisions (normalising ranges,
//! picking the widest wire bounds), so it talks to an
//! [`ExpressionEvaluator`] and treats `None` as "symbolic, leave it alone".
//! [`IntegerEvaluator`] covers integer arithmetic on Verilog literals.

use crate::expr::{lex, Lexeme, LexemeKind};

/// Evaluates an expression to an integer, if it is constant.
pub trait ExpressionEvaluator: Sync {
    /// Returns the integer value of the expression, or `None` if it is not a
    /// constant the evaluator understands.
    fn evaluate(&self, expr: &str) -> Option<i64>;
}

/// Integer arithmetic over Verilog literals.
///
/// Supports `+ - * / % **`, unary minus, parentheses and `$clog2`.
/// Any identifier makes the expression non-constant.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerEvaluator;

impl ExpressionEvaluator for IntegerEvaluator {
    fn evaluate(&self, expr: &str) -> Option<i64> {
        let tokens: Vec<Lexeme<'_>> = lex(expr)
            .into_iter()
            .filter(|l| l.kind != LexemeKind::Space)
            .collect();
        if tokens.is_empty() {
            return None;
        }
        let mut parser = Parser { tokens, pos: 0 };
        let value = parser.additive()?;
        if parser.pos == parser.tokens.len() {
            Some(value)
        } else {
            None
        }
    }
}

struct Parser<'e> {
    tokens: Vec<Lexeme<'e>>,
    pos: usize,
}

impl<'e> Parser<'e> {
    fn peek(&self) -> Option<&'e str> {
        self.tokens.get(self.pos).map(|l| l.text)
    }

    fn eat(&mut self, text: &str) -> bool {
        if self.peek() == Some(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn additive(&mut self) -> Option<i64> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(op @ ("+" | "-")) => op,
                _ => return Some(lhs),
            };
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = apply_binop_i64(op, lhs, rhs)?;
        }
    }

    fn multiplicative(&mut self) -> Option<i64> {
        let mut lhs = self.power()?;
        loop {
            let op = match self.peek() {
                Some("*") if self.tokens.get(self.pos + 1).map(|l| l.text) == Some("*") => {
                    return Some(lhs)
                }
                Some(op @ ("*" | "/" | "%")) => op,
                _ => return Some(lhs),
            };
            self.pos += 1;
            let rhs = self.power()?;
            lhs = apply_binop_i64(op, lhs, rhs)?;
        }
    }

    fn power(&mut self) -> Option<i64> {
        let base = self.unary()?;
        let is_pow = self.peek() == Some("*")
            && self.tokens.get(self.pos + 1).map(|l| l.text) == Some("*");
        if !is_pow {
            return Some(base);
        }
        self.pos += 2;
        // Right associative.
        let exponent = self.power()?;
        apply_binop_i64("**", base, exponent)
    }

    fn unary(&mut self) -> Option<i64> {
        if self.eat("-") {
            return self.unary().map(i64::wrapping_neg);
        }
        if self.eat("+") {
            return self.unary();
        }
        self.primary()
    }

    fn primary(&mut self) -> Option<i64> {
        let lexeme = *self.tokens.get(self.pos)?;
        self.pos += 1;
        match lexeme.kind {
            LexemeKind::Literal => parse_verilog_literal(lexeme.text),
            LexemeKind::Ident if lexeme.text == "$clog2" => {
                if !self.eat("(") {
                    return None;
                }
                let arg = self.additive()?;
                if !self.eat(")") {
                    return None;
                }
                Some(clog2(arg))
            }
            LexemeKind::Punct if lexeme.text == "(" => {
                let inner = self.additive()?;
                if self.eat(")") {
                    Some(inner)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Parses a Verilog numeric literal: `42`, `1_000`, `8'hFF`, `4'b1010`, `'d3`.
pub(crate) fn parse_verilog_literal(text: &str) -> Option<i64> {
    let text = text.replace('_', "");

    if let Some(tick_pos) = text.find('\'') {
        let after_tick = &text[tick_pos + 1..];
        let after_sign = after_tick
            .strip_prefix(['s', 'S'])
            .unwrap_or(after_tick);
        let mut chars = after_sign.chars();
        let radix = match chars.next()? {
            'b' | 'B' => 2,
            'o' | 'O' => 8,
            'd' | 'D' => 10,
            'h' | 'H' => 16,
            _ => return None,
        };
        // x/z/? bits count as zero.
        let clean: String = chars
            .map(|c| match c {
                'x' | 'X' | 'z' | 'Z' | '?' => '0',
                other => other,
            })
            .collect();
        return i64::from_str_radix(&clean, radix).ok();
    }

    text.parse::<i64>().ok()
}

/// Ceiling of log2, with `$clog2` semantics: `clog2(0) = clog2(1) = 0`.
fn clog2(n: i64) -> i64 {
    if n <= 1 {
        return 0;
    }
    let mut result = 0i64;
    let mut val = n - 1;
    while val > 0 {
        result += 1;
        val >>= 1;
    }
    result
}

/// Applies a binary operator. Returns `None` for division or modulo by zero.
fn apply_binop_i64(op: &str, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        "+" => Some(lhs.wrapping_add(rhs)),
        "-" => Some(lhs.wrapping_sub(rhs)),
        "*" => Some(lhs.wrapping_mul(rhs)),
        "/" => lhs.checked_div(rhs),
        "%" => lhs.checked_rem(rhs),
        "**" => {
            if rhs < 0 {
                Some(0)
            } else {
                Some(lhs.wrapping_pow(rhs as u32))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> Option<i64> {
        IntegerEvaluator.evaluate(expr)
    }

    #[test]
    fn literals() {
        assert_eq!(eval("42"), Some(42));
        assert_eq!(eval("1_000"), Some(1000));
        assert_eq!(eval("8'hFF"), Some(255));
        assert_eq!(eval("4'b1010"), Some(10));
        assert_eq!(eval("'d7"), Some(7));
        assert_eq!(eval("4'bx1"), Some(1));
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("2+3*4"), Some(14));
        assert_eq!(eval("(2+3)*4"), Some(20));
        assert_eq!(eval("10-4-3"), Some(3));
        assert_eq!(eval("2**3**2"), Some(512));
        assert_eq!(eval("3*2**2"), Some(12));
    }

    #[test]
    fn unary_minus() {
        assert_eq!(eval("-3+5"), Some(2));
        assert_eq!(eval("-(2*3)"), Some(-6));
    }

    #[test]
    fn clog2_function() {
        assert_eq!(eval("$clog2(1)"), Some(0));
        assert_eq!(eval("$clog2(8)"), Some(3));
        assert_eq!(eval("$clog2(9)"), Some(4));
        assert_eq!(eval("$clog2(16)-1"), Some(3));
    }

    #[test]
    fn identifiers_are_symbolic() {
        assert_eq!(eval("WIDTH-1"), None);
        assert_eq!(eval("topParameter"), None);
    }

    #[test]
    fn malformed_is_none() {
        assert_eq!(eval(""), None);
        assert_eq!(eval("(1+2"), None);
        assert_eq!(eval("1+"), None);
        assert_eq!(eval("1 2"), None);
        assert_eq!(eval("4/0"), None);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(eval("  7 - 0 "), Some(7));
    }
}
