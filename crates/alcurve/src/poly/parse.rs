//! Text form of bivariate polynomials.
//!
//! Grammar (whitespace ignored):
//! `expr := term (('+'|'-') term)*`,
//! `term := unary (['*'|'/'] unary)*` (division by non-zero constants only),
//! `unary := ('-'|'+') unary | atom ['^' int]`,
//! `atom := int | 'x' | 'y' | '(' expr ')'`.
//! Juxtaposition multiplies, so `3x^2y` parses as `3*x^2*y`.

use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::bipoly::BiPoly;
use crate::error::KernelError;

/// Exponents above this are rejected rather than expanded.
const MAX_EXPONENT: u32 = 64;

impl FromStr for BiPoly {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut p = Parser { src: s.as_bytes(), pos: 0 };
        let out = p.expr()?;
        p.skip_ws();
        if p.pos < p.src.len() {
            return Err(p.error("unexpected trailing input"));
        }
        Ok(out)
    }
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> KernelError {
        KernelError::Parse {
            pos: self.pos,
            reason: reason.to_string(),
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<BiPoly, KernelError> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    acc = &acc + &self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    acc = &acc - &self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<BiPoly, KernelError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    acc = &acc * &self.unary()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let d = self.unary()?;
                    if d.total_degree() != 0 || d.is_zero() {
                        return Err(self.error("divisor must be a non-zero constant"));
                    }
                    acc = acc.scale(&d.coeff_y(0).coeff(0).recip());
                }
                Some(c) if c.is_ascii_digit() || matches!(c, b'x' | b'y' | b'(') => {
                    acc = &acc * &self.unary()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<BiPoly, KernelError> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(b'+') => {
                self.pos += 1;
                self.unary()
            }
            _ => {
                let base = self.atom()?;
                if self.peek() == Some(b'^') {
                    self.pos += 1;
                    self.skip_ws();
                    let e = self.exponent()?;
                    Ok(base.pow(e))
                } else {
                    Ok(base)
                }
            }
        }
    }

    fn atom(&mut self) -> Result<BiPoly, KernelError> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let digits = self.digits();
                let n: BigInt = digits
                    .parse()
                    .map_err(|_| self.error("malformed integer literal"))?;
                Ok(BiPoly::constant(BigRational::from_integer(n)))
            }
            Some(b'x') => {
                self.pos += 1;
                Ok(BiPoly::x())
            }
            Some(b'y') => {
                self.pos += 1;
                Ok(BiPoly::y())
            }
            Some(b'(') => {
                self.pos += 1;
                let inner = self.expr()?;
                if self.peek() != Some(b')') {
                    return Err(self.error("expected ')'"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(_) => Err(self.error("expected integer, 'x', 'y' or '('")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn digits(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    fn exponent(&mut self) -> Result<u32, KernelError> {
        if !self.src.get(self.pos).is_some_and(u8::is_ascii_digit) {
            return Err(self.error("expected exponent"));
        }
        let digits = self.digits();
        match digits.parse::<u32>() {
            Ok(e) if e <= MAX_EXPONENT => Ok(e),
            _ => Err(self.error("exponent out of range")),
        }
    }
}
