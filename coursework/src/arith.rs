use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegerMath {
    pub sum: i128,
    pub difference: i128,
    pub product: i128,
    /// `None` when dividing by zero.
    pub quotient: Option<f64>,
}

/// Widened to `i128` so no pair of `i64` inputs can overflow.
pub fn integer_math(x: i64, y: i64) -> IntegerMath {
    let (wx, wy) = (i128::from(x), i128::from(y));
    IntegerMath {
        sum: wx + wy,
        difference: wx - wy,
        product: wx * wy,
        quotient: (y != 0).then(|| x as f64 / y as f64),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMath {
    pub sum: f64,
    pub difference: f64,
    pub product: f64,
    pub quotient: Option<f64>,
}

pub fn float_math(x: f64, y: f64) -> FloatMath {
    FloatMath {
        sum: x + y,
        difference: x - y,
        product: x * y,
        quotient: (y != 0.0).then(|| x / y),
    }
}

/// Operand of [`string_math`]; numbers are coerced to text.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Text(s) => f.write_str(s),
            Operand::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` on whole floats.
            Operand::Float(n) => write!(f, "{n:?}"),
        }
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Int(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Int(n.into())
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Float(n)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringMath {
    pub concatenated: String,
    pub removed: String,
    /// `x` repeated `y` times; only defined for a positive integer `y`.
    pub repeated: Option<String>,
}

pub fn string_math(x: impl Into<Operand>, y: impl Into<Operand>) -> StringMath {
    let x = x.into().to_string();
    let y = y.into();

    let repeated = match y {
        Operand::Int(n) if n > 0 => usize::try_from(n).ok().map(|n| x.repeat(n)),
        _ => None,
    };
    let y = y.to_string();

    StringMath {
        concatenated: format!("{x}{y}"),
        removed: if y.is_empty() { x.clone() } else { x.replace(&y, "") },
        repeated,
    }
}

pub fn and(x: bool, y: bool) -> bool {
    x && y
}

pub fn or(x: bool, y: bool) -> bool {
    x || y
}

pub fn xor(x: bool, y: bool) -> bool {
    x != y
}

pub fn nand(x: bool, y: bool) -> bool {
    !(x && y)
}

pub fn nor(x: bool, y: bool) -> bool {
    !(x || y)
}

pub fn xnor(x: bool, y: bool) -> bool {
    x == y
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gate {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl Gate {
    pub const ALL: [Gate; 6] = [Gate::And, Gate::Or, Gate::Xor, Gate::Nand, Gate::Nor, Gate::Xnor];

    pub fn apply(self, x: bool, y: bool) -> bool {
        match self {
            Gate::And => and(x, y),
            Gate::Or => or(x, y),
            Gate::Xor => xor(x, y),
            Gate::Nand => nand(x, y),
            Gate::Nor => nor(x, y),
            Gate::Xnor => xnor(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_by_zero_is_absent() {
        let r = integer_math(7, 2);
        assert_eq!((r.sum, r.difference, r.product), (9, 5, 14));
        assert_eq!(r.quotient, Some(3.5));
        assert_eq!(integer_math(7, 0).quotient, None);
    }

    #[test]
    fn integer_math_handles_extremes() {
        let r = integer_math(i64::MAX, 1);
        assert_eq!(r.sum, i128::from(i64::MAX) + 1);
        assert_eq!(r.difference, i128::from(i64::MAX) - 1);

        let r = integer_math(i64::MIN, i64::MAX);
        assert_eq!(r.difference, i128::from(i64::MIN) - i128::from(i64::MAX));
        assert_eq!(r.product, i128::from(i64::MIN) * i128::from(i64::MAX));
        assert_eq!(integer_math(i64::MIN, -1).product, -i128::from(i64::MIN));
    }

    #[test]
    fn float_math_matches_operators() {
        let r = float_math(1.5, 0.5);
        assert_eq!(r, FloatMath { sum: 2.0, difference: 1.0, product: 0.75, quotient: Some(3.0) });
        assert_eq!(float_math(1.5, 0.0).quotient, None);
    }

    #[test]
    fn string_repetition_needs_a_positive_integer() {
        assert_eq!(string_math("abc", 2).repeated.as_deref(), Some("abcabc"));
        assert_eq!(string_math("abc", 0).repeated, None);
        assert_eq!(string_math("abc", -3).repeated, None);
        assert_eq!(string_math("abc", 2.0).repeated, None);
        assert_eq!(string_math("abc", "2").repeated, None);
    }

    #[test]
    fn numbers_are_coerced_to_text() {
        let r = string_math(12, 2);
        assert_eq!(r.concatenated, "122");
        assert_eq!(r.removed, "1");
        assert_eq!(r.repeated.as_deref(), Some("1212"));

        assert_eq!(string_math("v1.5", 1.5).removed, "v");
        assert_eq!(string_math("x", 2.0).concatenated, "x2.0");
    }

    #[test]
    fn removal_drops_every_occurrence() {
        let r = string_math("banana", "an");
        assert_eq!(r.concatenated, "bananaan");
        assert_eq!(r.removed, "ba");
        assert_eq!(string_math("same", "").removed, "same");
    }

    #[test]
    fn gates_follow_truth_tables() {
        let inputs = [(false, false), (false, true), (true, false), (true, true)];
        let table = |gate: Gate| inputs.map(|(x, y)| gate.apply(x, y));

        assert_eq!(table(Gate::And), [false, false, false, true]);
        assert_eq!(table(Gate::Or), [false, true, true, true]);
        assert_eq!(table(Gate::Xor), [false, true, true, false]);
        assert_eq!(table(Gate::Nand), [true, true, true, false]);
        assert_eq!(table(Gate::Nor), [true, false, false, false]);
        assert_eq!(table(Gate::Xnor), [true, false, false, true]);

        for gate in Gate::ALL {
            for (x, y) in inputs {
                assert_eq!(gate.apply(x, y), gate.apply(y, x), "{gate:?} is symmetric");
            }
        }
    }
}
