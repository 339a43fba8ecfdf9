//! Boundaries of a sorted set range.
//!
//! A boundary is encoded into a single argument token. Score boundaries use the numeric
//! syntax (`5`, `(5`, `+inf`) and lexicographic boundaries the lex syntax (`[a`, `(a`, `+`).

use std::fmt;

/// Positive or negative infinity.
///
/// The same sentinel is valid in both numeric and lexicographic ranges. Its encoding depends
/// on the [`BoundContext`] it is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfBound {
    PosInf,
    NegInf,
}

/// The kind of range a boundary is encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundContext {
    /// Numeric score range (`BYSCORE`).
    Score,
    /// Lexicographic range (`BYLEX`).
    Lex,
}

/// A specific numeric score boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBoundary {
    value: f64,
    inclusive: bool,
}

/// A specific lexicographic boundary.
///
/// The value must not start with a character the server would read as a range prefix;
/// this is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexBoundary {
    value: String,
    inclusive: bool,
}

/// Either edge of a score range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    Inf(InfBound),
    Value(ScoreBoundary),
}

/// Either edge of a lexicographic range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LexBound {
    Inf(InfBound),
    Value(LexBoundary),
}

impl InfBound {
    /// Returns the token for this sentinel in the given context.
    pub fn to_arg(self, context: BoundContext) -> &'static str {
        match (self, context) {
            (InfBound::PosInf, BoundContext::Score) => "+inf",
            (InfBound::NegInf, BoundContext::Score) => "-inf",
            (InfBound::PosInf, BoundContext::Lex) => "+",
            (InfBound::NegInf, BoundContext::Lex) => "-",
        }
    }
}

impl ScoreBoundary {
    pub fn new(value: f64, inclusive: bool) -> ScoreBoundary {
        ScoreBoundary { value, inclusive }
    }

    pub fn inclusive(value: f64) -> ScoreBoundary {
        ScoreBoundary::new(value, true)
    }

    pub fn exclusive(value: f64) -> ScoreBoundary {
        ScoreBoundary::new(value, false)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Returns the boundary token: `<value>` when inclusive, `(<value>` otherwise.
    pub fn to_arg(&self) -> String {
        if self.inclusive {
            format_score(self.value)
        } else {
            format!("({}", format_score(self.value))
        }
    }
}

impl LexBoundary {
    pub fn new(value: impl ToString, inclusive: bool) -> LexBoundary {
        LexBoundary {
            value: value.to_string(),
            inclusive,
        }
    }

    pub fn inclusive(value: impl ToString) -> LexBoundary {
        LexBoundary::new(value, true)
    }

    pub fn exclusive(value: impl ToString) -> LexBoundary {
        LexBoundary::new(value, false)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// Returns the boundary token: `[<value>` when inclusive, `(<value>` otherwise.
    pub fn to_arg(&self) -> String {
        let prefix = if self.inclusive { '[' } else { '(' };
        format!("{}{}", prefix, self.value)
    }
}

impl ScoreBound {
    pub fn to_arg(&self) -> String {
        match self {
            ScoreBound::Inf(inf) => inf.to_arg(BoundContext::Score).to_string(),
            ScoreBound::Value(boundary) => boundary.to_arg(),
        }
    }

    /// Reads a score boundary token.
    ///
    /// Accepts `+inf`, `-inf` and `inf` in any case, `(<float>` for an exclusive boundary
    /// and a bare float for an inclusive one.
    pub fn from_arg(arg: &str) -> crate::Result<ScoreBound> {
        const MSG: &str = "min or max is not a float";

        if arg.eq_ignore_ascii_case("+inf") || arg.eq_ignore_ascii_case("inf") {
            return Ok(ScoreBound::Inf(InfBound::PosInf));
        }
        if arg.eq_ignore_ascii_case("-inf") {
            return Ok(ScoreBound::Inf(InfBound::NegInf));
        }

        let (raw, inclusive) = match arg.strip_prefix('(') {
            Some(rest) => (rest, false),
            None => (arg, true),
        };

        match raw.parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(ScoreBound::Value(ScoreBoundary::new(value, inclusive))),
            _ => Err(MSG.into()),
        }
    }
}

impl LexBound {
    pub fn to_arg(&self) -> String {
        match self {
            LexBound::Inf(inf) => inf.to_arg(BoundContext::Lex).to_string(),
            LexBound::Value(boundary) => boundary.to_arg(),
        }
    }

    /// Reads a lexicographic boundary token: `+`, `-`, `[<value>` or `(<value>`.
    pub fn from_arg(arg: &str) -> crate::Result<LexBound> {
        match arg {
            "+" => Ok(LexBound::Inf(InfBound::PosInf)),
            "-" => Ok(LexBound::Inf(InfBound::NegInf)),
            _ => {
                if let Some(value) = arg.strip_prefix('[') {
                    Ok(LexBound::Value(LexBoundary::inclusive(value)))
                } else if let Some(value) = arg.strip_prefix('(') {
                    Ok(LexBound::Value(LexBoundary::exclusive(value)))
                } else {
                    Err("min or max not valid string range item".into())
                }
            }
        }
    }
}

impl From<InfBound> for ScoreBound {
    fn from(src: InfBound) -> ScoreBound {
        ScoreBound::Inf(src)
    }
}

impl From<ScoreBoundary> for ScoreBound {
    /// An inclusive infinite value is written as `+inf` / `-inf`, so it becomes the sentinel.
    fn from(src: ScoreBoundary) -> ScoreBound {
        match src.value {
            v if src.inclusive && v == f64::INFINITY => ScoreBound::Inf(InfBound::PosInf),
            v if src.inclusive && v == f64::NEG_INFINITY => ScoreBound::Inf(InfBound::NegInf),
            _ => ScoreBound::Value(src),
        }
    }
}

impl From<InfBound> for LexBound {
    fn from(src: InfBound) -> LexBound {
        LexBound::Inf(src)
    }
}

impl From<LexBoundary> for LexBound {
    fn from(src: LexBoundary) -> LexBound {
        LexBound::Value(src)
    }
}

impl fmt::Display for ScoreBound {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.to_arg())
    }
}

impl fmt::Display for LexBound {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.to_arg())
    }
}

/// Formats a score the way the server's float parser reads it back.
///
/// `Display` for `f64` prints the shortest decimal that round-trips and never switches to
/// exponent notation. Infinities get the explicit sign the server expects.
pub(crate) fn format_score(value: f64) -> String {
    if value == f64::INFINITY {
        return "+inf".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-inf".to_string();
    }
    format!("{}", value)
}

/// Formats a weight. Integral weights keep a trailing `.0`.
pub(crate) fn format_weight(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format_score(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_boundary_inclusive_is_plain_decimal() {
        assert_eq!(ScoreBoundary::inclusive(5.0).to_arg(), "5");
        assert_eq!(ScoreBoundary::inclusive(2.5).to_arg(), "2.5");
        assert_eq!(ScoreBoundary::inclusive(-0.25).to_arg(), "-0.25");
    }

    #[test]
    fn score_boundary_exclusive_has_paren_prefix() {
        assert_eq!(ScoreBoundary::exclusive(5.0).to_arg(), "(5");
        assert_eq!(ScoreBoundary::exclusive(-3.75).to_arg(), "(-3.75");
    }

    #[test]
    fn score_formatting_never_uses_exponent() {
        assert_eq!(format_score(1e21), "1000000000000000000000");
        assert_eq!(format_score(0.000001), "0.000001");
        assert_eq!(format_score(f64::INFINITY), "+inf");
        assert_eq!(format_score(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn weight_formatting_keeps_fraction() {
        assert_eq!(format_weight(1.0), "1.0");
        assert_eq!(format_weight(-2.0), "-2.0");
        assert_eq!(format_weight(0.5), "0.5");
        assert_eq!(format_weight(f64::INFINITY), "+inf");
    }

    #[test]
    fn lex_boundary_prefixes() {
        assert_eq!(LexBoundary::inclusive("abc").to_arg(), "[abc");
        assert_eq!(LexBoundary::exclusive("abc").to_arg(), "(abc");
        assert_eq!(LexBoundary::inclusive("").to_arg(), "[");
    }

    #[test]
    fn inf_bound_depends_on_context() {
        assert_eq!(InfBound::PosInf.to_arg(BoundContext::Score), "+inf");
        assert_eq!(InfBound::NegInf.to_arg(BoundContext::Score), "-inf");
        assert_eq!(InfBound::PosInf.to_arg(BoundContext::Lex), "+");
        assert_eq!(InfBound::NegInf.to_arg(BoundContext::Lex), "-");

        assert_eq!(ScoreBound::from(InfBound::PosInf).to_arg(), "+inf");
        assert_eq!(LexBound::from(InfBound::PosInf).to_arg(), "+");
    }

    #[test]
    fn inclusive_infinite_value_is_the_sentinel() {
        assert_eq!(
            ScoreBound::from(ScoreBoundary::inclusive(f64::INFINITY)),
            ScoreBound::Inf(InfBound::PosInf)
        );
        assert_eq!(
            ScoreBound::from(ScoreBoundary::inclusive(f64::NEG_INFINITY)),
            ScoreBound::Inf(InfBound::NegInf)
        );

        // "(+inf" reads back as an exclusive value, so that one is kept.
        let exclusive = ScoreBound::from(ScoreBoundary::exclusive(f64::INFINITY));
        assert_eq!(exclusive.to_arg(), "(+inf");
        assert_eq!(ScoreBound::from_arg(&exclusive.to_arg()).unwrap(), exclusive);
    }

    #[test]
    fn parse_score_bound() {
        assert_eq!(ScoreBound::from_arg("+inf").unwrap(), ScoreBound::Inf(InfBound::PosInf));
        assert_eq!(ScoreBound::from_arg("INF").unwrap(), ScoreBound::Inf(InfBound::PosInf));
        assert_eq!(ScoreBound::from_arg("-inf").unwrap(), ScoreBound::Inf(InfBound::NegInf));
        assert_eq!(
            ScoreBound::from_arg("(1.5").unwrap(),
            ScoreBound::Value(ScoreBoundary::exclusive(1.5))
        );
        assert_eq!(
            ScoreBound::from_arg("7").unwrap(),
            ScoreBound::Value(ScoreBoundary::inclusive(7.0))
        );

        assert!(ScoreBound::from_arg("abc").is_err());
        assert!(ScoreBound::from_arg("(").is_err());
        assert!(ScoreBound::from_arg("nan").is_err());
    }

    #[test]
    fn parse_lex_bound() {
        assert_eq!(LexBound::from_arg("+").unwrap(), LexBound::Inf(InfBound::PosInf));
        assert_eq!(LexBound::from_arg("-").unwrap(), LexBound::Inf(InfBound::NegInf));
        assert_eq!(
            LexBound::from_arg("[a").unwrap(),
            LexBound::Value(LexBoundary::inclusive("a"))
        );
        assert_eq!(
            LexBound::from_arg("(b").unwrap(),
            LexBound::Value(LexBoundary::exclusive("b"))
        );

        assert!(LexBound::from_arg("a").is_err());
        assert!(LexBound::from_arg("").is_err());
    }
}
