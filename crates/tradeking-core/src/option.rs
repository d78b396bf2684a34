//! OCC option symbology and the options search query language.

use crate::error::{ApiError, ApiResult};
use crate::price::Price;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionRight {
    Call,
    Put,
}

impl OptionRight {
    /// Single-character code used inside option symbols.
    pub fn code(&self) -> char {
        match self {
            OptionRight::Call => 'C',
            OptionRight::Put => 'P',
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for OptionRight {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "C" => Ok(OptionRight::Call),
            "P" => Ok(OptionRight::Put),
            other => Err(ApiError::Validation(format!(
                "option right must be C or P, got {other:?}"
            ))),
        }
    }
}

/// An OCC-format option symbol.
///
/// Rendered as `<UNDERLYING><YYMMDD><C|P><strike>`, where the strike is the
/// milli-dollar amount zero-padded to eight digits. `IBM140118C00150000` is
/// the 2014-01-18 IBM 150 call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionSymbol {
    underlying: String,
    expiration: NaiveDate,
    right: OptionRight,
    strike: Price,
}

impl OptionSymbol {
    /// Maximum strike encodable in the eight-digit field.
    const MAX_STRIKE_MILLIS: i64 = 99_999_999;

    /// Build a symbol from component parts.
    pub fn new(
        underlying: impl Into<String>,
        expiration: NaiveDate,
        right: OptionRight,
        strike: Decimal,
    ) -> ApiResult<Self> {
        let underlying = underlying.into().trim().to_ascii_uppercase();
        if underlying.is_empty() {
            return Err(ApiError::Validation("underlying must not be empty".into()));
        }

        let strike = Price::from_decimal(strike)
            .filter(|p| (0..=Self::MAX_STRIKE_MILLIS).contains(&p.millis()))
            .ok_or_else(|| {
                ApiError::Validation(format!("strike {strike} is not encodable"))
            })?;

        Ok(Self {
            underlying,
            expiration,
            right,
            strike,
        })
    }

    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }

    pub fn right(&self) -> OptionRight {
        self.right
    }

    pub fn strike(&self) -> Decimal {
        self.strike.to_decimal()
    }
}

impl fmt::Display for OptionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{:08}",
            self.underlying,
            self.expiration.format("%y%m%d"),
            self.right.code(),
            self.strike.millis()
        )
    }
}

impl FromStr for OptionSymbol {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // 1+ underlying chars, 6-digit date, right, 8-digit strike
        if !s.is_ascii() || s.len() < 16 {
            return Err(ApiError::Validation(format!(
                "not an option symbol: {s:?}"
            )));
        }

        let split = s.len() - 15;
        let (underlying, rest) = s.split_at(split);
        let (date, rest) = rest.split_at(6);
        let (right, strike) = rest.split_at(1);

        let expiration = NaiveDate::parse_from_str(date, "%y%m%d")
            .map_err(|_| ApiError::Validation(format!("bad expiration in {s:?}")))?;
        let right = right.parse::<OptionRight>()?;
        let millis: i64 = strike
            .parse()
            .map_err(|_| ApiError::Validation(format!("bad strike in {s:?}")))?;

        Ok(Self {
            underlying: underlying.to_ascii_uppercase(),
            expiration,
            right,
            strike: Price::from_millis(millis),
        })
    }
}

/// Generate symbols for every expiration x strike x right combination.
pub fn option_symbols(
    underlying: &str,
    expirations: &[NaiveDate],
    strikes: &[Decimal],
    calls: bool,
    puts: bool,
) -> ApiResult<Vec<String>> {
    let mut rights = Vec::new();
    if calls {
        rights.push(OptionRight::Call);
    }
    if puts {
        rights.push(OptionRight::Put);
    }
    if rights.is_empty() {
        return Err(ApiError::Validation(
            "either calls or puts must be requested".into(),
        ));
    }

    let mut symbols = Vec::with_capacity(expirations.len() * rights.len() * strikes.len());
    for expiration in expirations {
        for right in &rights {
            for strike in strikes {
                symbols.push(OptionSymbol::new(underlying, *expiration, *right, *strike)?.to_string());
            }
        }
    }
    Ok(symbols)
}

/// Field an options search condition can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    StrikePrice,
    ExpirationDate,
    ExpirationMonth,
    ExpirationYear,
    PutCall,
    Unique,
}

impl QueryField {
    /// Wire name used in the search query string.
    pub fn wire(&self) -> &'static str {
        match self {
            QueryField::StrikePrice => "strikeprice",
            QueryField::ExpirationDate => "xdate",
            QueryField::ExpirationMonth => "xmonth",
            QueryField::ExpirationYear => "xyear",
            QueryField::PutCall => "put_call",
            QueryField::Unique => "unique",
        }
    }
}

impl FromStr for QueryField {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strikeprice" => Ok(QueryField::StrikePrice),
            "xdate" => Ok(QueryField::ExpirationDate),
            "xmonth" => Ok(QueryField::ExpirationMonth),
            "xyear" => Ok(QueryField::ExpirationYear),
            "put_call" => Ok(QueryField::PutCall),
            "unique" => Ok(QueryField::Unique),
            other => Err(ApiError::Validation(format!(
                "unknown query field {other:?}"
            ))),
        }
    }
}

/// Comparison operator in an options search condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOp {
    Lt,
    Gt,
    Gte,
    Lte,
    Eq,
}

impl QueryOp {
    /// Wire name used in the search query string.
    pub fn wire(&self) -> &'static str {
        match self {
            QueryOp::Lt => "lt",
            QueryOp::Gt => "gt",
            QueryOp::Gte => "gte",
            QueryOp::Lte => "lte",
            QueryOp::Eq => "eq",
        }
    }
}

impl FromStr for QueryOp {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "<" | "lt" => Ok(QueryOp::Lt),
            ">" | "gt" => Ok(QueryOp::Gt),
            ">=" | "gte" => Ok(QueryOp::Gte),
            "<=" | "lte" => Ok(QueryOp::Lte),
            "=" | "==" | "eq" => Ok(QueryOp::Eq),
            other => Err(ApiError::Validation(format!(
                "unknown query operator {other:?}"
            ))),
        }
    }
}

/// One `field op value` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: QueryField,
    pub op: QueryOp,
    pub value: String,
}

impl FromStr for Condition {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (field, op, value) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(op), Some(value), None) => (field, op, value),
            _ => {
                return Err(ApiError::Validation(format!(
                    "condition must be `field op value`, got {s:?}"
                )))
            }
        };

        let field = field.parse::<QueryField>()?;
        let value = match field {
            QueryField::ExpirationDate => normalize_date(value)?,
            _ => value.to_string(),
        };

        Ok(Condition {
            field,
            op: op.parse()?,
            value,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.field.wire(), self.op.wire(), self.value)
    }
}

/// A conjunction of search conditions, rendered as the API's
/// `field-op:value AND field-op:value` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionQuery {
    conditions: Vec<Condition>,
}

impl OptionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of `"field op value"` expressions.
    pub fn parse<'a, I>(exprs: I) -> ApiResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let conditions = exprs
            .into_iter()
            .map(str::parse)
            .collect::<ApiResult<Vec<Condition>>>()?;
        Ok(Self { conditions })
    }

    /// Append a condition.
    pub fn and(mut self, field: QueryField, op: QueryOp, value: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            field,
            op,
            value: value.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl fmt::Display for OptionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.conditions.iter().map(Condition::to_string).collect();
        write!(f, "{}", rendered.join(" AND "))
    }
}

fn normalize_date(value: &str) -> ApiResult<String> {
    for format in ["%Y%m%d", "%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date.format("%Y%m%d").to_string());
        }
    }
    Err(ApiError::Validation(format!("unparseable date {value:?}")))
}
