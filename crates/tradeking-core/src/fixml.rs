//! FIXML order document construction.
//!
//! TradeKing accepts orders as FIXML 5.0 SP2 documents POSTed to the
//! account order endpoints. Only document construction lives here; the
//! client dispatches the finished document.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tradeking_core::fixml::{OrderBuilder, TimeInForce};
//!
//! let fixml = OrderBuilder::buy("12345678", "F", dec!(1))
//!     .time_in_force(TimeInForce::Day)
//!     .build();
//! assert!(fixml.starts_with("<FIXML"));
//! ```

use rust_decimal::Decimal;
use std::fmt;

const XMLNS: &str = "http://www.fixprotocol.org/FIXML-5-0-SP2";

/// Order side wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
    SellShort,
}

impl Side {
    pub fn code(&self) -> &'static str {
        match self {
            Side::Buy => "1",
            Side::Sell => "2",
            Side::SellShort => "5",
        }
    }
}

/// Security type wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityType {
    Stock,
    Option,
}

impl SecurityType {
    pub fn code(&self) -> &'static str {
        match self {
            SecurityType::Stock => "CS",
            SecurityType::Option => "OPT",
        }
    }
}

/// Time-in-force wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    Day,
    GoodTilCanceled,
    MarketOnClose,
}

impl TimeInForce {
    pub fn code(&self) -> &'static str {
        match self {
            TimeInForce::Day => "0",
            TimeInForce::GoodTilCanceled => "1",
            TimeInForce::MarketOnClose => "2",
        }
    }
}

/// Order type wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
    TrailingStop,
}

impl OrderType {
    pub fn code(&self) -> &'static str {
        match self {
            OrderType::Market => "1",
            OrderType::Limit => "2",
            OrderType::Stop => "3",
            OrderType::StopLimit => "4",
            OrderType::TrailingStop => "P",
        }
    }
}

/// Trailing-stop offset interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetType {
    Price,
    Basis,
}

impl OffsetType {
    pub fn code(&self) -> &'static str {
        match self {
            OffsetType::Price => "0",
            OffsetType::Basis => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PegInstruction {
    offset: Decimal,
    offset_type: OffsetType,
    peg_price_type: String,
}

/// Builder for a FIXML order document.
///
/// Defaults match the API's most permissive submission: good-til-canceled
/// market order on a stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBuilder {
    account: String,
    side: Side,
    security_type: SecurityType,
    symbol: String,
    quantity: Decimal,
    time_in_force: TimeInForce,
    order_type: OrderType,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
    peg: Option<PegInstruction>,
}

impl OrderBuilder {
    pub fn new(
        account: impl Into<String>,
        side: Side,
        security_type: SecurityType,
        symbol: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            account: account.into(),
            side,
            security_type,
            symbol: symbol.into(),
            quantity,
            time_in_force: TimeInForce::GoodTilCanceled,
            order_type: OrderType::Market,
            limit_price: None,
            stop_price: None,
            peg: None,
        }
    }

    /// A stock buy.
    pub fn buy(account: impl Into<String>, symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(account, Side::Buy, SecurityType::Stock, symbol, quantity)
    }

    /// A stock sell.
    pub fn sell(account: impl Into<String>, symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(account, Side::Sell, SecurityType::Stock, symbol, quantity)
    }

    /// A short sale.
    pub fn sell_short(
        account: impl Into<String>,
        symbol: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self::new(account, Side::SellShort, SecurityType::Stock, symbol, quantity)
    }

    pub fn security_type(mut self, security_type: SecurityType) -> Self {
        self.security_type = security_type;
        self
    }

    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set a limit price; switches the order type to limit.
    pub fn limit(mut self, price: Decimal) -> Self {
        self.order_type = OrderType::Limit;
        self.limit_price = Some(price);
        self
    }

    /// Set a stop price; switches the order type to stop.
    pub fn stop(mut self, price: Decimal) -> Self {
        self.order_type = OrderType::Stop;
        self.stop_price = Some(price);
        self
    }

    /// Make this a trailing-stop order pegged at `offset` from the market.
    pub fn trailing_stop(mut self, offset: Decimal, offset_type: OffsetType) -> Self {
        self.order_type = OrderType::TrailingStop;
        self.peg = Some(PegInstruction {
            offset,
            offset_type,
            peg_price_type: "1".to_string(),
        });
        self
    }

    /// Render the FIXML document.
    pub fn build(&self) -> String {
        let mut order_attrs = format!(
            r#"TmInForce="{}" Typ="{}" Side="{}""#,
            self.time_in_force.code(),
            self.order_type.code(),
            self.side.code()
        );
        if let Some(px) = self.limit_price {
            order_attrs.push_str(&format!(r#" Px="{px}""#));
        }
        if let Some(px) = self.stop_price {
            order_attrs.push_str(&format!(r#" StopPx="{px}""#));
        }
        if self.peg.is_some() {
            order_attrs.push_str(r#" ExecInst="a""#);
        }
        order_attrs.push_str(&format!(r#" Acct="{}""#, escape_attr(&self.account)));

        let mut children = String::new();
        if let Some(peg) = &self.peg {
            children.push_str(&format!(
                r#"<PegInstr OfstTyp="{}" PegPxTyp="{}" OfstVal="{}"/>"#,
                peg.offset_type.code(),
                peg.peg_price_type,
                peg.offset
            ));
        }
        children.push_str(&format!(
            r#"<Instrmt SecTyp="{}" Sym="{}"/>"#,
            self.security_type.code(),
            escape_attr(&self.symbol)
        ));
        children.push_str(&format!(r#"<OrdQty Qty="{}"/>"#, self.quantity));

        format!(r#"<FIXML xmlns="{XMLNS}"><Order {order_attrs}>{children}</Order></FIXML>"#)
    }
}

impl fmt::Display for OrderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_day_market_stock_buy_reference_document() {
        let fixml = OrderBuilder::buy("12345678", "F", dec!(1))
            .time_in_force(TimeInForce::Day)
            .build();
        assert_eq!(
            fixml,
            r#"<FIXML xmlns="http://www.fixprotocol.org/FIXML-5-0-SP2"><Order TmInForce="0" Typ="1" Side="1" Acct="12345678"><Instrmt SecTyp="CS" Sym="F"/><OrdQty Qty="1"/></Order></FIXML>"#
        );
    }

    #[test]
    fn test_limit_sets_type_and_price() {
        let fixml = OrderBuilder::sell("12345678", "IBM", dec!(10))
            .limit(dec!(150.25))
            .build();
        assert!(fixml.contains(r#"Typ="2""#));
        assert!(fixml.contains(r#"Px="150.25""#));
        assert!(fixml.contains(r#"Side="2""#));
    }

    #[test]
    fn test_trailing_stop_renders_peg_instruction() {
        let fixml = OrderBuilder::sell("12345678", "F", dec!(5))
            .trailing_stop(dec!(1.5), OffsetType::Price)
            .build();
        assert!(fixml.contains(r#"Typ="P""#));
        assert!(fixml.contains(r#"ExecInst="a""#));
        assert!(fixml.contains(r#"<PegInstr OfstTyp="0" PegPxTyp="1" OfstVal="1.5"/>"#));
        // peg precedes the instrument, matching the documented layout
        let peg = fixml.find("<PegInstr").unwrap();
        let instrmt = fixml.find("<Instrmt").unwrap();
        assert!(peg < instrmt);
    }

    #[test]
    fn test_option_order_uses_occ_symbol() {
        let fixml = OrderBuilder::buy("12345678", "IBM140118C00150000", dec!(1))
            .security_type(SecurityType::Option)
            .build();
        assert!(fixml.contains(r#"SecTyp="OPT""#));
        assert!(fixml.contains(r#"Sym="IBM140118C00150000""#));
    }

    #[test]
    fn test_short_side_code() {
        let fixml = OrderBuilder::sell_short("12345678", "F", dec!(1)).build();
        assert!(fixml.contains(r#"Side="5""#));
    }
}
