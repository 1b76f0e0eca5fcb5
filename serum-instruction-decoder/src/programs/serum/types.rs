//! Enumerated order fields.
//!
//! Both enums travel on the wire as a little-endian `u32`. The raw value is
//! kept as-is so that out-of-range values survive a decode/encode round trip;
//! [`Side::kind`] and [`OrderType::kind`] give the semantic label.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct Side(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideKind {
    Bid,
    Ask,
    Unknown,
}

impl Side {
    pub const BID: Side = Side(0);
    pub const ASK: Side = Side(1);

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn kind(self) -> SideKind {
        match self.0 {
            0 => SideKind::Bid,
            1 => SideKind::Ask,
            _ => SideKind::Unknown,
        }
    }
}

impl SideKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SideKind::Bid => "BID",
            SideKind::Ask => "ASK",
            SideKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct OrderType(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderTypeKind {
    Limit,
    ImmediateOrCancel,
    PostOnly,
    Unknown,
}

impl OrderType {
    pub const LIMIT: OrderType = OrderType(0);
    pub const IMMEDIATE_OR_CANCEL: OrderType = OrderType(1);
    pub const POST_ONLY: OrderType = OrderType(2);

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn kind(self) -> OrderTypeKind {
        match self.0 {
            0 => OrderTypeKind::Limit,
            1 => OrderTypeKind::ImmediateOrCancel,
            2 => OrderTypeKind::PostOnly,
            _ => OrderTypeKind::Unknown,
        }
    }
}

impl OrderTypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderTypeKind::Limit => "LIMIT",
            OrderTypeKind::ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
            OrderTypeKind::PostOnly => "POST_ONLY",
            OrderTypeKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}
