//! Serum DEX instruction envelope and payload layouts.
//!
//! Wire format:
//!
//! ```text
//! [version: u8][discriminator: u32 LE][payload: variant-specific fixed layout]
//! ```
//!
//! Payload fields are little-endian and are read in declaration order, which
//! is exactly the borsh layout of the structs below.

use borsh::{io, BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

use super::{
    accounts::InstructionAccounts,
    types::{OrderType, OrderTypeKind, Side, SideKind},
};
use crate::{DecodeError, DecodedField};

/// Version byte plus 4-byte discriminator.
pub const INSTRUCTION_HEADER_LEN: usize = 5;

/// A fixed-layout instruction payload.
pub trait Payload: BorshDeserialize + BorshSerialize {
    const NAME: &'static str;
    const DISCRIMINATOR: u32;
    /// Encoded payload size in bytes.
    const LEN: usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitializeMarket {
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub fee_rate_bps: u16,
    pub vault_signer_nonce: u64,
    pub quote_dust_threshold: u64,
}

impl Payload for InitializeMarket {
    const NAME: &'static str = "initialize_market";
    const DISCRIMINATOR: u32 = 0;
    const LEN: usize = 34;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NewOrder {
    pub side: Side,
    pub limit_price: u64,
    pub max_quantity: u64,
    pub order_type: OrderType,
    pub client_id: u64,
}

impl Payload for NewOrder {
    const NAME: &'static str = "new_order";
    const DISCRIMINATOR: u32 = 1;
    const LEN: usize = 32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MatchOrder {
    pub limit: u16,
}

impl Payload for MatchOrder {
    const NAME: &'static str = "match_orders";
    const DISCRIMINATOR: u32 = 2;
    const LEN: usize = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ConsumeEvents {
    pub limit: u16,
}

impl Payload for ConsumeEvents {
    const NAME: &'static str = "consume_events";
    const DISCRIMINATOR: u32 = 3;
    const LEN: usize = 2;
}

/// Cancels a resting order by its order id.
///
/// `side` is kept as the raw wire integer. Unlike [`NewOrder::side`] it is
/// not mapped through [`Side`], so decoded output for existing data stays
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CancelOrder {
    pub side: u32,
    pub order_id: u128,
    /// Open orders account, see [`CancelOrder::open_orders_pubkey`].
    pub open_orders: [u8; 32],
    pub open_orders_slot: u8,
}

impl CancelOrder {
    pub fn open_orders_pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.open_orders)
    }
}

impl Payload for CancelOrder {
    const NAME: &'static str = "cancel_order";
    const DISCRIMINATOR: u32 = 4;
    const LEN: usize = 53;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SettleFunds;

impl Payload for SettleFunds {
    const NAME: &'static str = "settle_funds";
    const DISCRIMINATOR: u32 = 5;
    const LEN: usize = 0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CancelOrderByClientId {
    pub client_id: u64,
}

impl Payload for CancelOrderByClientId {
    const NAME: &'static str = "cancel_order_by_client_id";
    const DISCRIMINATOR: u32 = 6;
    const LEN: usize = 8;
}

/// One decoded Serum DEX instruction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerumInstruction {
    InitializeMarket(InitializeMarket),
    NewOrder(NewOrder),
    MatchOrder(MatchOrder),
    ConsumeEvents(ConsumeEvents),
    CancelOrder(CancelOrder),
    SettleFunds(SettleFunds),
    CancelOrderByClientId(CancelOrderByClientId),
}

type PayloadDecoder = fn(&mut &[u8]) -> Result<SerumInstruction, DecodeError>;

/// Dispatch table; the position of an entry is its discriminator.
const VARIANTS: [(&str, PayloadDecoder); 7] = [
    (InitializeMarket::NAME, |data| {
        decode_payload(data).map(SerumInstruction::InitializeMarket)
    }),
    (NewOrder::NAME, |data| {
        decode_payload(data).map(SerumInstruction::NewOrder)
    }),
    (MatchOrder::NAME, |data| {
        decode_payload(data).map(SerumInstruction::MatchOrder)
    }),
    (ConsumeEvents::NAME, |data| {
        decode_payload(data).map(SerumInstruction::ConsumeEvents)
    }),
    (CancelOrder::NAME, |data| {
        decode_payload(data).map(SerumInstruction::CancelOrder)
    }),
    (SettleFunds::NAME, |data| {
        decode_payload(data).map(SerumInstruction::SettleFunds)
    }),
    (CancelOrderByClientId::NAME, |data| {
        decode_payload(data).map(SerumInstruction::CancelOrderByClientId)
    }),
];

/// Names of all instructions, indexed by discriminator.
pub fn instruction_names() -> impl Iterator<Item = &'static str> {
    VARIANTS.iter().map(|(name, _)| *name)
}

fn read<T: BorshDeserialize>(
    data: &mut &[u8],
    context: &'static str,
    needed: usize,
) -> Result<T, DecodeError> {
    if data.len() < needed {
        return Err(DecodeError::TruncatedInput {
            context,
            needed,
            remaining: data.len(),
        });
    }
    T::deserialize(data).map_err(|err| DecodeError::MalformedField {
        field: context,
        reason: err.to_string(),
    })
}

fn decode_payload<P: Payload>(data: &mut &[u8]) -> Result<P, DecodeError> {
    read(data, P::NAME, P::LEN)
}

impl SerumInstruction {
    /// Read the discriminator and the matching payload from `data`, advancing the cursor.
    pub fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let discriminator: u32 = read(data, "discriminator", 4)?;
        let (_, decode) = usize::try_from(discriminator)
            .ok()
            .and_then(|index| VARIANTS.get(index))
            .ok_or(DecodeError::UnknownVariant(discriminator))?;
        decode(data)
    }

    pub fn discriminator(&self) -> u32 {
        match self {
            SerumInstruction::InitializeMarket(_) => InitializeMarket::DISCRIMINATOR,
            SerumInstruction::NewOrder(_) => NewOrder::DISCRIMINATOR,
            SerumInstruction::MatchOrder(_) => MatchOrder::DISCRIMINATOR,
            SerumInstruction::ConsumeEvents(_) => ConsumeEvents::DISCRIMINATOR,
            SerumInstruction::CancelOrder(_) => CancelOrder::DISCRIMINATOR,
            SerumInstruction::SettleFunds(_) => SettleFunds::DISCRIMINATOR,
            SerumInstruction::CancelOrderByClientId(_) => CancelOrderByClientId::DISCRIMINATOR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SerumInstruction::InitializeMarket(_) => InitializeMarket::NAME,
            SerumInstruction::NewOrder(_) => NewOrder::NAME,
            SerumInstruction::MatchOrder(_) => MatchOrder::NAME,
            SerumInstruction::ConsumeEvents(_) => ConsumeEvents::NAME,
            SerumInstruction::CancelOrder(_) => CancelOrder::NAME,
            SerumInstruction::SettleFunds(_) => SettleFunds::NAME,
            SerumInstruction::CancelOrderByClientId(_) => CancelOrderByClientId::NAME,
        }
    }

    /// Whether this variant has a positional account layout that
    /// [`SerumInstruction::resolve_accounts`] can map onto roles.
    pub fn supports_accounts(&self) -> bool {
        match self {
            SerumInstruction::InitializeMarket(_)
            | SerumInstruction::NewOrder(_)
            | SerumInstruction::MatchOrder(_)
            | SerumInstruction::ConsumeEvents(_)
            | SerumInstruction::CancelOrder(_)
            | SerumInstruction::SettleFunds(_)
            | SerumInstruction::CancelOrderByClientId(_) => true,
        }
    }

    /// Payload fields rendered for display, in wire order.
    pub fn fields(&self) -> Vec<DecodedField> {
        match self {
            SerumInstruction::InitializeMarket(ix) => vec![
                DecodedField::new("base_lot_size", ix.base_lot_size),
                DecodedField::new("quote_lot_size", ix.quote_lot_size),
                DecodedField::new("fee_rate_bps", ix.fee_rate_bps),
                DecodedField::new("vault_signer_nonce", ix.vault_signer_nonce),
                DecodedField::new("quote_dust_threshold", ix.quote_dust_threshold),
            ],
            SerumInstruction::NewOrder(ix) => vec![
                DecodedField::new("side", side_label(ix.side)),
                DecodedField::new("limit_price", ix.limit_price),
                DecodedField::new("max_quantity", ix.max_quantity),
                DecodedField::new("order_type", order_type_label(ix.order_type)),
                DecodedField::new("client_id", ix.client_id),
            ],
            SerumInstruction::MatchOrder(ix) => vec![DecodedField::new("limit", ix.limit)],
            SerumInstruction::ConsumeEvents(ix) => vec![DecodedField::new("limit", ix.limit)],
            SerumInstruction::CancelOrder(ix) => vec![
                DecodedField::new("side", ix.side),
                DecodedField::new("order_id", ix.order_id),
                DecodedField::new("open_orders", ix.open_orders_pubkey()),
                DecodedField::new("open_orders_slot", ix.open_orders_slot),
            ],
            SerumInstruction::SettleFunds(_) => Vec::new(),
            SerumInstruction::CancelOrderByClientId(ix) => {
                vec![DecodedField::new("client_id", ix.client_id)]
            }
        }
    }
}

fn side_label(side: Side) -> String {
    match side.kind() {
        SideKind::Unknown => format!("UNKNOWN ({})", side.raw()),
        kind => kind.as_str().to_string(),
    }
}

fn order_type_label(order_type: OrderType) -> String {
    match order_type.kind() {
        OrderTypeKind::Unknown => format!("UNKNOWN ({})", order_type.raw()),
        kind => kind.as_str().to_string(),
    }
}

impl BorshSerialize for SerumInstruction {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.discriminator().serialize(writer)?;
        match self {
            SerumInstruction::InitializeMarket(ix) => ix.serialize(writer),
            SerumInstruction::NewOrder(ix) => ix.serialize(writer),
            SerumInstruction::MatchOrder(ix) => ix.serialize(writer),
            SerumInstruction::ConsumeEvents(ix) => ix.serialize(writer),
            SerumInstruction::CancelOrder(ix) => ix.serialize(writer),
            SerumInstruction::SettleFunds(ix) => ix.serialize(writer),
            SerumInstruction::CancelOrderByClientId(ix) => ix.serialize(writer),
        }
    }
}

/// A decoded instruction: format version, payload and, once resolved, its account roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub version: u8,
    pub payload: SerumInstruction,
    pub accounts: Option<InstructionAccounts>,
}

impl Instruction {
    pub fn new(version: u8, payload: SerumInstruction) -> Self {
        Self {
            version,
            payload,
            accounts: None,
        }
    }

    /// Decode instruction data. Account roles are left unresolved.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = data;
        if cursor.len() < INSTRUCTION_HEADER_LEN {
            return Err(DecodeError::TruncatedInput {
                context: "instruction header",
                needed: INSTRUCTION_HEADER_LEN,
                remaining: cursor.len(),
            });
        }
        let version: u8 = read(&mut cursor, "version", 1)?;
        let payload = SerumInstruction::decode(&mut cursor)?;
        Ok(Self::new(version, payload))
    }

    pub fn discriminator(&self) -> u32 {
        self.payload.discriminator()
    }

    pub fn name(&self) -> &'static str {
        self.payload.name()
    }

    pub fn supports_accounts(&self) -> bool {
        self.payload.supports_accounts()
    }

    /// Resolve account roles and attach them. On error the instruction is left unchanged.
    pub fn attach_accounts(
        &mut self,
        account_keys: &[Pubkey],
        account_indices: &[u8],
    ) -> Result<(), DecodeError> {
        let accounts = self.payload.resolve_accounts(account_keys, account_indices)?;
        self.accounts = Some(accounts);
        Ok(())
    }
}

/// Serializes the wire bytes. Resolved accounts are not part of the encoding.
impl BorshSerialize for Instruction {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.version.serialize(writer)?;
        self.payload.serialize(writer)
    }
}
