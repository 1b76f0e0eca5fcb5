//! Serum DEX program decoder.
//!
//! Serum instructions carry a 1-byte format version followed by a 4-byte
//! (u32 little-endian) discriminator. Each discriminator selects one
//! fixed-layout payload, see [`instruction`]. Account roles are positional,
//! see [`accounts`].

pub mod accounts;
pub mod instruction;
pub mod types;

pub use accounts::{
    CancelOrderAccounts, CancelOrderByClientIdAccounts, ConsumeEventsAccounts,
    InitializeMarketAccounts, InstructionAccounts, MatchOrderAccounts, NewOrderAccounts,
    SettleFundsAccounts,
};
pub use instruction::{
    instruction_names, CancelOrder, CancelOrderByClientId, ConsumeEvents, InitializeMarket,
    Instruction, MatchOrder, NewOrder, Payload, SerumInstruction, SettleFunds,
    INSTRUCTION_HEADER_LEN,
};
use solana_instruction::AccountMeta;
use solana_message::compiled_instruction::CompiledInstruction;
use solana_pubkey::Pubkey;
pub use types::{OrderType, OrderTypeKind, Side, SideKind};

use crate::{DecodeError, DecodedInstruction, InstructionDecoder};

pub const DEX_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("EUqojwWA2rd19FZrzeBncJsm38Jm1hEhE3zsmX3bRc2o");

pub const PROGRAM_NAME: &str = "Serum DEX";

/// Decode a compiled instruction and resolve its account roles against the
/// transaction's account keys.
///
/// Fails if either the payload or the account roles fail to decode. Use
/// [`Instruction::decode`] and [`Instruction::attach_accounts`] separately to
/// keep the payload when only role resolution fails.
pub fn decode_compiled_instruction(
    account_keys: &[Pubkey],
    compiled: &CompiledInstruction,
) -> Result<Instruction, DecodeError> {
    let mut instruction = Instruction::decode(&compiled.data)?;
    if instruction.supports_accounts() {
        instruction.attach_accounts(account_keys, &compiled.accounts)?;
    }
    Ok(instruction)
}

/// [`InstructionDecoder`] for the Serum DEX program.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerumInstructionDecoder;

impl InstructionDecoder for SerumInstructionDecoder {
    fn program_id(&self) -> Pubkey {
        DEX_PROGRAM_ID
    }

    fn program_name(&self) -> &'static str {
        PROGRAM_NAME
    }

    fn decode(&self, data: &[u8], accounts: &[AccountMeta]) -> Option<DecodedInstruction> {
        let instruction = match Instruction::decode(data) {
            Ok(instruction) => instruction,
            Err(err) => {
                tracing::debug!("{PROGRAM_NAME}: failed to decode instruction data: {err}");
                return None;
            }
        };

        let keys: Vec<Pubkey> = accounts.iter().map(|account| account.pubkey).collect();
        let account_names = match instruction.payload.resolve_account_keys(&keys) {
            Ok(roles) => roles.role_names(),
            Err(err) => {
                tracing::debug!(
                    "{PROGRAM_NAME}: {} decoded without account roles: {err}",
                    instruction.name()
                );
                Vec::new()
            }
        };

        tracing::trace!(
            "{PROGRAM_NAME}: decoded {} (version {})",
            instruction.name(),
            instruction.version
        );
        Some(DecodedInstruction::with_fields_and_accounts(
            instruction.name(),
            instruction.payload.fields(),
            account_names,
        ))
    }
}
