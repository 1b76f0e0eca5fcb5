//! Registry-facing types shared by every program decoder.

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

/// A decoded instruction field rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    pub value: String,
}

impl DecodedField {
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Display view of one decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Instruction name as listed in the program's dispatch table (e.g. `new_order`).
    pub name: String,
    pub fields: Vec<DecodedField>,
    /// Role name per account position. Empty when the account list could not be resolved.
    pub account_names: Vec<String>,
}

impl DecodedInstruction {
    pub fn with_fields_and_accounts(
        name: impl Into<String>,
        fields: Vec<DecodedField>,
        account_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            account_names,
        }
    }
}

/// Implemented once per on-chain program.
pub trait InstructionDecoder: Send + Sync {
    /// Program ID this decoder handles.
    fn program_id(&self) -> Pubkey;

    /// Human-readable program name.
    fn program_name(&self) -> &'static str;

    /// Decode instruction data into a display representation.
    /// Returns None if the data does not decode.
    fn decode(&self, data: &[u8], accounts: &[AccountMeta]) -> Option<DecodedInstruction>;
}
