//! Transaction and instruction log types.
//!
//! These carry decoded output through the formatter and snapshot layers and
//! do not depend on how the transaction was obtained.

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;
use solana_signature::Signature;

use crate::{programs::serum::DEX_PROGRAM_ID, DecodedInstruction, DecoderRegistry, LoggingConfig};

/// A decoded transaction.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    pub signature: Signature,
    pub instructions: Vec<InstructionLog>,
}

impl TransactionLog {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            instructions: Vec::new(),
        }
    }

    /// Instructions addressed to `program_id`.
    pub fn instructions_for<'a>(
        &'a self,
        program_id: &'a Pubkey,
    ) -> impl Iterator<Item = &'a InstructionLog> + 'a {
        self.instructions
            .iter()
            .filter(move |ix| ix.program_id == *program_id)
    }
}

/// One top-level instruction of a transaction.
#[derive(Debug, Clone)]
pub struct InstructionLog {
    pub index: usize,
    pub program_id: Pubkey,
    pub program_name: String,
    pub instruction_name: Option<String>,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
    /// Decoded instruction from the registry (if a decoder matched).
    pub decoded_instruction: Option<DecodedInstruction>,
}

impl InstructionLog {
    pub fn new(index: usize, program_id: Pubkey, program_name: String) -> Self {
        Self {
            index,
            program_id,
            program_name,
            instruction_name: None,
            accounts: Vec::new(),
            data: Vec::new(),
            decoded_instruction: None,
        }
    }

    /// Decode this instruction with the config's decoder registry.
    pub fn decode(&mut self, config: &LoggingConfig) {
        if !config.decode_instructions {
            return;
        }

        if let Some(registry) = config.decoder_registry() {
            if let Some((decoded, decoder)) =
                registry.decode(&self.program_id, &self.data, &self.accounts)
            {
                self.instruction_name = Some(decoded.name.clone());
                self.decoded_instruction = Some(decoded);
                self.program_name = decoder.program_name().to_string();
            }
        }
    }

    /// Role name of the account at `position`, if the decoder resolved one.
    pub fn account_name(&self, position: usize) -> Option<&str> {
        self.decoded_instruction
            .as_ref()
            .and_then(|decoded| decoded.account_names.get(position))
            .map(String::as_str)
    }
}

/// Human-readable program name.
///
/// Consults the decoder registry first, then falls back to well-known program ids.
pub fn get_program_name(program_id: &Pubkey, registry: Option<&DecoderRegistry>) -> String {
    if let Some(decoder) = registry.and_then(|reg| reg.get_decoder(program_id)) {
        return decoder.program_name().to_string();
    }

    if *program_id == DEX_PROGRAM_ID {
        return crate::programs::serum::PROGRAM_NAME.to_string();
    }

    match program_id.to_string().as_str() {
        "11111111111111111111111111111111" => "System Program".to_string(),
        "ComputeBudget111111111111111111111111111111" => "Compute Budget".to_string(),
        "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA" => "SPL Token".to_string(),
        "SysvarRent111111111111111111111111111111111" => "Rent Sysvar".to_string(),
        _ => format!("Unknown Program ({})", program_id),
    }
}
