//! Program-id keyed registry of instruction decoders.

use std::collections::HashMap;

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

use crate::{programs::SerumInstructionDecoder, DecodedInstruction, InstructionDecoder};

/// Routes raw instruction data to the decoder registered for its program.
pub struct DecoderRegistry {
    decoders: HashMap<Pubkey, Box<dyn InstructionDecoder>>,
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderRegistry")
            .field("programs", &self.decoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for DecoderRegistry {
    /// A registry with the built-in Serum DEX decoder.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SerumInstructionDecoder));
        registry
    }
}

impl DecoderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Bind a decoder to its program id. A decoder registered later for the
    /// same program id replaces the earlier one.
    pub fn register(&mut self, decoder: Box<dyn InstructionDecoder>) {
        let program_id = decoder.program_id();
        tracing::trace!(
            "registering decoder `{}` for {}",
            decoder.program_name(),
            program_id
        );
        self.decoders.insert(program_id, decoder);
    }

    pub fn register_all(&mut self, decoders: Vec<Box<dyn InstructionDecoder>>) {
        for decoder in decoders {
            self.register(decoder);
        }
    }

    pub fn has_decoder(&self, program_id: &Pubkey) -> bool {
        self.decoders.contains_key(program_id)
    }

    pub fn get_decoder(&self, program_id: &Pubkey) -> Option<&dyn InstructionDecoder> {
        self.decoders.get(program_id).map(|d| d.as_ref())
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decode with the decoder registered for `program_id`, returning the
    /// decoded view together with the decoder that produced it.
    pub fn decode(
        &self,
        program_id: &Pubkey,
        data: &[u8],
        accounts: &[AccountMeta],
    ) -> Option<(DecodedInstruction, &dyn InstructionDecoder)> {
        let decoder = self.get_decoder(program_id)?;
        decoder
            .decode(data, accounts)
            .map(|decoded| (decoded, decoder))
    }
}
