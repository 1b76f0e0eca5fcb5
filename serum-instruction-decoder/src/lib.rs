//! # serum-instruction-decoder
//!
//! Instruction decoder and account-role resolver for the Serum DEX program.
//!
//! This crate provides:
//! - Typed decoding of the seven DEX instructions (`programs::serum`)
//! - Positional account-role resolution with signer/writable flags
//! - The `InstructionDecoder` trait and a program-id keyed `DecoderRegistry`
//! - Transaction decoding, formatting and file logging utilities
//!
//! | Export | Description |
//! |--------|-------------|
//! | [`Instruction`] | Decoded envelope: version, payload, account roles |
//! | [`SerumInstruction`] | One variant per DEX instruction |
//! | [`InstructionAccounts`] | Role structure per instruction |
//! | [`DecodeError`] | Decode and role-resolution failures |
//! | [`InstructionDecoder`] | Trait for decoding program instructions |
//! | [`DecoderRegistry`] | Registry for multiple program decoders |
//! | [`LoggingConfig`] | Transaction logging configuration |
//! | [`TransactionFormatter`] | Format transaction logs with ANSI colors |

pub use solana_instruction;
pub use solana_pubkey;
pub use solana_signature;

mod core;
pub mod error;

pub use self::core::{DecodedField, DecodedInstruction, InstructionDecoder};
pub use error::DecodeError;

pub mod programs;
pub use programs::serum::{
    decode_compiled_instruction, Instruction, InstructionAccounts, OrderType, SerumInstruction,
    SerumInstructionDecoder, Side, DEX_PROGRAM_ID,
};

// Off-chain only modules (uses tabled, file logging)
#[cfg(not(target_os = "solana"))]
pub mod config;
#[cfg(not(target_os = "solana"))]
pub mod formatter;
#[cfg(not(target_os = "solana"))]
pub mod registry;
#[cfg(all(not(target_os = "solana"), feature = "transaction"))]
pub mod transaction;
#[cfg(not(target_os = "solana"))]
pub mod types;

#[cfg(not(target_os = "solana"))]
pub use config::{LogVerbosity, LoggingConfig};
#[cfg(not(target_os = "solana"))]
pub use formatter::{Colors, TransactionFormatter};
#[cfg(not(target_os = "solana"))]
pub use registry::DecoderRegistry;
#[cfg(not(target_os = "solana"))]
pub use types::{InstructionLog, TransactionLog};
