//! Program decoders.
//!
//! Each submodule decodes the instructions of one on-chain program and
//! exposes an [`InstructionDecoder`](crate::InstructionDecoder) for the
//! [`DecoderRegistry`](crate::DecoderRegistry).

pub mod serum;

pub use serum::SerumInstructionDecoder;
