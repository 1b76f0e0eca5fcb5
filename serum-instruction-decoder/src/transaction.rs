//! Transaction-level decoding, snapshots and file logging.
//!
//! Provides:
//! - [`decode_transaction`] -- decode every top-level instruction into a [`TransactionLog`]
//! - [`decode_serum_instructions`] -- typed Serum DEX instructions with resolved account roles
//! - Snapshot types for JSON output and insta testing
//! - [`TransactionLogger`] -- decode, format and log in one call
//! - File logging to `target/serum_instruction_decoder.log` (ANSI-stripped)

use std::{
    fs::{self, OpenOptions},
    io::Write,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Once,
    },
};

use serde::Serialize;
use solana_instruction::AccountMeta;
use solana_message::VersionedMessage;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

use crate::{
    config::LoggingConfig,
    formatter::TransactionFormatter,
    programs::serum::{decode_compiled_instruction, Instruction, DEX_PROGRAM_ID},
    types::{get_program_name, InstructionLog, TransactionLog},
    DecodeError,
};

// ---------------------------------------------------------------------------
// Transaction decoding
// ---------------------------------------------------------------------------

/// Decode a transaction's top-level instructions through the config's registry.
///
/// Account keys are taken from the message's static keys; accounts loaded
/// from address lookup tables are not resolved.
pub fn decode_transaction(tx: &VersionedTransaction, config: &LoggingConfig) -> TransactionLog {
    let signature = tx.signatures.first().copied().unwrap_or_default();
    decode_message(&tx.message, signature, config)
}

/// Decode a message's top-level instructions.
pub fn decode_message(
    message: &VersionedMessage,
    signature: Signature,
    config: &LoggingConfig,
) -> TransactionLog {
    let account_keys = message.static_account_keys();
    let registry = config.decoder_registry();

    let mut log = TransactionLog::new(signature);
    for (ix_index, compiled_ix) in message.instructions().iter().enumerate() {
        let program_id = account_keys
            .get(compiled_ix.program_id_index as usize)
            .copied()
            .unwrap_or_default();
        let program_name = get_program_name(&program_id, registry);

        let mut ix_log = InstructionLog::new(ix_index, program_id, program_name);
        ix_log.data = compiled_ix.data.clone();
        ix_log.accounts = resolve_accounts(&compiled_ix.accounts, account_keys, message);
        ix_log.decode(config);

        log.instructions.push(ix_log);
    }
    log
}

/// Decode every Serum DEX instruction of a transaction with its account roles.
///
/// Returns `(instruction index, result)` pairs; instructions for other
/// programs are skipped.
pub fn decode_serum_instructions(
    tx: &VersionedTransaction,
) -> Vec<(usize, Result<Instruction, DecodeError>)> {
    let account_keys = tx.message.static_account_keys();
    tx.message
        .instructions()
        .iter()
        .enumerate()
        .filter(|(_, ix)| {
            account_keys.get(ix.program_id_index as usize) == Some(&DEX_PROGRAM_ID)
        })
        .map(|(index, ix)| {
            let result = decode_compiled_instruction(account_keys, ix);
            if let Err(err) = &result {
                tracing::debug!("serum instruction {index}: {err}");
            }
            (index, result)
        })
        .collect()
}

/// Format a decoded transaction log into a human-readable string.
pub fn format_transaction(
    log: &TransactionLog,
    config: &LoggingConfig,
    tx_number: usize,
) -> String {
    let formatter = TransactionFormatter::new(config);
    formatter.format(log, tx_number)
}

// ---------------------------------------------------------------------------
// Snapshot types (JSON-serializable)
// ---------------------------------------------------------------------------

/// JSON-serializable snapshot of an entire transaction.
#[derive(Debug, Serialize)]
pub struct TransactionSnapshot {
    pub signature: String,
    pub instructions: Vec<InstructionSnapshot>,
}

/// JSON-serializable snapshot of a single instruction.
#[derive(Debug, Serialize)]
pub struct InstructionSnapshot {
    pub program_id: String,
    pub program_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_name: Option<String>,
    /// Base58-encoded instruction data.
    pub data: String,
    pub accounts: Vec<AccountSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_fields: Option<Vec<FieldSnapshot>>,
}

/// JSON-serializable snapshot of an account reference within an instruction.
#[derive(Debug, Serialize)]
pub struct AccountSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// JSON-serializable snapshot of a decoded instruction field.
#[derive(Debug, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: String,
}

/// Decode a transaction straight into a snapshot.
pub fn decode_transaction_snapshot(
    tx: &VersionedTransaction,
    config: &LoggingConfig,
) -> TransactionSnapshot {
    let log = decode_transaction(tx, config);
    transaction_log_to_snapshot(&log)
}

/// Convert a [`TransactionLog`] into a [`TransactionSnapshot`].
pub fn transaction_log_to_snapshot(log: &TransactionLog) -> TransactionSnapshot {
    TransactionSnapshot {
        signature: log.signature.to_string(),
        instructions: log.instructions.iter().map(instruction_to_snapshot).collect(),
    }
}

fn instruction_to_snapshot(ix: &InstructionLog) -> InstructionSnapshot {
    let decoded_fields = ix.decoded_instruction.as_ref().map(|decoded| {
        decoded
            .fields
            .iter()
            .map(|f| FieldSnapshot {
                name: f.name.clone(),
                value: f.value.clone(),
            })
            .collect()
    });

    let accounts = ix
        .accounts
        .iter()
        .enumerate()
        .map(|(position, a)| AccountSnapshot {
            role: ix.account_name(position).map(str::to_string),
            pubkey: a.pubkey.to_string(),
            is_signer: a.is_signer,
            is_writable: a.is_writable,
        })
        .collect();

    InstructionSnapshot {
        program_id: ix.program_id.to_string(),
        program_name: ix.program_name.clone(),
        instruction_name: ix.instruction_name.clone(),
        data: bs58::encode(&ix.data).into_string(),
        accounts,
        decoded_fields,
    }
}

// ---------------------------------------------------------------------------
// File logging
// ---------------------------------------------------------------------------

static LOG_INIT: Once = Once::new();
pub const LOG_PATH: &str = "target/serum_instruction_decoder.log";

/// Strip ANSI escape codes from text.
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until the terminating letter [A-Za-z]
            if chars.peek() == Some(&'[') {
                chars.next();
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Append ANSI-stripped content to [`LOG_PATH`].
///
/// The first call per process truncates the file; later calls append.
pub fn write_to_log_file(content: &str) {
    LOG_INIT.call_once(|| {
        let _ = fs::create_dir_all("target");
        if let Err(err) = fs::File::create(LOG_PATH) {
            tracing::warn!("cannot create {LOG_PATH}: {err}");
        }
    });

    let stripped = strip_ansi_codes(content);
    match OpenOptions::new().create(true).append(true).open(LOG_PATH) {
        Ok(mut f) => {
            if let Err(err) = f.write_all(stripped.as_bytes()) {
                tracing::warn!("cannot write to {LOG_PATH}: {err}");
            }
        }
        Err(err) => tracing::warn!("cannot append to {LOG_PATH}: {err}"),
    }
}

// ---------------------------------------------------------------------------
// TransactionLogger
// ---------------------------------------------------------------------------

/// Decodes, formats and logs transactions, numbering them in call order.
///
/// # Example
/// ```ignore
/// let logger = TransactionLogger::new(LoggingConfig::from_env());
/// let log = logger.log_transaction(&tx);
/// ```
pub struct TransactionLogger {
    config: LoggingConfig,
    counter: AtomicUsize,
}

impl TransactionLogger {
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Decode `tx`, write it to the log file and, when `log_events` is set,
    /// print it to stderr. Returns the decoded log.
    pub fn log_transaction(&self, tx: &VersionedTransaction) -> TransactionLog {
        let log = decode_transaction(tx, &self.config);
        if !self.config.enabled {
            return log;
        }

        let tx_number = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let formatted = format_transaction(&log, &self.config, tx_number);
        write_to_log_file(&formatted);
        if self.config.log_events {
            eprint!("{}", formatted);
        }
        log
    }

    /// Number of transactions logged so far.
    pub fn logged(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Resolve compiled instruction account indices to `AccountMeta`.
fn resolve_accounts(
    account_indices: &[u8],
    account_keys: &[Pubkey],
    message: &VersionedMessage,
) -> Vec<AccountMeta> {
    account_indices
        .iter()
        .map(|&idx| {
            let idx = idx as usize;
            let pubkey = account_keys.get(idx).copied().unwrap_or_default();
            let is_signer = message.is_signer(idx);
            let is_writable = message.is_maybe_writable(idx, None);
            if is_writable {
                AccountMeta::new(pubkey, is_signer)
            } else {
                AccountMeta::new_readonly(pubkey, is_signer)
            }
        })
        .collect()
}
