//! Human-readable rendering of decoded transactions.

use std::fmt::Write;

use tabled::{settings::Style, Table, Tabled};

use crate::{
    config::{LogVerbosity, LoggingConfig},
    types::{InstructionLog, TransactionLog},
};

/// ANSI escape codes, or empty strings when colors are disabled.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
    pub bold: &'static str,
    pub reset: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
    pub gray: &'static str,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                bold: "\x1b[1m",
                reset: "\x1b[0m",
                green: "\x1b[32m",
                yellow: "\x1b[33m",
                cyan: "\x1b[36m",
                gray: "\x1b[90m",
            }
        } else {
            Self {
                bold: "",
                reset: "",
                green: "",
                yellow: "",
                cyan: "",
                gray: "",
            }
        }
    }
}

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Pubkey")]
    pubkey: String,
    #[tabled(rename = "Signer")]
    signer: &'static str,
    #[tabled(rename = "Writable")]
    writable: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub struct TransactionFormatter<'a> {
    config: &'a LoggingConfig,
    colors: Colors,
}

impl<'a> TransactionFormatter<'a> {
    pub fn new(config: &'a LoggingConfig) -> Self {
        Self {
            config,
            colors: Colors::new(config.use_colors),
        }
    }

    /// Render a transaction; `tx_number` is the caller's running count.
    pub fn format(&self, log: &TransactionLog, tx_number: usize) -> String {
        let c = self.colors;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}Transaction #{}{} {}{}{}",
            c.bold, tx_number, c.reset, c.gray, log.signature, c.reset
        );
        for ix in &log.instructions {
            self.format_instruction(&mut out, ix);
        }
        out.push('\n');
        out
    }

    fn format_instruction(&self, out: &mut String, ix: &InstructionLog) {
        let c = self.colors;
        let name = ix.instruction_name.as_deref().unwrap_or("<unknown>");
        let _ = writeln!(
            out,
            "  [{}] {}{}{}: {}{}{}",
            ix.index, c.cyan, ix.program_name, c.reset, c.green, name, c.reset
        );

        if self.config.verbosity == LogVerbosity::Brief {
            return;
        }

        if let Some(decoded) = &ix.decoded_instruction {
            for field in &decoded.fields {
                let _ = writeln!(
                    out,
                    "      {}{}{}: {}",
                    c.yellow, field.name, c.reset, field.value
                );
            }
        }

        if self.config.show_account_roles && !ix.accounts.is_empty() {
            let rows = ix.accounts.iter().enumerate().map(|(position, meta)| AccountRow {
                position,
                role: ix.account_name(position).unwrap_or("-").to_string(),
                pubkey: meta.pubkey.to_string(),
                signer: yes_no(meta.is_signer),
                writable: yes_no(meta.is_writable),
            });
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            for line in table.to_string().lines() {
                let _ = writeln!(out, "      {line}");
            }
        }

        if self.config.verbosity == LogVerbosity::Detailed {
            let _ = writeln!(
                out,
                "      {}data ({} bytes): {}{}",
                c.gray,
                ix.data.len(),
                bs58::encode(&ix.data).into_string(),
                c.reset
            );
        }
    }
}
