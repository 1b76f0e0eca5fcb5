//! Account-role resolution.
//!
//! Maps an instruction's ordered account list onto the named roles the DEX
//! program expects at each position. Signer/writable flags are fixed per role
//! and describe what the program requires, not what the transaction header
//! happened to grant.

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

use super::instruction::SerumInstruction;
use crate::DecodeError;

/// Position-indexed view over the pubkeys passed to one instruction.
struct AccountResolver<'a> {
    keys: &'a [Pubkey],
}

impl<'a> AccountResolver<'a> {
    fn new(
        instruction: &'static str,
        keys: &'a [Pubkey],
        required: usize,
    ) -> Result<Self, DecodeError> {
        if keys.len() < required {
            return Err(DecodeError::InsufficientAccounts {
                instruction,
                required,
                actual: keys.len(),
            });
        }
        Ok(Self { keys })
    }

    fn writable(&self, position: usize) -> AccountMeta {
        AccountMeta::new(self.keys[position], false)
    }

    fn readonly(&self, position: usize) -> AccountMeta {
        AccountMeta::new_readonly(self.keys[position], false)
    }

    fn signer(&self, position: usize) -> AccountMeta {
        AccountMeta::new_readonly(self.keys[position], true)
    }

    fn optional_writable(&self, position: usize) -> Option<AccountMeta> {
        self.keys
            .get(position)
            .map(|pubkey| AccountMeta::new(*pubkey, false))
    }
}

/// Accounts of `initialize_market`.
///
/// 0. `[writable]` market
/// 1. `[writable]` request queue
/// 2. `[writable]` event queue
/// 3. `[writable]` bids
/// 4. `[writable]` asks
/// 5. `[writable]` coin vault
/// 6. `[writable]` price currency vault
/// 7. `[]` coin mint
/// 8. `[]` price currency mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeMarketAccounts {
    pub market: AccountMeta,
    pub request_queue: AccountMeta,
    pub event_queue: AccountMeta,
    pub bids: AccountMeta,
    pub asks: AccountMeta,
    pub spl_coin_token: AccountMeta,
    pub spl_price_token: AccountMeta,
    pub coin_mint: AccountMeta,
    pub price_mint: AccountMeta,
}

impl InitializeMarketAccounts {
    pub const MIN_ACCOUNTS: usize = 9;

    pub fn resolve(keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new("initialize_market", keys, Self::MIN_ACCOUNTS)?;
        Ok(Self {
            market: r.writable(0),
            request_queue: r.writable(1),
            event_queue: r.writable(2),
            bids: r.writable(3),
            asks: r.writable(4),
            spl_coin_token: r.writable(5),
            spl_price_token: r.writable(6),
            coin_mint: r.readonly(7),
            price_mint: r.readonly(8),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        vec![
            ("market".to_string(), &self.market),
            ("request_queue".to_string(), &self.request_queue),
            ("event_queue".to_string(), &self.event_queue),
            ("bids".to_string(), &self.bids),
            ("asks".to_string(), &self.asks),
            ("spl_coin_token".to_string(), &self.spl_coin_token),
            ("spl_price_token".to_string(), &self.spl_price_token),
            ("coin_mint".to_string(), &self.coin_mint),
            ("price_mint".to_string(), &self.price_mint),
        ]
    }
}

/// Accounts of `new_order`.
///
/// 0. `[writable]` market
/// 1. `[writable]` open orders
/// 2. `[writable]` request queue
/// 3. `[writable]` payer of the (coin or price currency) funds
/// 4. `[signer]` open orders owner
/// 5. `[writable]` coin vault
/// 6. `[writable]` price currency vault
/// 7. `[]` SPL token program
/// 8. `[]` rent sysvar
/// 9. `[writable]` SRM fee discount account (optional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderAccounts {
    pub market: AccountMeta,
    pub open_orders: AccountMeta,
    pub request_queue: AccountMeta,
    pub payer: AccountMeta,
    pub owner: AccountMeta,
    pub coin_vault: AccountMeta,
    pub pc_vault: AccountMeta,
    pub spl_token_program: AccountMeta,
    pub rent: AccountMeta,
    pub srm_discount_account: Option<AccountMeta>,
}

impl NewOrderAccounts {
    pub const MIN_ACCOUNTS: usize = 9;

    pub fn resolve(keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new("new_order", keys, Self::MIN_ACCOUNTS)?;
        Ok(Self {
            market: r.writable(0),
            open_orders: r.writable(1),
            request_queue: r.writable(2),
            payer: r.writable(3),
            owner: r.signer(4),
            coin_vault: r.writable(5),
            pc_vault: r.writable(6),
            spl_token_program: r.readonly(7),
            rent: r.readonly(8),
            srm_discount_account: r.optional_writable(9),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        let mut named = vec![
            ("market".to_string(), &self.market),
            ("open_orders".to_string(), &self.open_orders),
            ("request_queue".to_string(), &self.request_queue),
            ("payer".to_string(), &self.payer),
            ("owner".to_string(), &self.owner),
            ("coin_vault".to_string(), &self.coin_vault),
            ("pc_vault".to_string(), &self.pc_vault),
            ("spl_token_program".to_string(), &self.spl_token_program),
            ("rent".to_string(), &self.rent),
        ];
        if let Some(account) = &self.srm_discount_account {
            named.push(("srm_discount_account".to_string(), account));
        }
        named
    }
}

/// Accounts of `match_orders`, all writable.
///
/// 0. market
/// 1. request queue
/// 2. event queue
/// 3. bids
/// 4. asks
/// 5. coin fee receivable
/// 6. price currency fee receivable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOrderAccounts {
    pub market: AccountMeta,
    pub request_queue: AccountMeta,
    pub event_queue: AccountMeta,
    pub bids: AccountMeta,
    pub asks: AccountMeta,
    pub coin_fee_receivable: AccountMeta,
    pub pc_fee_receivable: AccountMeta,
}

impl MatchOrderAccounts {
    pub const MIN_ACCOUNTS: usize = 7;

    pub fn resolve(keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new("match_orders", keys, Self::MIN_ACCOUNTS)?;
        Ok(Self {
            market: r.writable(0),
            request_queue: r.writable(1),
            event_queue: r.writable(2),
            bids: r.writable(3),
            asks: r.writable(4),
            coin_fee_receivable: r.writable(5),
            pc_fee_receivable: r.writable(6),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        vec![
            ("market".to_string(), &self.market),
            ("request_queue".to_string(), &self.request_queue),
            ("event_queue".to_string(), &self.event_queue),
            ("bids".to_string(), &self.bids),
            ("asks".to_string(), &self.asks),
            ("coin_fee_receivable".to_string(), &self.coin_fee_receivable),
            ("pc_fee_receivable".to_string(), &self.pc_fee_receivable),
        ]
    }
}

/// Accounts of `consume_events`, all writable.
///
/// ... open orders accounts to crank
/// accounts.len() - 4. market
/// accounts.len() - 3. event queue
/// accounts.len() - 2. coin fee receivable
/// accounts.len() - 1. price currency fee receivable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumeEventsAccounts {
    pub open_orders: Vec<AccountMeta>,
    pub market: AccountMeta,
    pub event_queue: AccountMeta,
    pub coin_fee_receivable: AccountMeta,
    pub pc_fee_receivable: AccountMeta,
}

impl ConsumeEventsAccounts {
    pub const MIN_ACCOUNTS: usize = 4;

    pub fn resolve(keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new("consume_events", keys, Self::MIN_ACCOUNTS)?;
        let tail = keys.len() - Self::MIN_ACCOUNTS;
        Ok(Self {
            open_orders: (0..tail).map(|position| r.writable(position)).collect(),
            market: r.writable(tail),
            event_queue: r.writable(tail + 1),
            coin_fee_receivable: r.writable(tail + 2),
            pc_fee_receivable: r.writable(tail + 3),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        let mut named: Vec<(String, &AccountMeta)> = self
            .open_orders
            .iter()
            .enumerate()
            .map(|(i, account)| (format!("open_orders[{i}]"), account))
            .collect();
        named.extend([
            ("market".to_string(), &self.market),
            ("event_queue".to_string(), &self.event_queue),
            ("coin_fee_receivable".to_string(), &self.coin_fee_receivable),
            ("pc_fee_receivable".to_string(), &self.pc_fee_receivable),
        ]);
        named
    }
}

/// Accounts of `cancel_order` and `cancel_order_by_client_id`.
///
/// 0. `[]` market
/// 1. `[writable]` open orders
/// 2. `[writable]` request queue
/// 3. `[signer]` open orders owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderAccounts {
    pub market: AccountMeta,
    pub open_orders: AccountMeta,
    pub request_queue: AccountMeta,
    pub owner: AccountMeta,
}

pub type CancelOrderByClientIdAccounts = CancelOrderAccounts;

impl CancelOrderAccounts {
    pub const MIN_ACCOUNTS: usize = 4;

    pub fn resolve(instruction: &'static str, keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new(instruction, keys, Self::MIN_ACCOUNTS)?;
        Ok(Self {
            market: r.readonly(0),
            open_orders: r.writable(1),
            request_queue: r.writable(2),
            owner: r.signer(3),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        vec![
            ("market".to_string(), &self.market),
            ("open_orders".to_string(), &self.open_orders),
            ("request_queue".to_string(), &self.request_queue),
            ("owner".to_string(), &self.owner),
        ]
    }
}

/// Accounts of `settle_funds`.
///
/// 0. `[writable]` market
/// 1. `[writable]` open orders
/// 2. `[signer]` open orders owner
/// 3. `[writable]` coin vault
/// 4. `[writable]` price currency vault
/// 5. `[writable]` coin wallet
/// 6. `[writable]` price currency wallet
/// 7. `[]` vault signer
/// 8. `[]` SPL token program
/// 9. `[writable]` referrer price currency wallet (optional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleFundsAccounts {
    pub market: AccountMeta,
    pub open_orders: AccountMeta,
    pub owner: AccountMeta,
    pub coin_vault: AccountMeta,
    pub pc_vault: AccountMeta,
    pub coin_wallet: AccountMeta,
    pub pc_wallet: AccountMeta,
    pub signer: AccountMeta,
    pub spl_token_program: AccountMeta,
    pub referrer_pc_wallet: Option<AccountMeta>,
}

impl SettleFundsAccounts {
    pub const MIN_ACCOUNTS: usize = 9;

    pub fn resolve(keys: &[Pubkey]) -> Result<Self, DecodeError> {
        let r = AccountResolver::new("settle_funds", keys, Self::MIN_ACCOUNTS)?;
        Ok(Self {
            market: r.writable(0),
            open_orders: r.writable(1),
            owner: r.signer(2),
            coin_vault: r.writable(3),
            pc_vault: r.writable(4),
            coin_wallet: r.writable(5),
            pc_wallet: r.writable(6),
            signer: r.readonly(7),
            spl_token_program: r.readonly(8),
            referrer_pc_wallet: r.optional_writable(9),
        })
    }

    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        let mut named = vec![
            ("market".to_string(), &self.market),
            ("open_orders".to_string(), &self.open_orders),
            ("owner".to_string(), &self.owner),
            ("coin_vault".to_string(), &self.coin_vault),
            ("pc_vault".to_string(), &self.pc_vault),
            ("coin_wallet".to_string(), &self.coin_wallet),
            ("pc_wallet".to_string(), &self.pc_wallet),
            ("signer".to_string(), &self.signer),
            ("spl_token_program".to_string(), &self.spl_token_program),
        ];
        if let Some(account) = &self.referrer_pc_wallet {
            named.push(("referrer_pc_wallet".to_string(), account));
        }
        named
    }
}

/// Role structure of one instruction, tagged like [`SerumInstruction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionAccounts {
    InitializeMarket(InitializeMarketAccounts),
    NewOrder(NewOrderAccounts),
    MatchOrder(MatchOrderAccounts),
    ConsumeEvents(ConsumeEventsAccounts),
    CancelOrder(CancelOrderAccounts),
    SettleFunds(SettleFundsAccounts),
    CancelOrderByClientId(CancelOrderByClientIdAccounts),
}

impl InstructionAccounts {
    /// `(role, account)` pairs in account-position order.
    pub fn named(&self) -> Vec<(String, &AccountMeta)> {
        match self {
            InstructionAccounts::InitializeMarket(accounts) => accounts.named(),
            InstructionAccounts::NewOrder(accounts) => accounts.named(),
            InstructionAccounts::MatchOrder(accounts) => accounts.named(),
            InstructionAccounts::ConsumeEvents(accounts) => accounts.named(),
            InstructionAccounts::CancelOrder(accounts) => accounts.named(),
            InstructionAccounts::SettleFunds(accounts) => accounts.named(),
            InstructionAccounts::CancelOrderByClientId(accounts) => accounts.named(),
        }
    }

    pub fn role_names(&self) -> Vec<String> {
        self.named().into_iter().map(|(name, _)| name).collect()
    }
}

impl SerumInstruction {
    /// Minimum number of accounts the program requires for this instruction.
    pub fn min_accounts(&self) -> usize {
        match self {
            SerumInstruction::InitializeMarket(_) => InitializeMarketAccounts::MIN_ACCOUNTS,
            SerumInstruction::NewOrder(_) => NewOrderAccounts::MIN_ACCOUNTS,
            SerumInstruction::MatchOrder(_) => MatchOrderAccounts::MIN_ACCOUNTS,
            SerumInstruction::ConsumeEvents(_) => ConsumeEventsAccounts::MIN_ACCOUNTS,
            SerumInstruction::CancelOrder(_) | SerumInstruction::CancelOrderByClientId(_) => {
                CancelOrderAccounts::MIN_ACCOUNTS
            }
            SerumInstruction::SettleFunds(_) => SettleFundsAccounts::MIN_ACCOUNTS,
        }
    }

    /// Number of leading account positions mapped onto roles, counting the
    /// optional trailing role. `None` when every position is consumed.
    pub fn max_accounts(&self) -> Option<usize> {
        match self {
            SerumInstruction::InitializeMarket(_) => {
                Some(InitializeMarketAccounts::MIN_ACCOUNTS)
            }
            SerumInstruction::NewOrder(_) => Some(NewOrderAccounts::MIN_ACCOUNTS + 1),
            SerumInstruction::MatchOrder(_) => Some(MatchOrderAccounts::MIN_ACCOUNTS),
            SerumInstruction::ConsumeEvents(_) => None,
            SerumInstruction::CancelOrder(_) | SerumInstruction::CancelOrderByClientId(_) => {
                Some(CancelOrderAccounts::MIN_ACCOUNTS)
            }
            SerumInstruction::SettleFunds(_) => Some(SettleFundsAccounts::MIN_ACCOUNTS + 1),
        }
    }

    /// Resolve account roles from the transaction's account-key table and this
    /// instruction's indices into it.
    ///
    /// Only indices at positions that map onto a role are looked up; trailing
    /// indices past the last role are ignored.
    pub fn resolve_accounts(
        &self,
        account_keys: &[Pubkey],
        account_indices: &[u8],
    ) -> Result<InstructionAccounts, DecodeError> {
        let required = self.min_accounts();
        if account_indices.len() < required {
            return Err(DecodeError::InsufficientAccounts {
                instruction: self.name(),
                required,
                actual: account_indices.len(),
            });
        }
        let consumed = self
            .max_accounts()
            .map_or(account_indices.len(), |max| account_indices.len().min(max));
        let keys = account_indices[..consumed]
            .iter()
            .map(|&index| {
                account_keys.get(usize::from(index)).copied().ok_or(
                    DecodeError::AccountIndexOutOfBounds {
                        instruction: self.name(),
                        index,
                        len: account_keys.len(),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.resolve_account_keys(&keys)
    }

    /// Resolve account roles from the instruction's pubkeys, already in position order.
    pub fn resolve_account_keys(
        &self,
        keys: &[Pubkey],
    ) -> Result<InstructionAccounts, DecodeError> {
        Ok(match self {
            SerumInstruction::InitializeMarket(_) => {
                InstructionAccounts::InitializeMarket(InitializeMarketAccounts::resolve(keys)?)
            }
            SerumInstruction::NewOrder(_) => {
                InstructionAccounts::NewOrder(NewOrderAccounts::resolve(keys)?)
            }
            SerumInstruction::MatchOrder(_) => {
                InstructionAccounts::MatchOrder(MatchOrderAccounts::resolve(keys)?)
            }
            SerumInstruction::ConsumeEvents(_) => {
                InstructionAccounts::ConsumeEvents(ConsumeEventsAccounts::resolve(keys)?)
            }
            SerumInstruction::CancelOrder(_) => InstructionAccounts::CancelOrder(
                CancelOrderAccounts::resolve(self.name(), keys)?,
            ),
            SerumInstruction::SettleFunds(_) => {
                InstructionAccounts::SettleFunds(SettleFundsAccounts::resolve(keys)?)
            }
            SerumInstruction::CancelOrderByClientId(_) => {
                InstructionAccounts::CancelOrderByClientId(CancelOrderAccounts::resolve(
                    self.name(),
                    keys,
                )?)
            }
        })
    }
}
