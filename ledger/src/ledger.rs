//! The stake ledger — moves value between accounts, escrow, pool, and treasury.

use crate::error::LedgerError;
use rumor_types::{AccountId, GuiAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balances held for one account.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Freely spendable balance.
    pub available: GuiAmount,
    /// Balance locked behind active votes.
    pub escrowed: GuiAmount,
}

/// The stake ledger.
///
/// Four buckets of value exist: per-account `available`, per-account
/// `escrowed` (stakes locked behind open votes), the `pool` (custody of
/// fixed reward pools between resolution and settlement), and the
/// `treasury` (submission fees and rounding remainders). Their grand total
/// changes only through [`StakeLedger::deposit`] and
/// [`StakeLedger::withdraw`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StakeLedger {
    accounts: HashMap<AccountId, AccountBalance>,
    pool: GuiAmount,
    treasury: GuiAmount,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Available balance for an account (zero if the account is unknown).
    pub fn available(&self, account: &AccountId) -> GuiAmount {
        self.accounts
            .get(account)
            .map(|b| b.available)
            .unwrap_or(GuiAmount::ZERO)
    }

    /// Escrowed balance for an account (zero if the account is unknown).
    pub fn escrowed(&self, account: &AccountId) -> GuiAmount {
        self.accounts
            .get(account)
            .map(|b| b.escrowed)
            .unwrap_or(GuiAmount::ZERO)
    }

    /// Undistributed reward-pool custody.
    pub fn pool(&self) -> GuiAmount {
        self.pool
    }

    /// Sum of every account's escrowed balance.
    pub fn total_escrowed(&self) -> GuiAmount {
        self.accounts.values().map(|b| b.escrowed).sum()
    }

    /// Treasury balance (submission fees + rounding remainders).
    pub fn treasury(&self) -> GuiAmount {
        self.treasury
    }

    /// Grand total of all value in the system. Invariant across every
    /// operation except `deposit` and `withdraw`.
    pub fn total_in_system(&self) -> GuiAmount {
        let accounts: GuiAmount = self
            .accounts
            .values()
            .map(|b| b.available + b.escrowed)
            .sum();
        accounts + self.pool + self.treasury
    }

    /// Credit an account from outside the system (faucet, token bridge).
    pub fn deposit(&mut self, account: &AccountId, amount: GuiAmount) -> Result<(), LedgerError> {
        let entry = self.accounts.entry(account.clone()).or_default();
        entry.available = entry
            .available
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        tracing::debug!(%account, %amount, "deposit");
        Ok(())
    }

    /// Debit an account out of the system (withdrawal to the external token).
    pub fn withdraw(&mut self, account: &AccountId, amount: GuiAmount) -> Result<(), LedgerError> {
        let balance = self.available(account);
        let entry = self.accounts.entry(account.clone()).or_default();
        entry.available = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: balance.raw(),
            })?;
        tracing::debug!(%account, %amount, "withdraw");
        Ok(())
    }

    /// Lock stake: move `amount` from `available` to `escrowed`.
    pub fn transfer_to_escrow(
        &mut self,
        account: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), LedgerError> {
        let balance = self.accounts.get(account).copied().unwrap_or_default();
        let available =
            balance
                .available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    needed: amount.raw(),
                    available: balance.available.raw(),
                })?;
        let escrowed = balance
            .escrowed
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.accounts
            .insert(account.clone(), AccountBalance { available, escrowed });
        Ok(())
    }

    /// Release stake: move `amount` from `escrowed` back to `available`.
    pub fn transfer_from_escrow(
        &mut self,
        account: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), LedgerError> {
        let balance = self.accounts.get(account).copied().unwrap_or_default();
        let escrowed =
            balance
                .escrowed
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientEscrow {
                    needed: amount.raw(),
                    escrowed: balance.escrowed.raw(),
                })?;
        let available = balance
            .available
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.accounts
            .insert(account.clone(), AccountBalance { available, escrowed });
        Ok(())
    }

    /// Forfeit a losing stake: move `amount` from the account's escrow into
    /// reward-pool custody.
    pub fn forfeit_to_pool(
        &mut self,
        account: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), LedgerError> {
        let balance = self.accounts.get(account).copied().unwrap_or_default();
        let escrowed =
            balance
                .escrowed
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientEscrow {
                    needed: amount.raw(),
                    escrowed: balance.escrowed.raw(),
                })?;
        self.pool = self.pool.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.accounts.insert(
            account.clone(),
            AccountBalance {
                available: balance.available,
                escrowed,
            },
        );
        Ok(())
    }

    /// Pay a winner's pool share: move `amount` from pool custody into the
    /// account's available balance.
    pub fn pay_from_pool(
        &mut self,
        account: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), LedgerError> {
        let pool = self
            .pool
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientPool {
                needed: amount.raw(),
                available: self.pool.raw(),
            })?;
        let entry = self.accounts.entry(account.clone()).or_default();
        entry.available = entry
            .available
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.pool = pool;
        Ok(())
    }

    /// Move an undistributable rounding remainder from pool custody to the
    /// treasury.
    pub fn pool_to_treasury(&mut self, amount: GuiAmount) -> Result<(), LedgerError> {
        self.pool = self
            .pool
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientPool {
                needed: amount.raw(),
                available: self.pool.raw(),
            })?;
        self.treasury = self
            .treasury
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Collect a fee: move `amount` from the account's available balance to
    /// the treasury.
    pub fn collect_fee(
        &mut self,
        account: &AccountId,
        amount: GuiAmount,
    ) -> Result<(), LedgerError> {
        let balance = self.available(account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: balance.raw(),
            })?;
        self.treasury = self
            .treasury
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let entry = self.accounts.entry(account.clone()).or_default();
        entry.available = remaining;
        tracing::debug!(%account, %amount, "fee collected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::new("alice")
    }

    fn bob() -> AccountId {
        AccountId::new("bob")
    }

    fn gui(n: u64) -> GuiAmount {
        GuiAmount::from_gui(n)
    }

    #[test]
    fn deposit_and_withdraw() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(50)).unwrap();
        assert_eq!(ledger.available(&alice()), gui(50));

        ledger.withdraw(&alice(), gui(20)).unwrap();
        assert_eq!(ledger.available(&alice()), gui(30));

        let err = ledger.withdraw(&alice(), gui(31)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.available(&alice()), gui(30));
    }

    #[test]
    fn escrow_roundtrip() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(10)).unwrap();
        ledger.transfer_to_escrow(&alice(), gui(4)).unwrap();
        assert_eq!(ledger.available(&alice()), gui(6));
        assert_eq!(ledger.escrowed(&alice()), gui(4));

        ledger.transfer_from_escrow(&alice(), gui(4)).unwrap();
        assert_eq!(ledger.available(&alice()), gui(10));
        assert_eq!(ledger.escrowed(&alice()), GuiAmount::ZERO);
    }

    #[test]
    fn escrow_rejects_overdraw() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(3)).unwrap();
        let err = ledger.transfer_to_escrow(&alice(), gui(4)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: gui(4).raw(),
                available: gui(3).raw(),
            }
        );
    }

    #[test]
    fn release_rejects_more_than_escrowed() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(10)).unwrap();
        ledger.transfer_to_escrow(&alice(), gui(2)).unwrap();
        let err = ledger.transfer_from_escrow(&alice(), gui(3)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientEscrow { .. }));
    }

    #[test]
    fn forfeit_and_pay_through_pool() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(10)).unwrap();
        ledger.deposit(&bob(), gui(10)).unwrap();
        ledger.transfer_to_escrow(&bob(), gui(3)).unwrap();

        ledger.forfeit_to_pool(&bob(), gui(3)).unwrap();
        assert_eq!(ledger.pool(), gui(3));
        assert_eq!(ledger.escrowed(&bob()), GuiAmount::ZERO);

        ledger.pay_from_pool(&alice(), gui(2)).unwrap();
        ledger.pool_to_treasury(gui(1)).unwrap();
        assert_eq!(ledger.pool(), GuiAmount::ZERO);
        assert_eq!(ledger.available(&alice()), gui(12));
        assert_eq!(ledger.treasury(), gui(1));
    }

    #[test]
    fn fee_moves_to_treasury() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(50)).unwrap();
        ledger.collect_fee(&alice(), gui(10)).unwrap();
        assert_eq!(ledger.available(&alice()), gui(40));
        assert_eq!(ledger.treasury(), gui(10));
    }

    #[test]
    fn conservation_across_internal_moves() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(50)).unwrap();
        ledger.deposit(&bob(), gui(50)).unwrap();
        let total = ledger.total_in_system();

        ledger.collect_fee(&alice(), gui(10)).unwrap();
        ledger.transfer_to_escrow(&bob(), gui(5)).unwrap();
        ledger.forfeit_to_pool(&bob(), gui(5)).unwrap();
        ledger.pay_from_pool(&alice(), gui(4)).unwrap();
        ledger.pool_to_treasury(gui(1)).unwrap();

        assert_eq!(ledger.total_in_system(), total);
    }

    #[test]
    fn failed_operations_leave_no_partial_state() {
        let mut ledger = StakeLedger::new();
        ledger.deposit(&alice(), gui(5)).unwrap();
        let before = ledger.clone();

        assert!(ledger.collect_fee(&alice(), gui(10)).is_err());
        assert!(ledger.transfer_to_escrow(&alice(), gui(6)).is_err());
        assert!(ledger.pay_from_pool(&alice(), gui(1)).is_err());
        assert!(ledger.pool_to_treasury(gui(1)).is_err());

        assert_eq!(ledger.available(&alice()), before.available(&alice()));
        assert_eq!(ledger.escrowed(&alice()), before.escrowed(&alice()));
        assert_eq!(ledger.pool(), before.pool());
        assert_eq!(ledger.treasury(), before.treasury());
    }
}
