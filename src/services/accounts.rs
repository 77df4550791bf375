//! Account store
//!
//! Owns every asset and goal. Balances change only through
//! [`AccountStore::apply_delta`]; the ledger asks for effects, it never
//! edits an account itself.
//!
//! Accounts live in plain vectors keyed by id, so a transaction that still
//! names a deleted account resolves to "not found" instead of dangling.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    AccountRef, Asset, AssetId, Goal, GoalId, HistoryEntry, HistoryLabel, Money,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountStore {
    assets: Vec<Asset>,
    goals: Vec<Goal>,
}

impl AccountStore {
    pub fn new(assets: Vec<Asset>, goals: Vec<Goal>) -> Self {
        Self { assets, goals }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get_asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn get_goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub(crate) fn asset_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|a| a.id == id)
    }

    pub(crate) fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    /// Find an asset by name (case-insensitive), full id or short id
    pub fn find_asset(&self, identifier: &str) -> Option<&Asset> {
        let identifier = identifier.trim();
        self.assets
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(identifier))
            .or_else(|| self.assets.iter().find(|a| a.id.matches(identifier)))
    }

    /// Find a goal by name (case-insensitive), full id or short id
    pub fn find_goal(&self, identifier: &str) -> Option<&Goal> {
        let identifier = identifier.trim();
        self.goals
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(identifier))
            .or_else(|| self.goals.iter().find(|g| g.id.matches(identifier)))
    }

    pub fn contains(&self, account: AccountRef) -> bool {
        self.balance_of(account).is_some()
    }

    /// Asset balance or goal `current`
    pub fn balance_of(&self, account: AccountRef) -> Option<Money> {
        match account {
            AccountRef::Asset(id) => self.get_asset(id).map(|a| a.balance),
            AccountRef::Goal(id) => self.get_goal(id).map(|g| g.current),
        }
    }

    /// Add `signed` to an account's balance, returning the new balance
    ///
    /// When `label` is given a history entry is appended: assets record the
    /// resulting balance, goals record the size of the movement. Balances
    /// are never clamped; an over-withdrawn account simply goes negative.
    /// A balance that would overflow is rejected and the account is left as
    /// it was.
    pub fn apply_delta(
        &mut self,
        account: AccountRef,
        signed: Money,
        date: NaiveDate,
        label: Option<HistoryLabel>,
    ) -> FintrackResult<Money> {
        self.check_delta(account, signed)?;
        let new_balance = match account {
            AccountRef::Asset(id) => {
                let asset = self.asset_mut(id).ok_or_else(|| routing_missing(account))?;
                asset.balance += signed;
                if let Some(label) = label {
                    asset
                        .history
                        .push(HistoryEntry::new(date, asset.balance, label));
                }
                asset.balance
            }
            AccountRef::Goal(id) => {
                let goal = self.goal_mut(id).ok_or_else(|| routing_missing(account))?;
                goal.current += signed;
                if let Some(label) = label {
                    goal.history
                        .push(HistoryEntry::new(date, signed.abs(), label));
                }
                goal.current
            }
        };

        debug!(%account, delta = %signed, balance = %new_balance, "applied account delta");
        Ok(new_balance)
    }

    /// Whether `signed` can be applied to `account` without overflowing
    pub fn check_delta(&self, account: AccountRef, signed: Money) -> FintrackResult<()> {
        let balance = self
            .balance_of(account)
            .ok_or_else(|| routing_missing(account))?;
        balance.checked_add(signed).map(|_| ()).ok_or_else(|| {
            FintrackError::Validation(format!(
                "{} balance cannot absorb {}: amount out of range",
                account.kind_name(),
                signed
            ))
        })
    }

    pub fn insert_asset(&mut self, asset: Asset) -> FintrackResult<()> {
        asset
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        if self.get_asset(asset.id).is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Asset",
                identifier: asset.id.to_string(),
            });
        }
        self.assets.push(asset);
        Ok(())
    }

    pub fn insert_goal(&mut self, goal: Goal) -> FintrackResult<()> {
        goal.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        if self.get_goal(goal.id).is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Goal",
                identifier: goal.id.to_string(),
            });
        }
        self.goals.push(goal);
        Ok(())
    }

    /// Remove an asset; transactions routed to it are left untouched
    pub fn remove_asset(&mut self, id: AssetId) -> FintrackResult<Asset> {
        let index = self
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| FintrackError::asset_not_found(id.to_string()))?;
        Ok(self.assets.remove(index))
    }

    /// Remove a goal; transactions routed to it are left untouched
    pub fn remove_goal(&mut self, id: GoalId) -> FintrackResult<Goal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| FintrackError::goal_not_found(id.to_string()))?;
        Ok(self.goals.remove(index))
    }

    /// Sum of all asset balances
    pub fn net_worth(&self) -> Money {
        self.assets.iter().map(|a| a.balance).sum()
    }
}

fn routing_missing(account: AccountRef) -> FintrackError {
    FintrackError::RoutingTargetNotFound {
        kind: account.kind_name(),
        id: account.to_string(),
    }
}
