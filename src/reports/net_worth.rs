//! Net worth report
//!
//! Asset balances grouped by asset type, plus the amount set aside in goals.
//! Goal money is shown separately and is not part of net worth.

use serde::Serialize;

use crate::models::{Asset, AssetType, Goal, Money};

#[derive(Debug, Clone, Serialize)]
pub struct AssetTypeGroup {
    pub asset_type: AssetType,
    pub assets: Vec<(String, Money)>,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetWorthReport {
    pub groups: Vec<AssetTypeGroup>,
    pub net_worth: Money,
    pub goal_savings: Money,
    pub goal_targets: Money,
}

impl NetWorthReport {
    pub fn generate(assets: &[Asset], goals: &[Goal]) -> Self {
        let mut groups: Vec<AssetTypeGroup> = Vec::new();
        for asset in assets {
            let group = match groups.iter().position(|g| g.asset_type == asset.asset_type) {
                Some(index) => &mut groups[index],
                None => {
                    groups.push(AssetTypeGroup {
                        asset_type: asset.asset_type,
                        assets: Vec::new(),
                        total: Money::zero(),
                    });
                    let last = groups.len() - 1;
                    &mut groups[last]
                }
            };
            group.total += asset.balance;
            group.assets.push((asset.name.clone(), asset.balance));
        }

        Self {
            net_worth: groups.iter().map(|g| g.total).sum(),
            groups,
            goal_savings: goals.iter().map(|g| g.current).sum(),
            goal_targets: goals.iter().map(|g| g.target).sum(),
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::from("Net Worth\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for group in &self.groups {
            output.push_str(&format!("\n{}\n", group.asset_type.to_string().to_uppercase()));
            for (name, balance) in &group.assets {
                output.push_str(&format!("  {:<30} {:>16}\n", name, balance));
            }
            output.push_str(&format!("  {:<30} {:>16}\n", "Subtotal:", group.total));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<32} {:>16}\n", "NET WORTH", self.net_worth));
        output.push_str(&format!(
            "{:<32} {:>16}\n",
            "Saved toward goals",
            format!("{} / {}", self.goal_savings, self.goal_targets)
        ));
        output
    }
}
