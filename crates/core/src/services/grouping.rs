use crate::models::group::{GroupFilter, GroupSortKey, GroupedPosition};
use crate::models::holding::Holding;
use crate::models::rates::RateSet;
use crate::models::report::{MarketValue, PnL};
use super::valuation::{quote_price_usd, value_holding, value_holding_pnl};

/// Partition holdings by case-normalized instrument code and combine each
/// partition into one logical position.
///
/// Groups come out in first-occurrence order of their codes, which keeps
/// downstream filter/sort behavior deterministic. Each leg (USD, MYR) is
/// summed independently across members — the MYR total is never derived
/// by reconverting the USD sum.
pub fn group_by_code(
    holdings: &[Holding],
    portfolio_myr_total: f64,
    rates: &RateSet,
) -> Vec<GroupedPosition> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: std::collections::HashMap<String, Vec<&Holding>> =
        std::collections::HashMap::new();

    for holding in holdings {
        let code = holding.code.to_uppercase();
        if !buckets.contains_key(&code) {
            order.push(code.clone());
        }
        buckets.entry(code).or_default().push(holding);
    }

    order
        .into_iter()
        .map(|code| {
            let members = buckets.remove(&code).unwrap_or_default();
            build_group(code, &members, portfolio_myr_total, rates)
        })
        .collect()
}

fn build_group(
    code: String,
    members: &[&Holding],
    portfolio_myr_total: f64,
    rates: &RateSet,
) -> GroupedPosition {
    let mut market_value = MarketValue::ZERO;
    let mut pnl_usd = 0.0;
    let mut pnl_myr = 0.0;
    let mut cost_basis_usd = 0.0;
    let mut total_quantity = 0.0;
    let mut weighted_price_sum_usd = 0.0;
    let mut weighted_cost_sum = 0.0;
    let mut any_priced = false;
    let mut accounts: Vec<String> = Vec::new();

    for holding in members {
        market_value = market_value.add(value_holding(holding, rates));

        let pnl = value_holding_pnl(holding, rates);
        pnl_usd += pnl.usd;
        pnl_myr += pnl.myr;

        // Cost basis normalized to USD, same basis the per-member P&L uses
        cost_basis_usd += match holding.currency {
            crate::models::currency::Currency::Usd => holding.quantity * holding.avg_cost,
            crate::models::currency::Currency::Myr => {
                holding.quantity * holding.avg_cost / rates.usd_to_myr
            }
            crate::models::currency::Currency::Hkd => {
                holding.quantity * holding.avg_cost / rates.usd_to_hkd
            }
        };

        total_quantity += holding.quantity;
        if let Some(price) = holding.market_price {
            any_priced = true;
            weighted_price_sum_usd +=
                holding.quantity * quote_price_usd(price, holding.quote, rates);
        }
        weighted_cost_sum += holding.quantity * holding.avg_cost;

        if !accounts.iter().any(|a| a == &holding.account) {
            accounts.push(holding.account.clone());
        }
    }

    let percentage = if cost_basis_usd > 0.0 {
        (pnl_usd / cost_basis_usd) * 100.0
    } else {
        0.0
    };

    let portion = if portfolio_myr_total > 0.0 {
        (market_value.myr / portfolio_myr_total) * 100.0
    } else {
        0.0
    };

    let weighted_avg_market_price = if any_priced && total_quantity > 0.0 {
        Some(weighted_price_sum_usd / total_quantity)
    } else {
        None
    };
    let weighted_avg_cost = if total_quantity > 0.0 {
        Some(weighted_cost_sum / total_quantity)
    } else {
        None
    };

    // First member is the group's representative for name, kind, and
    // currency; holdings of one code are assumed to share these.
    let first = members[0];

    GroupedPosition {
        code,
        name: first.name.clone(),
        holdings: members.iter().map(|h| (*h).clone()).collect(),
        total_quantity,
        market_value,
        pnl: PnL {
            usd: pnl_usd,
            myr: pnl_myr,
            percentage,
        },
        portion,
        accounts,
        kind: first.kind,
        weighted_avg_market_price,
        weighted_avg_cost,
        currency: first.currency,
    }
}

/// Apply a conjunctive filter. The default `GroupFilter` keeps everything
/// unchanged in order and contents.
pub fn filter_groups(groups: Vec<GroupedPosition>, filter: &GroupFilter) -> Vec<GroupedPosition> {
    groups.into_iter().filter(|g| filter.matches(g)).collect()
}

/// Stable sort by the chosen numeric key. Ties retain their original
/// relative order, so re-sorting an already-sorted list is a no-op for
/// equal-key groups.
pub fn sort_groups(mut groups: Vec<GroupedPosition>, key: GroupSortKey) -> Vec<GroupedPosition> {
    let cmp = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
    match key {
        GroupSortKey::PnlDesc => groups.sort_by(|a, b| cmp(b.pnl.myr, a.pnl.myr)),
        GroupSortKey::PnlAsc => groups.sort_by(|a, b| cmp(a.pnl.myr, b.pnl.myr)),
        GroupSortKey::PortionDesc => groups.sort_by(|a, b| cmp(b.portion, a.portion)),
        GroupSortKey::PortionAsc => groups.sort_by(|a, b| cmp(a.portion, b.portion)),
        GroupSortKey::ValueDesc => groups.sort_by(|a, b| cmp(b.market_value.myr, a.market_value.myr)),
        GroupSortKey::ValueAsc => groups.sort_by(|a, b| cmp(a.market_value.myr, b.market_value.myr)),
    }
    groups
}
