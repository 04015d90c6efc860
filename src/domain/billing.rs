//! Static plan catalog and the arithmetic shown on the pricing page.

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use serde::Serialize;

use crate::models::subscriptions::{BillingInterval, SubscriptionStatus, SubscriptionTier};

/// Postings (projects for clients, applications for freelancers) allowed per
/// calendar month on the free tier.
pub const FREE_MONTHLY_POSTINGS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub name: &'static str,
    pub description: &'static str,
    /// `None` for plans sold through sales.
    pub monthly_price: Option<u32>,
    pub yearly_price: Option<u32>,
    pub monthly_postings_limit: Option<u32>,
    pub features: Vec<&'static str>,
    pub popular: bool,
}

/// A plan as rendered for one billing interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: Plan,
    pub interval: BillingInterval,
    /// Dollars per month for the chosen interval; yearly prices are spread
    /// over twelve months and rounded.
    pub price_per_month: Option<u32>,
    pub savings_percent: Option<u32>,
    pub cta: &'static str,
}

pub fn catalog() -> Vec<Plan> {
    [
        SubscriptionTier::Free,
        SubscriptionTier::Basic,
        SubscriptionTier::Business,
        SubscriptionTier::Enterprise,
    ]
    .into_iter()
    .map(plan)
    .collect()
}

pub fn plan(tier: SubscriptionTier) -> Plan {
    match tier {
        SubscriptionTier::Free => Plan {
            tier: SubscriptionTier::Free,
            name: "Free",
            description: "Try the marketplace with a handful of postings",
            monthly_price: Some(0),
            yearly_price: Some(0),
            monthly_postings_limit: Some(FREE_MONTHLY_POSTINGS),
            features: vec![
                "5 project posts or applications per month",
                "Basic profile",
                "Community support",
            ],
            popular: false,
        },
        SubscriptionTier::Basic => Plan {
            tier: SubscriptionTier::Basic,
            name: "Basic",
            description: "For freelancers and clients working regularly",
            monthly_price: Some(29),
            yearly_price: Some(290),
            monthly_postings_limit: None,
            features: vec![
                "Unlimited project posts and applications",
                "AI project matching",
                "Time tracking and milestones",
                "Email support",
            ],
            popular: true,
        },
        SubscriptionTier::Business => Plan {
            tier: SubscriptionTier::Business,
            name: "Business",
            description: "For teams managing many engagements",
            monthly_price: Some(99),
            yearly_price: Some(990),
            monthly_postings_limit: None,
            features: vec![
                "Everything in Basic",
                "Dispute resolution priority",
                "File sharing",
                "Priority support",
            ],
            popular: false,
        },
        SubscriptionTier::Enterprise => Plan {
            tier: SubscriptionTier::Enterprise,
            name: "Enterprise",
            description: "Custom terms for large organisations",
            monthly_price: None,
            yearly_price: None,
            monthly_postings_limit: None,
            features: vec![
                "Everything in Business",
                "Dedicated account manager",
                "Custom integrations",
            ],
            popular: false,
        },
    }
}

pub fn yearly_monthly_equivalent(yearly: u32) -> u32 {
    (f64::from(yearly) / 12.0).round() as u32
}

/// `round((1 - yearly / (12 * monthly)) * 100)`; `None` for free or unpriced plans.
pub fn savings_percent(monthly: u32, yearly: u32) -> Option<u32> {
    if monthly == 0 {
        return None;
    }
    let ratio = f64::from(yearly) / (12.0 * f64::from(monthly));
    Some(((1.0 - ratio) * 100.0).round().max(0.0) as u32)
}

pub fn view(plan: Plan, interval: BillingInterval) -> PlanView {
    let (price_per_month, savings) = match (plan.monthly_price, plan.yearly_price, interval) {
        (Some(m), _, BillingInterval::Monthly) => (Some(m), None),
        (Some(m), Some(y), BillingInterval::Yearly) => {
            (Some(yearly_monthly_equivalent(y)), savings_percent(m, y))
        }
        _ => (None, None),
    };

    let cta = match plan.tier {
        SubscriptionTier::Free => "Get Started",
        SubscriptionTier::Enterprise => "Contact Sales",
        _ => "Subscribe",
    };

    PlanView {
        plan,
        interval,
        price_per_month,
        savings_percent: savings,
        cta,
    }
}

/// Amount charged for one period, `None` when the plan is not self-serve.
pub fn charge(tier: SubscriptionTier, interval: BillingInterval) -> Option<u32> {
    let p = plan(tier);
    match interval {
        BillingInterval::Monthly => p.monthly_price,
        BillingInterval::Yearly => p.yearly_price,
    }
}

pub fn period_end(start: DateTime<Utc>, interval: BillingInterval) -> DateTime<Utc> {
    let months = match interval {
        BillingInterval::Monthly => Months::new(1),
        BillingInterval::Yearly => Months::new(12),
    };
    start.checked_add_months(months).unwrap_or(start)
}

/// First instant of the UTC calendar month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Stored status with expiry applied: a period that has ended reads as expired.
pub fn effective_status(
    stored: SubscriptionStatus,
    period_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> SubscriptionStatus {
    if stored != SubscriptionStatus::Expired && period_end <= now {
        SubscriptionStatus::Expired
    } else {
        stored
    }
}

pub fn quota_exceeded(limit: Option<u32>, used: u64) -> bool {
    limit.is_some_and(|l| used >= u64::from(l))
}
