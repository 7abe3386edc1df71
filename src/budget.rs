// 📊 Budget & Report Statistics
// Derived figures for the dashboard, the budget planner and the monthly report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
}

impl BudgetLine {
    pub fn new(category: &str, budget: f64, spent: f64) -> Self {
        BudgetLine {
            category: category.to_string(),
            budget,
            spent,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }

    /// Percent of the budget already spent. 0 for an empty budget.
    pub fn used_percent(&self) -> f64 {
        percent_of(self.spent, self.budget)
    }

    pub fn progress_level(&self) -> ProgressLevel {
        ProgressLevel::for_percent(self.used_percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressLevel {
    OnTrack,
    Warning,
    Critical,
}

impl ProgressLevel {
    pub fn for_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            ProgressLevel::Critical
        } else if percent >= 75.0 {
            ProgressLevel::Warning
        } else {
            ProgressLevel::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub utilization_percent: f64,
    /// Unspent budget as a share of the total
    pub savings_percent: f64,
}

pub fn summarize(lines: &[BudgetLine]) -> BudgetSummary {
    let total_budget: f64 = lines.iter().map(|l| l.budget).sum();
    let total_spent: f64 = lines.iter().map(|l| l.spent).sum();
    let remaining = total_budget - total_spent;

    BudgetSummary {
        total_budget,
        total_spent,
        remaining,
        utilization_percent: percent_of(total_spent, total_budget),
        savings_percent: percent_of(remaining, total_budget),
    }
}

/// Categories that have no budget line yet, in category-list order.
pub fn unbudgeted_categories<'a>(categories: &'a [String], lines: &[BudgetLine]) -> Vec<&'a str> {
    categories
        .iter()
        .filter(|c| !lines.iter().any(|l| &l.category == *c))
        .map(|c| c.as_str())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyFigures {
    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }

    /// Money retained as a share of income.
    pub fn savings_rate_percent(&self) -> f64 {
        percent_of(self.savings(), self.income)
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
