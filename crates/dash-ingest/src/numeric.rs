//! Numeric subtype rules.

use dash_model::{CURRENCY_SYMBOLS, NumericSubType};

use crate::config::AnalyzerConfig;

const AMOUNT_KEYWORDS: &[&str] = &[
    "amount", "cost", "revenue", "sales", "price", "profit", "fee", "income", "expense", "spend",
    "gmv", "turnover", "金额", "销售额", "成本", "收入", "利润", "费用", "价格", "单价", "营收",
    "营业额", "支出",
];

const PERCENTAGE_KEYWORDS: &[&str] = &[
    "rate", "ratio", "percent", "percentage", "pct", "margin", "growth", "yoy", "率", "占比",
    "比例", "百分比", "同比", "环比",
];

const QUANTITY_KEYWORDS: &[&str] = &[
    "count", "qty", "quantity", "num", "number", "units", "volume", "数量", "件数", "销量",
    "个数", "次数", "人数", "订单数",
];

/// What the subtype rules look at for one numeric column.
#[derive(Debug, Clone, Default)]
pub struct NumericEvidence {
    pub column_name: String,
    /// Raw display strings of the non-blank cells.
    pub raw: Vec<String>,
    /// Parsed values of the cells that parsed.
    pub parsed: Vec<f64>,
}

impl NumericEvidence {
    fn has_raw(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.raw.iter().any(|s| pred(s))
    }
}

/// Subtype detection rules, evaluated in [`SubTypeRule::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTypeRule {
    /// Column name carries an amount, rate or count keyword.
    NameKeyword,
    /// Any value carries a currency symbol.
    CurrencySymbol,
    /// Values bounded to a percentage range and at least one `%` sign.
    PercentSign,
    /// Mostly whole numbers.
    MostlyIntegral,
}

impl SubTypeRule {
    pub const ORDER: [SubTypeRule; 4] = [
        SubTypeRule::NameKeyword,
        SubTypeRule::CurrencySymbol,
        SubTypeRule::PercentSign,
        SubTypeRule::MostlyIntegral,
    ];

    pub fn evaluate(
        self,
        evidence: &NumericEvidence,
        config: &AnalyzerConfig,
    ) -> Option<NumericSubType> {
        match self {
            SubTypeRule::NameKeyword => sub_type_from_name(&evidence.column_name),
            SubTypeRule::CurrencySymbol => evidence
                .has_raw(|s| s.contains(CURRENCY_SYMBOLS))
                .then_some(NumericSubType::Amount),
            SubTypeRule::PercentSign => {
                let bounded = |lo: f64, hi: f64| {
                    !evidence.parsed.is_empty()
                        && evidence.parsed.iter().all(|v| (lo..=hi).contains(v))
                };
                (evidence.has_raw(|s| s.contains('%'))
                    && (bounded(0.0, 100.0) || bounded(0.0, 1.0)))
                .then_some(NumericSubType::Percentage)
            }
            SubTypeRule::MostlyIntegral => {
                if evidence.parsed.is_empty() {
                    return None;
                }
                let integral = evidence.parsed.iter().filter(|v| v.fract() == 0.0).count();
                let ratio = integral as f64 / evidence.parsed.len() as f64;
                (ratio > config.quantity_integral_ratio).then_some(NumericSubType::Quantity)
            }
        }
    }
}

/// Subtype of a numeric column; `GENERAL` when no rule fires.
pub fn detect_sub_type(evidence: &NumericEvidence, config: &AnalyzerConfig) -> NumericSubType {
    SubTypeRule::ORDER
        .iter()
        .find_map(|rule| rule.evaluate(evidence, config))
        .unwrap_or(NumericSubType::General)
}

/// Keyword lists are checked amount, then rate, then count.
fn sub_type_from_name(name: &str) -> Option<NumericSubType> {
    let lowered = name.to_lowercase();
    let tokens = name_tokens(&lowered);
    let hit = |keywords: &[&str]| {
        keywords.iter().any(|kw| {
            if kw.is_ascii() {
                tokens.iter().any(|t| t == kw)
            } else {
                lowered.contains(kw)
            }
        })
    };
    if hit(AMOUNT_KEYWORDS) {
        Some(NumericSubType::Amount)
    } else if hit(PERCENTAGE_KEYWORDS) {
        Some(NumericSubType::Percentage)
    } else if hit(QUANTITY_KEYWORDS) {
        Some(NumericSubType::Quantity)
    } else {
        None
    }
}

/// ASCII words of a lowercased column name.
pub(crate) fn name_tokens(lowered: &str) -> Vec<String> {
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
