// Fund types and fund focuses share one shape and one set of rules,
// so they are handled as two kinds of the same classification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
    FundType,
    FundFocus,
}

impl ClassificationKind {
    pub fn table(self) -> &'static str {
        match self {
            ClassificationKind::FundType => "fund_types",
            ClassificationKind::FundFocus => "fund_focuses",
        }
    }

    /// Column of `funds` that references this classification.
    pub fn fund_column(self) -> &'static str {
        match self {
            ClassificationKind::FundType => "fund_type_id",
            ClassificationKind::FundFocus => "fund_focus_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassificationKind::FundType => "Fund type",
            ClassificationKind::FundFocus => "Fund focus",
        }
    }

    /// Key of the list in response bodies and the route prefix.
    pub fn collection(self) -> &'static str {
        self.table()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Classification {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationPatch {
    pub name: Option<String>,
}
