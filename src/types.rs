//! Domain types deserialized from the wallet daemon API.
//!
//! These mirror the daemon's JSON shapes. Fields the daemon may omit are
//! Options and rendering must degrade gracefully when they are missing.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reason text shown when a failed transaction carries no failure detail.
pub const NO_REASON: &str = "No reason";

/// Status of a transaction as reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Submitted to the wallet but not yet broadcast
    New,
    /// Executed locally without committing
    DryRun,
    /// Broadcast and awaiting finalization
    Pending,
    /// Finalized and committed
    Accepted,
    /// Finalized with only the fee portion committed
    OnlyFeeAccepted,
    /// Finalized as rejected by the network
    Rejected,
    /// Never executed; the transaction itself was invalid
    InvalidTransaction,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::New => "New",
            TransactionStatus::DryRun => "DryRun",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Accepted => "Accepted",
            TransactionStatus::OnlyFeeAccepted => "OnlyFeeAccepted",
            TransactionStatus::Rejected => "Rejected",
            TransactionStatus::InvalidTransaction => "InvalidTransaction",
        }
    }

    /// True while the transaction has not yet been finalized.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            TransactionStatus::New | TransactionStatus::DryRun | TransactionStatus::Pending
        )
    }

    /// True for the terminal failure states.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Rejected | TransactionStatus::InvalidTransaction
        )
    }

    /// True once finalized with at least the fee portion committed.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Accepted | TransactionStatus::OnlyFeeAccepted
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An executable step within a transaction's instruction list.
///
/// Instructions are structurally open-ended (template calls, methods,
/// fee payments); the dashboard renders them from the raw object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction(pub Value);

impl Instruction {
    /// Compact single-line summary for table rows.
    pub fn summary(&self) -> String {
        match &self.0 {
            Value::Object(map) => {
                // Instruction objects are single-variant maps, e.g.
                // {"CallMethod": {...}}
                if let Some((kind, body)) = map.iter().next() {
                    format!("{} {}", kind, compact_json(body))
                } else {
                    "{}".to_string()
                }
            }
            other => compact_json(other),
        }
    }
}

fn compact_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unrenderable>".to_string())
}

/// The signed transaction body as the daemon stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub fee_instructions: Vec<Instruction>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// Fee totals recorded during execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default)]
    pub total_fees_charged: u64,
}

/// A log line emitted by the engine during execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub timestamp: String,
}

/// An event emitted by a template during execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub topic: String,
    #[serde(default)]
    pub substate_id: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

/// Substates produced and consumed by a finalized transaction.
///
/// Rendered opaquely; the dashboard does not interpret substate values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubstateDiff {
    #[serde(default)]
    pub up_substates: Vec<Value>,
    #[serde(default)]
    pub down_substates: Vec<Value>,
}

/// Execution outcome attached to a finalized transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResult {
    #[serde(default)]
    pub cost_breakdown: Option<CostBreakdown>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub result: SubstateDiff,
}

/// A transaction as returned by `transactions.get`.
///
/// `result` is present only for finalized, non-rejected transactions and
/// `transaction_failure` only when a failure reason was recorded, but the
/// renderer never assumes either holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction: Transaction,
    pub status: TransactionStatus,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Failure detail keyed by reason kind. Insertion order matters: the
    /// first entry is the displayed reason.
    #[serde(default)]
    pub transaction_failure: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub result: Option<FinalizeResult>,
}

impl TransactionRecord {
    pub fn id(&self) -> &str {
        &self.transaction.id
    }

    /// Human-readable failure reason: the first recorded kind/detail
    /// pair, or a fixed fallback when the daemon recorded nothing.
    pub fn reason(&self) -> String {
        self.transaction_failure
            .as_ref()
            .and_then(|failure| failure.iter().next())
            .map(|(kind, detail)| format!("{}: {}", kind, detail))
            .unwrap_or_else(|| NO_REASON.to_string())
    }

    /// Total fees charged, defaulting to 0 when execution recorded no
    /// cost breakdown.
    pub fn total_fees(&self) -> u64 {
        self.result
            .as_ref()
            .and_then(|r| r.cost_breakdown.as_ref())
            .map(|c| c.total_fees_charged)
            .unwrap_or(0)
    }
}

/// Summary row returned by `transactions.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub total_fees_charged: u64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A wallet account as returned by `accounts.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsListResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsListResponse {
    #[serde(default)]
    pub transactions: Vec<TransactionSummary>,
    #[serde(default)]
    pub total: u64,
}

/// The consensus partition this node's validator belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeShard {
    pub bucket: u32,
    pub num_committees: u32,
    pub num_members: u32,
}

/// Epoch data reported by the validator side of the daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochSummary {
    pub current_epoch: u64,
    pub is_valid: bool,
    #[serde(default)]
    pub committee_shard: Option<CommitteeShard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShardRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeValidatorInfo {
    pub address: String,
    #[serde(default)]
    pub epoch: u64,
    #[serde(default)]
    pub shard_key: String,
}

/// One committee's shard assignment and membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeShardInfo {
    pub bucket: u32,
    pub shard_range: ShardRange,
    #[serde(default)]
    pub validators: Vec<CommitteeValidatorInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteesResponse {
    pub current_epoch: u64,
    #[serde(default)]
    pub committees: Vec<CommitteeShardInfo>,
}
