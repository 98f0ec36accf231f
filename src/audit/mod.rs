pub mod evaluation;
pub mod output;

pub use evaluation::{evaluate_seed, run_audit, summarize, AuditReport, RunResult};
pub use output::{print_summary, write_csv, write_summary_json};
