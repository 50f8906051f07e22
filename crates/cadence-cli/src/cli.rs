//! Command-line argument wrappers and the command dispatcher.
//!
//! Every subcommand has a clap `Args` struct that converts into the matching
//! core parameter type, so clap attributes never leak into `cadence-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! [`Cli`] runs the converted parameters against the planner and hands the
//! markdown produced by the core display types to the terminal renderer.

use anyhow::{Context, Result};
use cadence_core::{
    models::parse_weekday, params::*, CadenceError, CompletionFilter, CreateResult,
    DeleteResult, OperationStatus, Planner, RecurrenceType,
};
use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use jiff::civil::Date;

use crate::renderer::TerminalRenderer;

/// Parses a single weekday given as a number (0 = Sunday) or a name.
fn weekday_arg(value: &str) -> std::result::Result<u8, String> {
    parse_weekday(value).map_err(|e| e.to_string())
}

/// Recurrence frequency accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RecurrenceTypeArg {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<RecurrenceTypeArg> for RecurrenceType {
    fn from(val: RecurrenceTypeArg) -> Self {
        match val {
            RecurrenceTypeArg::Daily => RecurrenceType::Daily,
            RecurrenceTypeArg::Weekly => RecurrenceType::Weekly,
            RecurrenceTypeArg::Monthly => RecurrenceType::Monthly,
            RecurrenceTypeArg::Yearly => RecurrenceType::Yearly,
        }
    }
}

/// Task priority accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for PriorityArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityArg::Low => write!(f, "low"),
            PriorityArg::Medium => write!(f, "medium"),
            PriorityArg::High => write!(f, "high"),
            PriorityArg::Urgent => write!(f, "urgent"),
        }
    }
}

// ============================================================================
// Pattern arguments
// ============================================================================

/// Create a recurrence pattern
///
/// The title, description, priority, estimate, tags and notes form the
/// template copied onto every generated instance. The remaining flags define
/// the schedule.
#[derive(Args)]
pub struct CreatePatternArgs {
    /// Title of the recurring task
    pub title: String,
    #[arg(short = 't', long = "type", help = "How often the task recurs")]
    pub recurrence_type: RecurrenceTypeArg,
    #[arg(long, value_name = "DATE", help = "First possible occurrence (YYYY-MM-DD)")]
    pub start: Date,
    #[arg(short, long, default_value_t = 1, help = "Recur every N days/weeks/months/years")]
    pub interval: u32,
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = weekday_arg,
        help = "Weekdays for weekly patterns as a comma-separated list (0 = Sunday, or names)"
    )]
    pub days_of_week: Vec<u8>,
    #[arg(long, help = "Day of the month (1-31) for monthly and yearly patterns")]
    pub day_of_month: Option<u8>,
    #[arg(long, value_name = "DATE", help = "Last possible occurrence, inclusive")]
    pub end: Option<Date>,
    #[arg(long, help = "Maximum number of instances ever generated")]
    pub max: Option<u32>,
    #[arg(short, long, help = "Optional description of the task")]
    pub description: Option<String>,
    #[arg(short, long, help = "Task priority (defaults to medium)")]
    pub priority: Option<PriorityArg>,
    #[arg(long, value_name = "MINUTES", help = "Estimated duration in minutes")]
    pub estimate: Option<u32>,
    #[arg(long, value_delimiter = ',', help = "Tags as a comma-separated list")]
    pub tags: Vec<String>,
    #[arg(long, help = "Free-form notes copied onto each instance")]
    pub notes: Option<String>,
    #[arg(long, help = "Category identifier")]
    pub category: Option<u64>,
    #[arg(long, help = "Owner identifier")]
    pub owner: Option<String>,
    #[arg(long, help = "Create the pattern without enabling generation")]
    pub inactive: bool,
}

impl From<CreatePatternArgs> for CreatePattern {
    fn from(val: CreatePatternArgs) -> Self {
        let mut params = CreatePattern::new(val.title, val.recurrence_type.into(), val.start);
        params.interval_value = val.interval;
        params.days_of_week = val.days_of_week;
        params.day_of_month = val.day_of_month;
        params.end_date = val.end;
        params.max_occurrences = val.max;
        params.description = val.description;
        params.priority = val.priority.map(|p| p.to_string());
        params.estimated_duration = val.estimate;
        params.tags = val.tags;
        params.notes = val.notes;
        params.category_id = val.category;
        params.owner_id = val.owner.unwrap_or_default();
        params.is_active = !val.inactive;
        params
    }
}

/// List recurrence patterns with instance counts
#[derive(Args)]
pub struct ListPatternsArgs {
    #[arg(long, help = "Show inactive patterns instead of active ones")]
    pub inactive: bool,
    #[arg(long, help = "Only patterns belonging to this owner")]
    pub owner: Option<String>,
}

impl From<ListPatternsArgs> for ListPatterns {
    fn from(val: ListPatternsArgs) -> Self {
        ListPatterns {
            inactive: val.inactive,
            owner_id: val.owner,
        }
    }
}

/// Identifies a single pattern
#[derive(Args)]
pub struct PatternIdArgs {
    #[arg(help = "Unique identifier of the pattern")]
    pub id: u64,
}

impl From<PatternIdArgs> for Id {
    fn from(val: PatternIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a pattern's template or schedule
///
/// Template edits only affect instances generated afterwards. Changing the
/// cadence (type, interval, weekdays, day of month or start) applies from
/// today forward; instances that already exist are kept as they are.
#[derive(Args)]
pub struct UpdatePatternArgs {
    #[arg(help = "Unique identifier of the pattern to update")]
    pub id: u64,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description (empty string clears it)")]
    pub description: Option<String>,
    #[arg(short, long, help = "New priority")]
    pub priority: Option<PriorityArg>,
    #[arg(long, value_name = "MINUTES", help = "New estimated duration in minutes")]
    pub estimate: Option<u32>,
    #[arg(long, value_delimiter = ',', help = "Replacement tags as a comma-separated list")]
    pub tags: Option<Vec<String>>,
    #[arg(long, help = "New notes (empty string clears them)")]
    pub notes: Option<String>,
    #[arg(long, help = "New category identifier")]
    pub category: Option<u64>,
    #[arg(short = 't', long = "type", help = "New recurrence frequency")]
    pub recurrence_type: Option<RecurrenceTypeArg>,
    #[arg(short, long, help = "New interval")]
    pub interval: Option<u32>,
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = weekday_arg,
        help = "Replacement weekdays as a comma-separated list"
    )]
    pub days_of_week: Option<Vec<u8>>,
    #[arg(long, help = "New day of the month (1-31)")]
    pub day_of_month: Option<u8>,
    #[arg(long, value_name = "DATE", help = "New start date")]
    pub start: Option<Date>,
    #[arg(long, value_name = "DATE", help = "New inclusive end date")]
    pub end: Option<Date>,
    #[arg(long, conflicts_with = "end", help = "Remove the end date")]
    pub clear_end: bool,
    #[arg(long, help = "New maximum number of instances")]
    pub max: Option<u32>,
    #[arg(long, conflicts_with = "max", help = "Remove the occurrence limit")]
    pub clear_max: bool,
}

impl From<UpdatePatternArgs> for UpdatePattern {
    fn from(val: UpdatePatternArgs) -> Self {
        UpdatePattern {
            id: val.id,
            title: val.title,
            description: val.description,
            category_id: val.category,
            priority: val.priority.map(|p| p.to_string()),
            estimated_duration: val.estimate,
            tags: val.tags,
            notes: val.notes,
            recurrence_type: val
                .recurrence_type
                .map(|t| RecurrenceType::from(t).as_str().to_string()),
            interval_value: val.interval,
            days_of_week: val.days_of_week,
            day_of_month: val.day_of_month,
            start_date: val.start,
            end_date: val.end,
            max_occurrences: val.max,
            clear_end_date: val.clear_end,
            clear_max_occurrences: val.clear_max,
        }
    }
}

/// Delete a pattern and every instance it generated
#[derive(Args)]
pub struct DeletePatternArgs {
    #[arg(help = "Unique identifier of the pattern to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePatternArgs> for DeletePattern {
    fn from(val: DeletePatternArgs) -> Self {
        DeletePattern {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PatternCommands {
    /// Create a recurrence pattern
    #[command(alias = "c")]
    Create(CreatePatternArgs),
    /// List patterns with instance counts
    #[command(aliases = ["l", "ls"])]
    List(ListPatternsArgs),
    /// Show details of a pattern
    #[command(alias = "s")]
    Show(PatternIdArgs),
    /// Update a pattern's template or schedule
    #[command(alias = "u")]
    Update(UpdatePatternArgs),
    /// Resume generation for a pattern
    Activate(PatternIdArgs),
    /// Pause generation for a pattern, keeping its instances
    Deactivate(PatternIdArgs),
    /// Delete a pattern and its instances permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePatternArgs),
}

// ============================================================================
// Generation arguments
// ============================================================================

/// Generate missing instances up to `today + days-ahead` (exclusive)
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["pattern_id", "all"])))]
pub struct GenerateArgs {
    #[arg(help = "Pattern to generate instances for")]
    pub pattern_id: Option<u64>,
    #[arg(long, help = "Generate for every active pattern")]
    pub all: bool,
    #[arg(long, help = "Horizon length in days (defaults to 30)")]
    pub days_ahead: Option<u32>,
    #[arg(long, conflicts_with = "all", help = "List the dates without creating anything")]
    pub preview: bool,
}

// ============================================================================
// Instance arguments
// ============================================================================

/// List the instances of a pattern in due-date order
#[derive(Args)]
pub struct ListInstancesArgs {
    #[arg(help = "Pattern whose instances to list")]
    pub pattern_id: u64,
    #[arg(long, conflicts_with = "completed", help = "Only instances not yet completed")]
    pub pending: bool,
    #[arg(long, help = "Only completed instances")]
    pub completed: bool,
    #[arg(long, value_name = "DATE", help = "Only instances due on or after this date")]
    pub from: Option<Date>,
    #[arg(long, value_name = "DATE", help = "Only instances due on or before this date")]
    pub until: Option<Date>,
}

impl From<ListInstancesArgs> for ListInstances {
    fn from(val: ListInstancesArgs) -> Self {
        let completion = if val.pending {
            Some(CompletionFilter::Pending)
        } else if val.completed {
            Some(CompletionFilter::Completed)
        } else {
            None
        };
        ListInstances {
            pattern_id: val.pattern_id,
            completion,
            due_from: val.from,
            due_until: val.until,
        }
    }
}

/// Identifies a single instance
#[derive(Args)]
pub struct InstanceIdArgs {
    #[arg(help = "Unique identifier of the instance")]
    pub id: u64,
}

impl From<InstanceIdArgs> for Id {
    fn from(val: InstanceIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Mark an instance complete, optionally recording the time spent
#[derive(Args)]
pub struct CompleteInstanceArgs {
    #[arg(help = "Unique identifier of the instance to complete")]
    pub id: u64,
    #[arg(long, value_name = "MINUTES", help = "Actual time spent in minutes")]
    pub actual_time: Option<u32>,
}

impl From<CompleteInstanceArgs> for UpdateInstance {
    fn from(val: CompleteInstanceArgs) -> Self {
        UpdateInstance {
            id: val.id,
            completed: Some(true),
            actual_time: val.actual_time,
        }
    }
}

#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List the instances of a pattern
    #[command(aliases = ["l", "ls"])]
    List(ListInstancesArgs),
    /// Show details of an instance
    #[command(alias = "s")]
    Show(InstanceIdArgs),
    /// Mark an instance complete
    #[command(alias = "c")]
    Complete(CompleteInstanceArgs),
    /// Mark a completed instance as pending again
    Reopen(InstanceIdArgs),
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Runs parsed commands against the planner and renders the output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_pattern_command(&self, command: PatternCommands) -> Result<()> {
        match command {
            PatternCommands::Create(args) => {
                let pattern = self
                    .planner
                    .create_pattern(&args.into())
                    .await
                    .context("Failed to create pattern")?;
                self.renderer.render(&CreateResult::new(pattern).to_string())
            }
            PatternCommands::List(args) => self.list_patterns(&args.into()).await,
            PatternCommands::Show(args) => {
                let id = args.id;
                let pattern = self
                    .planner
                    .get_pattern(&args.into())
                    .await
                    .context("Failed to load pattern")?
                    .ok_or(CadenceError::PatternNotFound { id })?;
                self.renderer.render(&pattern.to_string())
            }
            PatternCommands::Update(args) => {
                let result = self
                    .planner
                    .update_pattern(&args.into())
                    .await
                    .context("Failed to update pattern")?;
                self.renderer.render(&result.to_string())
            }
            PatternCommands::Activate(args) => self.set_active(args.id, true).await,
            PatternCommands::Deactivate(args) => self.set_active(args.id, false).await,
            PatternCommands::Delete(args) => {
                let pattern = self
                    .planner
                    .delete_pattern(&args.into())
                    .await
                    .context("Failed to delete pattern")?;
                self.renderer.render(&DeleteResult::new(pattern).to_string())
            }
        }
    }

    pub async fn handle_generate(&self, args: GenerateArgs) -> Result<()> {
        let days_ahead = args
            .days_ahead
            .unwrap_or_else(|| self.planner.default_days_ahead());

        let Some(pattern_id) = args.pattern_id else {
            let reports = self
                .planner
                .generate_all(Some(days_ahead))
                .await
                .context("Failed to generate instances")?;
            return self.renderer.render(&reports.to_string());
        };

        let params = GenerateInstances::with_days_ahead(pattern_id, days_ahead);
        if args.preview {
            let upcoming = self
                .planner
                .preview_generation(&params)
                .await
                .context("Failed to preview generation")?;
            return self.renderer.render(&upcoming.to_string());
        }

        let report = self
            .planner
            .generate_pattern_instances(&params)
            .await
            .context("Failed to generate instances")?;
        self.renderer.render(&report.to_string())
    }

    pub async fn handle_instance_command(&self, command: InstanceCommands) -> Result<()> {
        match command {
            InstanceCommands::List(args) => {
                let instances = self
                    .planner
                    .list_instances(&args.into())
                    .await
                    .context("Failed to list instances")?;
                self.renderer.render(&instances.to_string())
            }
            InstanceCommands::Show(args) => {
                let id = args.id;
                let instance = self
                    .planner
                    .get_instance(&args.into())
                    .await
                    .context("Failed to load instance")?
                    .ok_or(CadenceError::InstanceNotFound { id })?;
                self.renderer.render(&instance.to_string())
            }
            InstanceCommands::Complete(args) => {
                let result = self
                    .planner
                    .update_instance(&args.into())
                    .await
                    .context("Failed to complete instance")?;
                self.renderer.render(&result.to_string())
            }
            InstanceCommands::Reopen(args) => {
                let result = self
                    .planner
                    .update_instance(&UpdateInstance {
                        id: args.id,
                        completed: Some(false),
                        actual_time: None,
                    })
                    .await
                    .context("Failed to reopen instance")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn list_patterns(&self, params: &ListPatterns) -> Result<()> {
        let summaries = self
            .planner
            .list_patterns(params)
            .await
            .context("Failed to list patterns")?;
        self.renderer.render(&summaries.to_string())
    }

    async fn set_active(&self, id: u64, active: bool) -> Result<()> {
        let pattern = self
            .planner
            .set_pattern_active(&SetActive { id, active })
            .await
            .context("Failed to change pattern state")?;
        let verb = if active { "activated" } else { "deactivated" };
        let status = OperationStatus::success(format!(
            "Pattern {} ('{}') {verb}",
            pattern.id, pattern.template.title
        ));
        self.renderer.render(&status.to_string())
    }
}
