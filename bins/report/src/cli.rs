//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use monchantier_core::filter::{FilterCriteria, RecordTypeFilter};
use monchantier_shared::types::{CategoryId, ChantierId, CurrencyCode};
use monchantier_shared::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(name = "monchantier")]
#[command(about = "Summarize a MonChantier data snapshot as a JSON dashboard")]
#[command(version)]
pub struct Args {
    /// JSON snapshot file (default: report.snapshot_path)
    pub snapshot: Option<String>,

    /// Record type to aggregate
    #[arg(long = "type", value_enum, default_value_t = KindArg::Expense)]
    pub kind: KindArg,

    /// Restrict to a chantier; repeatable
    #[arg(long = "chantier", value_name = "ID")]
    pub chantiers: Vec<ChantierId>,

    /// Restrict to a category; repeatable
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<CategoryId>,

    /// First day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Display currency (default: currency.display)
    #[arg(long, value_name = "CODE", value_parser = CurrencyCode::parse)]
    pub currency: Option<CurrencyCode>,

    /// Bypass the summary cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    All,
    Expense,
    Quote,
    Transfer,
}

impl From<KindArg> for RecordTypeFilter {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::All => Self::All,
            KindArg::Expense => Self::Expense,
            KindArg::Quote => Self::Quote,
            KindArg::Transfer => Self::Transfer,
        }
    }
}

impl Args {
    /// Builds the primary filter.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `--from` is after `--to`.
    pub fn filter(&self) -> AppResult<FilterCriteria> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(AppError::Validation(format!("--from {from} is after --to {to}")));
        }

        let filter = self
            .chantiers
            .iter()
            .cloned()
            .fold(FilterCriteria::new().of_type(self.kind.into()), FilterCriteria::with_chantier);
        let filter = self
            .categories
            .iter()
            .cloned()
            .fold(filter, FilterCriteria::with_category);

        Ok(filter.between(self.from, self.to))
    }
}
