use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use lbutils_db::Collection;
use lbutils_format::fmt_num;
use lbutils_query::{FilterRequest, apply, try_apply};
use tracing::info;

use crate::config::{ListingConfig, load_records, parse_param};

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Listing config (JSON): collection schema and quick search fields
    #[arg(long, short = 'c', env = "LBUTILS_CONFIG")]
    pub config: PathBuf,

    /// Records to filter (JSON array of objects)
    #[arg(long, short = 'd', env = "LBUTILS_DATA")]
    pub data: PathBuf,

    /// Request parameter as key=value, e.g. q__name__icontains=book
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Fail on a filter that cannot be applied instead of printing every record
    #[arg(long)]
    pub strict: bool,

    /// Print only the number of matching records
    #[arg(long, conflicts_with = "sum")]
    pub count: bool,

    /// Print the sum of a numeric field over the matching records
    #[arg(long, value_name = "FIELD")]
    pub sum: Option<String>,
}

pub fn run(args: &FilterArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let ListingConfig {
        collection: schema,
        quick_search,
    } = ListingConfig::load(&args.config)?;
    let collection = Collection::new(schema, load_records(&args.data)?);

    let pairs = args
        .params
        .iter()
        .map(|p| parse_param(p))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let request = FilterRequest::from_pairs(pairs);

    let text_fields = &quick_search.text_fields;
    let numeric_fields = &quick_search.numeric_fields;
    let filtered = if args.strict {
        try_apply(&collection, &request, text_fields, numeric_fields)?
    } else {
        apply(&collection, &request, text_fields, numeric_fields)
    };
    info!(
        collection = collection.name(),
        total = collection.count(),
        matched = filtered.count(),
        "filter applied"
    );

    if let Some(field) = &args.sum {
        writeln!(out, "{}", filtered.sum(field)?)?;
    } else if args.count {
        writeln!(out, "{}", fmt_num(filtered.count() as f64, None))?;
    } else {
        serde_json::to_writer_pretty(&mut *out, filtered.records())?;
        writeln!(out)?;
    }
    Ok(())
}
