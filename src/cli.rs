use clap::{Args, Parser, Subcommand};

use crate::model::sort_key::DateFormat;
use crate::ui::Placement;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Parser)]
#[command(name = "gridder", about = "Terminal-based data grid for JSON record sets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// View records from a JSON file (an array of uniform objects)
    Open {
        path: String,

        #[command(flatten)]
        options: GridOptions,
    },

    /// Fetch records from an HTTP endpoint returning a JSON array
    Fetch {
        url: String,

        /// Query parameter appended to the request, as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        #[command(flatten)]
        options: GridOptions,
    },
}

#[derive(Args, Clone)]
pub struct GridOptions {
    /// Rows shown per page when pagination is enabled
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// How date-shaped values read: d for dd/mm/yyyy, m for mm/dd/yyyy
    #[arg(long, value_enum, default_value_t = DateFormat::DayFirst)]
    pub date_format: DateFormat,

    /// Columns that never sort
    #[arg(long = "unsorted", value_delimiter = ',')]
    pub unsorted_columns: Vec<String>,

    /// Show the column filter bar above or below the table
    #[arg(long, value_enum, default_value_t = Placement::Off)]
    pub filter: Placement,

    /// Show the global search bar above or below the table
    #[arg(long, value_enum, default_value_t = Placement::Off)]
    pub search: Placement,

    /// Show the pager above or below the table
    #[arg(long, value_enum, default_value_t = Placement::Off)]
    pub paginate: Placement,

    /// Restrict row selection to one row at a time
    #[arg(long)]
    pub single: bool,

    /// Append tracing output to this file (RUST_LOG controls verbosity)
    #[arg(long, env = "GRIDDER_LOG_FILE")]
    pub log_file: Option<String>,
}

fn parse_param(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got {:?}", arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_open_with_defaults() {
        let cli = Cli::parse_from(["gridder", "open", "data.json"]);
        let Command::Open { path, options } = cli.command else {
            panic!("expected Open");
        };
        assert_eq!(path, "data.json");
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(options.date_format, DateFormat::DayFirst);
        assert_eq!(options.filter, Placement::Off);
        assert_eq!(options.search, Placement::Off);
        assert_eq!(options.paginate, Placement::Off);
        assert!(!options.single);
        assert!(options.unsorted_columns.is_empty());
    }

    #[test]
    fn parse_open_with_page_size() {
        let cli = Cli::parse_from(["gridder", "open", "data.json", "--page-size", "10"]);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        assert_eq!(options.page_size, 10);
    }

    #[test]
    fn parse_date_format() {
        let cli = Cli::parse_from(["gridder", "open", "data.json", "--date-format", "m"]);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        assert_eq!(options.date_format, DateFormat::MonthFirst);
    }

    #[test]
    fn parse_unsorted_columns_comma_delimited() {
        let cli = Cli::parse_from(["gridder", "open", "data.json", "--unsorted", "id,notes"]);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        assert_eq!(options.unsorted_columns, vec!["id", "notes"]);
    }

    #[test]
    fn parse_toolbar_placements() {
        let cli = Cli::parse_from([
            "gridder", "open", "data.json", "--filter", "top", "--search", "bottom", "--paginate",
            "bottom",
        ]);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        assert_eq!(options.filter, Placement::Top);
        assert_eq!(options.search, Placement::Bottom);
        assert_eq!(options.paginate, Placement::Bottom);
    }

    #[test]
    fn parse_fetch_with_params() {
        let cli = Cli::parse_from([
            "gridder",
            "fetch",
            "http://localhost:8080/records",
            "--param",
            "limit=100",
            "--param",
            "kind=user",
        ]);
        let Command::Fetch { url, params, .. } = cli.command else {
            panic!("expected Fetch");
        };
        assert_eq!(url, "http://localhost:8080/records");
        assert_eq!(
            params,
            vec![
                ("limit".to_string(), "100".to_string()),
                ("kind".to_string(), "user".to_string()),
            ]
        );
    }

    #[test]
    fn parse_fetch_rejects_malformed_params() {
        let result = Cli::try_parse_from([
            "gridder",
            "fetch",
            "http://localhost/records",
            "--param",
            "no-equals-sign",
        ]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "gridder",
            "fetch",
            "http://localhost/records",
            "--param",
            "=value",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn param_value_may_contain_equals() {
        let cli = Cli::parse_from([
            "gridder",
            "fetch",
            "http://localhost/records",
            "--param",
            "q=a=b",
        ]);
        let Command::Fetch { params, .. } = cli.command else {
            panic!("expected Fetch");
        };
        assert_eq!(params, vec![("q".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn parse_single_selection_flag() {
        let cli = Cli::parse_from(["gridder", "open", "data.json", "--single"]);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        assert!(options.single);
    }
}
