use clap::{Parser, ValueEnum};

#[derive(Parser, Clone, Debug)]
pub struct ChartOptions {
    pub trash_can_id: String,

    /// Time range of the chart, as named by the server (e.g. day, week, month)
    /// If not provided, the `default_chart_range` from the config file is used
    #[clap(long)]
    pub range: Option<String>,

    #[clap(long, value_enum, default_value_t = ChartCategoryArg::Total)]
    pub category: ChartCategoryArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartCategoryArg {
    /// Sum of all categories
    Total,
    Containers,
    Organics,
    Landfill,
    Paper,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WasteCategoryArg {
    Containers,
    Organics,
    Landfill,
    Paper,
}
