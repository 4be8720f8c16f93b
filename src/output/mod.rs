pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_offline_banner, format_points, format_results_table,
    format_score, format_scored_table, format_standings_table, format_summary, format_tsv,
    should_use_colors, NO_FANTASY_DATA, NO_STANDINGS,
};
