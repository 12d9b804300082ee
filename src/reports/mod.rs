// Reports module - rankings over a merged table

pub mod rankings;

pub use rankings::{filter_min, load_merged_csv, rank_by, MergedRow, Ranking, RankingEntry};
