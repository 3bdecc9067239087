pub mod metric_card;
pub mod progress_bar;
