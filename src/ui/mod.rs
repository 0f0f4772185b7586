pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, error, header, info, muted, success, urgency_style};
pub use table::{items_table, lists_table, stats_table};
pub use theme::{theme, Theme};
