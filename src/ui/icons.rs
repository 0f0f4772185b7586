pub struct Icons;

impl Icons {
    pub const LIST: &'static str = "📋";
    pub const CHECK: &'static str = "✅";
    pub const CROSS: &'static str = "❌";
    pub const INFO: &'static str = "ℹ️";
    pub const STATS: &'static str = "📊";
    pub const DATABASE: &'static str = "🗄️";
    pub const CALENDAR: &'static str = "📅";
    pub const NEW: &'static str = "✨";
    pub const EDIT: &'static str = "📝";
    pub const DEL: &'static str = "🗑️";
    pub const MOVE: &'static str = "➡️";
    pub const DONE: &'static str = "☑️";
    pub const OPEN: &'static str = "⬜";
    pub const OVERDUE: &'static str = "🔴";
    pub const DUE_TODAY: &'static str = "🟡";
}
