use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `TODOLIST_QUIET=1` drops confirmations and other chatter from human output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("TODOLIST_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
