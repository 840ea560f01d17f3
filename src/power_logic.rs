/// Decide whether the panel should be powered under the inactivity policy.
///
/// The panel goes dark only once idle time strictly exceeds the timeout.
pub fn screen_should_be_on(auto_off_enabled: bool, idle_ms: u64, auto_off_timeout_ms: u64) -> bool {
    !(auto_off_enabled && idle_ms > auto_off_timeout_ms)
}
