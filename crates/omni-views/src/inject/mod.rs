//! Scripts run inside AI contexts.
//!
//! Every injection is fire-and-forget: a failure in one context is logged
//! by the caller and never blocks the others.

mod anti_detection;
pub mod broadcast;
mod dark_flash;
mod probe;

pub use anti_detection::WEBDRIVER_SHIM;
pub use broadcast::{
    BroadcastTiming, GenericStrategy, SiteStrategy, StrategySet, SubmitRecipe, SubmitStrategy,
};
pub use dark_flash::DARK_FLASH_FIX;
pub use probe::blocked_probe_script;

/// Initialization scripts installed on every AI context, in order.
pub fn init_scripts(dark_flash_fix: bool) -> Vec<String> {
    let mut scripts = vec![WEBDRIVER_SHIM.to_string()];
    if dark_flash_fix {
        scripts.push(DARK_FLASH_FIX.to_string());
    }
    scripts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shim_always_first() {
        assert_eq!(init_scripts(false), vec![WEBDRIVER_SHIM.to_string()]);
        let both = init_scripts(true);
        assert_eq!(both.len(), 2);
        assert_eq!(both[0], WEBDRIVER_SHIM);
    }
}
