/// Hides `navigator.webdriver`. Nothing else is touched: the credentials
/// API and plugin list stay native.
pub const WEBDRIVER_SHIM: &str = "try { Object.defineProperty(navigator, 'webdriver', { get: () => undefined, configurable: true }); } catch (e) {}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shim_masks_only_webdriver() {
        assert!(WEBDRIVER_SHIM.contains("'webdriver'"));
        assert!(WEBDRIVER_SHIM.starts_with("try {"));
        assert!(!WEBDRIVER_SHIM.contains("plugins"));
        assert!(!WEBDRIVER_SHIM.contains("credentials"));
    }
}
