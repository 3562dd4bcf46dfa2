//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# Omni Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Omni"
# default_width = 1300     # 400-10000, first run only
# default_height = 900     # 300-10000, first run only
# min_width = 800          # 200-4000
# min_height = 600         # 200-4000
# start_maximized = true

[layout]
# header_height = 70       # 0-400, space kept for the tab bar
# footer_height = 0        # 0-400

[sessions]
# partition_prefix = "ai_sessions_v2"
# background_color = "#ffffff"
# user_agent = "Mozilla/5.0 ..."
# devtools = false
# allow_popups = true
# dark_flash_fix = true
# clipboard = true

[policy]
# Headers of these hosts (and subdomains) are left untouched.
# trusted_domains = ["google.com", "accounts.google.com", "youtube.com", "gstatic.com"]
# stripped_headers = ["x-frame-options", "content-security-policy",
#   "cross-origin-resource-policy", "cross-origin-opener-policy",
#   "cross-origin-embedder-policy"]

[broadcast]
# settle_delay_ms = 100      # 0-5000
# keyup_delay_ms = 50        # 0-5000
# send_button_delay_ms = 200 # 0-10000
#
# [[broadcast.sites]]
# hosts = ["chat.example.com"]
# input_selectors = ["#prompt-textarea"]
# send_selector = "button[data-testid=\"send-button\"]"

[detection]
# probe_blocked_pages = true
# blocked_markers = ["Sorry, you have been blocked"]

[persistence]
# geometry_debounce_ms = 500 # 50-10000
# restore_tabs = true

# Replace the launcher catalog:
# [[services]]
# name = "ChatGPT"
# url = "https://chat.openai.com"
# private = false
# incognito_allowed = true
"##
}
