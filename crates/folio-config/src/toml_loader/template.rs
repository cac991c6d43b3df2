//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# folio configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[tabs]
# max_tabs = 100         # 1-500, oldest tab is closed beyond this

[links]
# preview_enabled = true # show a preview before following internal links

[session]
# state_file = "/path/to/tabs.json"

[content]
# dir = "/path/to/documents"
# site = "en.wikipedia.org"
# main_page = "Main Page"

[display]
# decor_offset = 56      # 0-400, pixels of fixed chrome above the content
# dark_mode = false

[onboarding]
# select_text_tip = true

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
