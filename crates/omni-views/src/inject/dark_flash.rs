/// Paints the root element dark before the page's own styles arrive when
/// the user prefers a dark color scheme.
pub const DARK_FLASH_FIX: &str = r#"(function () {
  try {
    if (!window.matchMedia || !window.matchMedia('(prefers-color-scheme: dark)').matches) return;
    var apply = function () {
      if (document.getElementById('omni-dark-flash-fix')) return;
      var style = document.createElement('style');
      style.id = 'omni-dark-flash-fix';
      style.textContent = 'html { background-color: #09090b !important; }';
      (document.head || document.documentElement).appendChild(style);
    };
    if (document.documentElement) {
      apply();
    } else {
      document.addEventListener('DOMContentLoaded', apply);
    }
  } catch (e) {}
})();"#;
