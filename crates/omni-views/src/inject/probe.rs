/// Script returning `true` when the page body contains any of `markers`.
/// Evaluated after each finished load.
pub fn blocked_probe_script(markers: &[String]) -> String {
    let markers = serde_json::to_string(markers).unwrap_or_else(|_| "[]".to_string());
    format!(
        "(function () {{ try {{ var t = (document.body && document.body.innerText) || ''; \
         return {markers}.some(function (m) {{ return t.indexOf(m) !== -1; }}); \
         }} catch (e) {{ return false; }} }})()"
    )
}
