//! "Ask all": type one prompt into every context and submit it.
//!
//! Each site is handled by a [`SubmitStrategy`]. Strategies only decide
//! selectors; the fill/Enter/click sequence is shared.

use omni_config::schema::{BroadcastConfig, SiteRecipeConfig};
use serde::Serialize;

use crate::policy::host_of;

/// Tried in order when nothing editable has focus.
pub const GENERIC_INPUT_SELECTORS: &[&str] = &[
    "textarea",
    "div[contenteditable=\"true\"]",
    "input[type=\"text\"]",
];

pub const GENERIC_SEND_SELECTOR: &str =
    "button[aria-label*=\"Send\"], button[aria-label*=\"Submit\"], button[data-testid*=\"send\"]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastTiming {
    pub settle_ms: u32,
    pub keyup_ms: u32,
    pub send_button_ms: u32,
}

impl Default for BroadcastTiming {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            keyup_ms: 50,
            send_button_ms: 200,
        }
    }
}

impl From<&BroadcastConfig> for BroadcastTiming {
    fn from(config: &BroadcastConfig) -> Self {
        Self {
            settle_ms: config.settle_delay_ms,
            keyup_ms: config.keyup_delay_ms,
            send_button_ms: config.send_button_delay_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRecipe {
    pub input_selectors: Vec<String>,
    pub send_selector: String,
}

pub trait SubmitStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn matches(&self, host: &str) -> bool;
    fn recipe(&self) -> SubmitRecipe;
}

/// Fallback used for every site without a dedicated strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl SubmitStrategy for GenericStrategy {
    fn name(&self) -> &str {
        "generic"
    }

    fn matches(&self, _host: &str) -> bool {
        true
    }

    fn recipe(&self) -> SubmitRecipe {
        SubmitRecipe {
            input_selectors: GENERIC_INPUT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            send_selector: GENERIC_SEND_SELECTOR.to_string(),
        }
    }
}

/// Site-specific selectors. Input selectors are tried before the generic
/// ones; the send selector replaces the generic one when set.
#[derive(Debug, Clone)]
pub struct SiteStrategy {
    hosts: Vec<String>,
    input_selectors: Vec<String>,
    send_selector: Option<String>,
}

impl SiteStrategy {
    pub fn new(
        hosts: Vec<String>,
        input_selectors: Vec<String>,
        send_selector: Option<String>,
    ) -> Self {
        Self {
            hosts: hosts.into_iter().map(|h| h.to_ascii_lowercase()).collect(),
            input_selectors,
            send_selector,
        }
    }
}

impl From<&SiteRecipeConfig> for SiteStrategy {
    fn from(config: &SiteRecipeConfig) -> Self {
        Self::new(
            config.hosts.clone(),
            config.input_selectors.clone(),
            config.send_selector.clone(),
        )
    }
}

impl SubmitStrategy for SiteStrategy {
    fn name(&self) -> &str {
        self.hosts.first().map(String::as_str).unwrap_or("site")
    }

    fn matches(&self, host: &str) -> bool {
        self.hosts
            .iter()
            .any(|h| host == h || host.ends_with(&format!(".{h}")))
    }

    fn recipe(&self) -> SubmitRecipe {
        let generic = GenericStrategy.recipe();
        let mut input_selectors = self.input_selectors.clone();
        input_selectors.extend(generic.input_selectors);
        SubmitRecipe {
            input_selectors,
            send_selector: self
                .send_selector
                .clone()
                .unwrap_or(generic.send_selector),
        }
    }
}

/// Registered strategies plus timing. The first strategy matching the
/// page host wins; `GenericStrategy` covers the rest.
pub struct StrategySet {
    sites: Vec<Box<dyn SubmitStrategy>>,
    timing: BroadcastTiming,
}

impl StrategySet {
    pub fn new(timing: BroadcastTiming) -> Self {
        Self {
            sites: Vec::new(),
            timing,
        }
    }

    pub fn from_config(config: &BroadcastConfig) -> Self {
        let mut set = Self::new(BroadcastTiming::from(config));
        for site in &config.sites {
            set.register(Box::new(SiteStrategy::from(site)));
        }
        set
    }

    pub fn register(&mut self, strategy: Box<dyn SubmitStrategy>) {
        self.sites.push(strategy);
    }

    pub fn timing(&self) -> BroadcastTiming {
        self.timing
    }

    pub fn strategy_for(&self, url: &str) -> &dyn SubmitStrategy {
        let host = host_of(url).unwrap_or_default();
        self.sites
            .iter()
            .find(|s| s.matches(&host))
            .map(|s| s.as_ref())
            .unwrap_or(&GenericStrategy)
    }

    pub fn script_for(&self, url: &str, text: &str) -> String {
        compose_script(&self.strategy_for(url).recipe(), text, self.timing)
    }
}

impl Default for StrategySet {
    fn default() -> Self {
        Self::new(BroadcastTiming::default())
    }
}

const SUBMIT_TEMPLATE: &str = r#"(function (cfg) {
  try {
    var text = cfg.text;
    var editable = function (el) {
      return !!el && (el.tagName === 'TEXTAREA' || el.tagName === 'INPUT' || el.isContentEditable);
    };
    var target = editable(document.activeElement) ? document.activeElement : null;
    for (var i = 0; !target && i < cfg.inputs.length; i++) {
      target = document.querySelector(cfg.inputs[i]);
    }
    if (!target) return;
    target.focus();
    var inserted = false;
    try { inserted = document.execCommand('insertText', false, text); } catch (e) {}
    var visible = inserted
      && !(target.value !== undefined && !String(target.value).includes(text))
      && !(target.innerText && !target.innerText.includes(text));
    if (!visible) {
      if (target.isContentEditable) {
        target.innerText = text;
      } else {
        var proto = target.tagName === 'TEXTAREA' ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
        var desc = Object.getOwnPropertyDescriptor(proto, 'value');
        if (desc && desc.set) { desc.set.call(target, text); } else { target.value = text; }
      }
      target.dispatchEvent(new Event('input', { bubbles: true }));
    }
    setTimeout(function () {
      var opts = { key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true };
      target.dispatchEvent(new KeyboardEvent('keydown', opts));
      target.dispatchEvent(new KeyboardEvent('keypress', opts));
      setTimeout(function () { target.dispatchEvent(new KeyboardEvent('keyup', opts)); }, cfg.keyup);
      setTimeout(function () {
        var button = document.querySelector(cfg.send);
        if (button && !button.disabled) button.click();
      }, cfg.sendDelay);
    }, cfg.settle);
  } catch (e) {}
})(__CONFIG__);"#;

/// Arguments handed to the submit script as a single JSON object.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitArgs<'a> {
    text: &'a str,
    inputs: &'a [String],
    send: &'a str,
    settle: u32,
    keyup: u32,
    send_delay: u32,
}

/// Build the fill-and-submit script. Prompt text and selectors travel in
/// one JSON argument, so the text reaches the page exactly as given.
pub fn compose_script(recipe: &SubmitRecipe, text: &str, timing: BroadcastTiming) -> String {
    let args = SubmitArgs {
        text,
        inputs: &recipe.input_selectors,
        send: &recipe.send_selector,
        settle: timing.settle_ms,
        keyup: timing.keyup_ms,
        send_delay: timing.send_button_ms,
    };
    let config = serde_json::to_string(&args).unwrap_or_else(|_| "null".to_string());
    SUBMIT_TEMPLATE.replacen("__CONFIG__", &config, 1)
}
