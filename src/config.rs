use folio_core::SiteConfig;

use crate::dom;

pub(crate) const CONFIG_ELEMENT_ID: &str = "folio-config";

pub(crate) fn load_site_config() -> SiteConfig {
    let Some(raw) = dom::by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("folio config ignored:", err.to_string());
            SiteConfig::default()
        }
    }
}
