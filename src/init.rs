use folio_core::{SiteConfig, TriggerReason};

use crate::dom;
use crate::error::InitError;
use crate::{nav, particle_view, scroll_reveal, skill_bars, theme};

pub(crate) const YEAR_ID: &str = "year";

fn stamp_year() -> Result<(), InitError> {
    let year = dom::by_id(YEAR_ID).ok_or(InitError::MissingElement("#year"))?;
    let now = js_sys::Date::new_0();
    year.set_text_content(Some(&now.get_full_year().to_string()));
    Ok(())
}

fn report(step: &str, err: InitError) {
    gloo::console::error!(format!("init step {step} failed: {err}"));
}

/// One-time page wiring after the splash is gone. Every step runs even if an
/// earlier one failed; failures are only logged.
pub(crate) fn after_reveal(reason: TriggerReason, config: &SiteConfig) {
    let reduced_motion = dom::prefers_reduced_motion();
    gloo::console::debug!("post-reveal init:", reason.as_str());

    if let Err(err) = stamp_year() {
        report("year", err);
    }
    if let Err(err) = theme::install() {
        report("theme", err);
    }
    if let Err(err) = scroll_reveal::install(reduced_motion) {
        report("scroll-reveal", err);
    }
    if let Err(err) = nav::install_anchor_scrolling(reduced_motion) {
        report("anchor-nav", err);
    }
    if let Err(err) = nav::install_back_to_top() {
        report("back-to-top", err);
    }
    if let Err(err) = skill_bars::install(config.skill_bar_delay_ms) {
        report("skill-bars", err);
    }
    if let Err(err) = particle_view::start(&config.particles) {
        report("particles", err);
    }
}
