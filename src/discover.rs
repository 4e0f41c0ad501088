use crate::host::{RenderRoot, RootDiscovery};

/// Name of the host surface that must never carry an overlay. Covering the
/// toolbar would hide the control the user needs to turn the overlays off.
pub const TOOLBAR_ROOT_NAME: &str = "Toolbar";

/// Query the host for overlay-eligible root surfaces.
///
/// `None` means no usable roots this cycle — either discovery is
/// unavailable (logged at WARN) or every surface is filtered out or
/// closed. Callers skip the cycle and move on to the between-cycles wait;
/// neither condition is fatal.
#[tracing::instrument(skip(discovery))]
pub fn eligible_roots(discovery: &dyn RootDiscovery) -> Option<Vec<RenderRoot>> {
    let roots = match discovery.list_roots() {
        Ok(roots) => roots,
        Err(err) => {
            tracing::warn!(error = %err, "render-root discovery unavailable");
            return None;
        }
    };

    let eligible: Vec<RenderRoot> = roots
        .into_iter()
        .filter(|root| root.name != TOOLBAR_ROOT_NAME)
        .collect();
    if eligible.is_empty() { None } else { Some(eligible) }
}
