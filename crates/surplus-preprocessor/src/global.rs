//! The process-wide shim registry.
//!
//! Built once from a [`TargetProfile`] and never changed afterwards, so
//! passes can share it without locking.

use std::sync::OnceLock;

use surplus_shims::ShimRegistry;
use tracing::{debug, warn};

use crate::TargetProfile;

static INSTALLED: OnceLock<(TargetProfile, ShimRegistry)> = OnceLock::new();

/// Build the process-wide registry for `profile`, or return the existing one.
///
/// Only the first call builds anything. A later call with a different
/// profile gets the registry already installed and a warning is logged.
pub fn install(profile: TargetProfile) -> &'static ShimRegistry {
    let (current, registry) = INSTALLED.get_or_init(|| {
        let rules = profile.rules();
        debug!(?profile, ?rules, "installing shim registry");
        (profile, ShimRegistry::with_rules(&rules))
    });
    if *current != profile {
        warn!(
            installed = ?current,
            requested = ?profile,
            "shim registry already installed for a different target profile"
        );
    }
    registry
}

/// The process-wide registry, installing the default profile if nothing has
/// been installed yet.
pub fn installed() -> &'static ShimRegistry {
    match INSTALLED.get() {
        Some((_, registry)) => registry,
        None => install(TargetProfile::default()),
    }
}
