//! Host detection.

use std::sync::OnceLock;

use kettle_schema::{Arch, LinuxDistro, Os, PlatformSignature};

const OS_RELEASE: &str = "/etc/os-release";

static CURRENT: OnceLock<PlatformSignature> = OnceLock::new();

/// The signature of the running host, detected on first use.
pub fn current() -> &'static PlatformSignature {
    CURRENT.get_or_init(detect)
}

/// Detect the host OS, architecture and (on Linux) distribution.
pub fn detect() -> PlatformSignature {
    let os = Os::current();
    let linux_distro = match os {
        Os::Linux => std::fs::read_to_string(OS_RELEASE)
            .ok()
            .map(|contents| LinuxDistro::parse_os_release(&contents)),
        _ => None,
    };
    let signature = PlatformSignature::new(os, Arch::current(), linux_distro);
    tracing::debug!(platform = %signature, "detected host platform");
    signature
}
