//! # Domain Services
//!
//! Pure functions over registry records. No I/O here; the service layer
//! feeds these with data fetched through the outbound ports.

use crate::domain::entities::PublishedModule;

/// Finds the record whose version string matches `version` exactly.
///
/// Linear scan, verbatim comparison. Range or prerelease semantics are
/// deliberately absent: the catalog stores what was published, and callers
/// ask for exactly one of those strings.
#[must_use]
pub fn pick_exact_version<'a>(
    versions: &'a [PublishedModule],
    version: &str,
) -> Option<&'a PublishedModule> {
    versions.iter().find(|record| record.version == version)
}

/// Orders two version strings by semantic version, unparseable last.
///
/// Used by adapters that have to derive "latest" from a full version list.
#[must_use]
pub fn semver_max<'a>(versions: &'a [PublishedModule]) -> Option<&'a PublishedModule> {
    let mut best: Option<(&PublishedModule, semver::Version)> = None;
    for record in versions {
        let Ok(parsed) = semver::Version::parse(&record.version) else {
            continue;
        };
        match &best {
            Some((_, current)) if *current >= parsed => {}
            _ => best = Some((record, parsed)),
        }
    }
    best.map(|(record, _)| record).or_else(|| versions.last())
}
